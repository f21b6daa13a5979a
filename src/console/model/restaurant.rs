use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::console::model::draft::{Draft, ValidationErrors};
use crate::console::model::tags::Tags;

/// Restaurant profile owned by the signed-in manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update body, only the fields a manager may change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct RestaurantDraft {
    pub name: String,
    pub description: String,
    pub tags: Tags,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum RestaurantField {
    #[display("name")]
    Name,
    #[display("description")]
    Description,
    #[display("tags")]
    Tags,
    #[display("address")]
    Address,
    #[display("phone")]
    Phone,
}

impl Draft for RestaurantDraft {
    type Entity = Restaurant;
    type Field = RestaurantField;

    fn defaults() -> Self {
        Self::default()
    }

    fn from_entity(restaurant: &Restaurant) -> Self {
        Self {
            name: restaurant.name.clone(),
            description: restaurant.description.clone(),
            tags: restaurant.tags.clone(),
            address: restaurant.address.clone(),
            phone: restaurant.phone.clone(),
        }
    }

    fn entity_id(restaurant: &Restaurant) -> &str {
        &restaurant.id
    }

    /// Profile edits are sent as typed; the backend owns their rules.
    fn validate(&self) -> ValidationErrors<RestaurantField> {
        ValidationErrors::default()
    }

    fn apply(&mut self, field: RestaurantField, raw: &str) {
        match field {
            RestaurantField::Name => self.name = raw.to_string(),
            RestaurantField::Description => self.description = raw.to_string(),
            RestaurantField::Tags => self.tags.replace_from_csv(raw),
            RestaurantField::Address => self.address = raw.to_string(),
            RestaurantField::Phone => self.phone = raw.to_string(),
        }
    }

    fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }
}
