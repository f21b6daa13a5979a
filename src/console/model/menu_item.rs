use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::console::model::draft::{Draft, ValidationErrors};
use crate::console::model::tags::Tags;

pub(crate) const PLACEHOLDER_IMAGE_URL: &str = "https://thumbs.dreamstime.com/b/logo-fresh-food-farm-vector-illustration-white-background-140863729.jpg";
const SEEDED_TAG: &str = "Veg";

const NAME_LEN: (usize, usize) = (2, 30);
// The message below advertises 150 while 250 is what gets enforced.
const DESCRIPTION_LEN: (usize, usize) = (10, 250);

const NAME_MSG: &str = "Name must be between 2 and 30 characters";
const DESCRIPTION_MSG: &str = "Description must be between 10 and 150 characters";
const PRICE_MSG: &str = "Price must be greater than 0";

/// Menu item as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MenuItemWire")]
pub(crate) struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub tags: Option<Tags>,
}

/// Wire shape of [`MenuItem`]; the id arrives as `id`, `_id` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuItemWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    tags: Option<Tags>,
}

impl TryFrom<MenuItemWire> for MenuItem {
    type Error = String;

    fn try_from(wire: MenuItemWire) -> Result<Self, Self::Error> {
        let id = wire
            .id
            .or(wire.mongo_id)
            .ok_or_else(|| "menu item without `id` or `_id`".to_string())?;
        Ok(Self {
            id,
            name: wire.name,
            description: wire.description,
            price: wire.price,
            image_url: wire.image_url,
            tags: wire.tags,
        })
    }
}

/// Request body for both create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MenuItemDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub tags: Tags,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum MenuItemField {
    #[display("name")]
    Name,
    #[display("description")]
    Description,
    #[display("price")]
    Price,
    #[display("imageUrl")]
    ImageUrl,
}

impl Draft for MenuItemDraft {
    type Entity = MenuItem;
    type Field = MenuItemField;

    fn defaults() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            tags: Tags::from(vec![SEEDED_TAG]),
        }
    }

    fn from_entity(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: if item.price.is_nan() { 0.0 } else { item.price },
            image_url: item
                .image_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            tags: item.tags.clone().unwrap_or_default(),
        }
    }

    fn entity_id(item: &MenuItem) -> &str {
        &item.id
    }

    /// Lengths are counted in chars, not UTF-16 code units.
    fn validate(&self) -> ValidationErrors<MenuItemField> {
        let mut errors = ValidationErrors::default();

        let name_len = self.name.chars().count();
        if name_len < NAME_LEN.0 || name_len > NAME_LEN.1 {
            errors.reject(MenuItemField::Name, NAME_MSG);
        }

        let description_len = self.description.chars().count();
        if description_len > 0
            && (description_len < DESCRIPTION_LEN.0 || description_len > DESCRIPTION_LEN.1)
        {
            errors.reject(MenuItemField::Description, DESCRIPTION_MSG);
        }

        // NaN never compares greater than zero, so it is rejected too
        if !(self.price > 0.0) {
            errors.reject(MenuItemField::Price, PRICE_MSG);
        }

        errors
    }

    fn apply(&mut self, field: MenuItemField, raw: &str) {
        match field {
            MenuItemField::Name => self.name = raw.to_string(),
            MenuItemField::Description => self.description = raw.to_string(),
            MenuItemField::Price => self.price = raw.trim().parse().unwrap_or(0.0),
            MenuItemField::ImageUrl => self.image_url = raw.to_string(),
        }
    }

    fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }
}
