use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use crate::console::model::tags::Tags;

/// Local, editable copy of a persisted entity.
pub(crate) trait Draft: Clone {
    type Entity: Clone + Debug;
    type Field: Copy + Ord + Display + Debug;

    /// Draft used when the form is opened without an entity.
    fn defaults() -> Self;

    /// Copy an entity's fields, falling back to defaults for absent ones.
    fn from_entity(entity: &Self::Entity) -> Self;

    fn entity_id(entity: &Self::Entity) -> &str;

    fn validate(&self) -> ValidationErrors<Self::Field>;

    /// Apply raw user input to a single field.
    fn apply(&mut self, field: Self::Field, raw: &str);

    fn tags_mut(&mut self) -> &mut Tags;
}

/// Field to message mapping. An empty message means the field is fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidationErrors<F: Ord>(BTreeMap<F, String>);

impl<F: Ord> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<F: Ord + Copy> ValidationErrors<F> {
    pub fn reject(&mut self, field: F, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn message(&self, field: F) -> Option<&str> {
        self.0
            .get(&field)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    pub fn clear(&mut self, field: F) {
        if let Some(message) = self.0.get_mut(&field) {
            message.clear();
        }
    }

    pub fn is_valid(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    /// Fields that currently carry a message, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.0
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(f, m)| (*f, m.as_str()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clear_only_touches_one_field() {
        let mut errors = ValidationErrors::default();
        errors.reject(1_u8, "first");
        errors.reject(2_u8, "second");
        assert!(!errors.is_valid());

        errors.clear(1);
        assert_eq!(errors.message(1), None);
        assert_eq!(errors.message(2), Some("second"));
        assert_eq!(errors.iter().count(), 1);

        errors.clear(2);
        assert!(errors.is_valid());
    }
}
