use log::debug;
use crate::console::model::menu_item::MenuItem;
use crate::console::model::restaurant::Restaurant;

/// Client-side restaurant slice
#[derive(Debug, Default)]
pub(crate) struct RestaurantState {
    pub info: Option<Restaurant>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub(crate) enum RestaurantAction {
    SetRestaurantInfo(Restaurant),
    SetLoading(bool),
    SetError(String),
    /// server-returned copy after a save
    UpdateRestaurantInfo(Restaurant),
}

impl RestaurantState {
    pub fn dispatch(&mut self, action: RestaurantAction) {
        debug!("dispatch {:?}", action);
        match action {
            RestaurantAction::SetRestaurantInfo(info) => {
                self.info = Some(info);
                self.error = None;
            }
            RestaurantAction::SetLoading(is_loading) => self.is_loading = is_loading,
            RestaurantAction::SetError(message) => self.error = Some(message),
            RestaurantAction::UpdateRestaurantInfo(info) => {
                self.info = Some(info);
                self.error = None;
            }
        }
    }
}

/// Menu items known to the client, in the order they were first seen.
#[derive(Debug, Default)]
pub(crate) struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replace the item sharing `item.id`, or append it.
    pub fn upsert(&mut self, item: MenuItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }
}
