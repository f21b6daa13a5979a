pub(crate) mod config;
pub(crate) mod draft;
pub(crate) mod menu_item;
pub(crate) mod restaurant;
pub(crate) mod tags;
