pub(crate) mod form;
pub(crate) mod menu;
pub(crate) mod profile;
