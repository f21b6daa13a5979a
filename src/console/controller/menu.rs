use log::info;
use crate::console::controller::form::{EditForm, Gateway, SubmitOutcome};
use crate::console::model::menu_item::{MenuItem, MenuItemDraft};
use crate::console::state::MenuCatalog;

/// Menu screen: the item catalogue plus the add/edit modal.
#[derive(Default)]
pub(crate) struct MenuPage {
    catalog: MenuCatalog,
    modal: EditForm<MenuItemDraft>,
}

impl MenuPage {
    pub fn new(catalog: MenuCatalog) -> Self {
        Self {
            catalog,
            modal: EditForm::new(),
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    pub fn modal(&self) -> &EditForm<MenuItemDraft> {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut EditForm<MenuItemDraft> {
        &mut self.modal
    }

    pub fn open_new(&mut self) {
        self.modal.open(None);
    }

    /// Open the modal for a catalogue item, or for an item known only to the caller.
    pub fn open_edit(&mut self, item: &MenuItem) {
        let known = self.catalog.get(&item.id).unwrap_or(item).clone();
        self.modal.open(Some(&known));
    }

    pub fn close(&mut self) {
        self.modal.close();
    }

    /// Submit the modal and reconcile the saved item into the catalogue.
    pub async fn save<G: Gateway<MenuItemDraft>>(&mut self, gateway: &G) -> SubmitOutcome {
        let catalog = &mut self.catalog;
        self.modal
            .submit(gateway, |item| {
                info!("menu item {} saved", item.id);
                catalog.upsert(item);
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::api::stub::{Behavior, StubBackend};
    use crate::console::api::ApiClient;
    use crate::console::controller::form::FormState;
    use crate::console::model::menu_item::MenuItemField;

    fn soup() -> MenuItem {
        MenuItem {
            id: "m-1".to_string(),
            name: "Soup".to_string(),
            description: String::new(),
            price: 4.0,
            image_url: None,
            tags: None,
        }
    }

    #[actix_web::test]
    async fn adding_appends_and_editing_replaces() {
        let backend = StubBackend::start(Behavior::Echo).await;
        let api = ApiClient::new(backend.base.clone(), Some("tok".to_string()));
        let mut page = MenuPage::new(MenuCatalog::new(vec![soup()]));

        page.open_new();
        page.modal_mut().edit(MenuItemField::Name, "Bao");
        page.modal_mut().edit(MenuItemField::Price, "3.5");
        assert_eq!(page.save(&api).await, SubmitOutcome::Saved);
        assert_eq!(page.catalog().items().len(), 2);
        assert_eq!(page.catalog().get("m-new").map(|i| i.price), Some(3.5));

        page.open_edit(&soup());
        page.modal_mut().edit(MenuItemField::Name, "Miso Soup");
        assert_eq!(page.save(&api).await, SubmitOutcome::Saved);
        assert_eq!(page.catalog().items().len(), 2);
        assert_eq!(page.catalog().items()[0].name, "Miso Soup");
        assert_eq!(page.modal().state(), FormState::Idle);
        backend.stop().await;
    }

    #[actix_web::test]
    async fn failed_save_leaves_catalogue_untouched() {
        let backend = StubBackend::start(Behavior::Fail {
            status: 500,
            message: None,
        })
        .await;
        let api = ApiClient::new(backend.base.clone(), Some("tok".to_string()));
        let mut page = MenuPage::new(MenuCatalog::new(vec![soup()]));

        page.open_edit(&soup());
        assert_eq!(
            page.save(&api).await,
            SubmitOutcome::Failed("request failed".to_string())
        );
        assert!(page.modal().is_open());
        assert_eq!(page.catalog().items(), &[soup()]);
        backend.stop().await;
    }
}
