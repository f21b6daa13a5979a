use log::{error, info, warn};
use reqwest::StatusCode;
use crate::console::api::error::ApiError;
use crate::console::api::ApiClient;
use crate::console::controller::form::{EditForm, SubmitOutcome};
use crate::console::model::restaurant::{RestaurantDraft, RestaurantField};
use crate::console::state::{RestaurantAction, RestaurantState};

const LOAD_FAILED_MSG: &str = "Failed to load restaurant information";
const UPDATE_FAILED_MSG: &str = "Failed to update restaurant";

fn update_failure_message(e: &ApiError) -> String {
    match e.status_code() {
        Some(StatusCode::FORBIDDEN) => "You are not authorized to update this restaurant".to_string(),
        Some(StatusCode::INTERNAL_SERVER_ERROR) => "Server error occurred while updating".to_string(),
        _ => e.message_or(UPDATE_FAILED_MSG),
    }
}

/// Restaurant profile screen: view the stored profile, edit and save it.
pub(crate) struct ProfilePage {
    store: RestaurantState,
    form: EditForm<RestaurantDraft>,
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilePage {
    pub fn new() -> Self {
        Self {
            store: RestaurantState::default(),
            form: EditForm::new().with_failure_message(update_failure_message),
        }
    }

    pub fn store(&self) -> &RestaurantState {
        &self.store
    }

    pub fn form(&self) -> &EditForm<RestaurantDraft> {
        &self.form
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_open()
    }

    /// Fetch the manager's restaurant into the store.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), String> {
        self.store.dispatch(RestaurantAction::SetLoading(true));
        let result = match api.get_restaurant_profile().await {
            Ok(restaurant) => {
                info!("Restaurant information loaded, id={}", restaurant.id);
                self.store.dispatch(RestaurantAction::SetRestaurantInfo(restaurant));
                Ok(())
            }
            Err(e) => {
                let message = e.message_or(LOAD_FAILED_MSG);
                error!("loading restaurant failed, {}", e);
                self.store.dispatch(RestaurantAction::SetError(message.clone()));
                Err(message)
            }
        };
        self.store.dispatch(RestaurantAction::SetLoading(false));
        result
    }

    /// Enter edit mode with a draft of the stored profile.
    pub fn edit(&mut self) -> bool {
        match &self.store.info {
            Some(info) => {
                self.form.open(Some(info));
                true
            }
            None => false,
        }
    }

    pub fn edit_field(&mut self, field: RestaurantField, raw: &str) -> bool {
        self.form.edit(field, raw)
    }

    /// Send the editable fields and adopt the returned copy.
    pub async fn save(&mut self, api: &ApiClient) -> SubmitOutcome {
        if self.store.info.is_none() || !self.form.is_open() {
            let message = ApiError::MissingEntity.to_string();
            warn!("{}", message);
            self.store.dispatch(RestaurantAction::SetError(message.clone()));
            return SubmitOutcome::Failed(message);
        }

        self.store.dispatch(RestaurantAction::SetLoading(true));
        let store = &mut self.store;
        let outcome = self
            .form
            .submit(api, |restaurant| {
                info!("Restaurant updated successfully");
                store.dispatch(RestaurantAction::UpdateRestaurantInfo(restaurant));
            })
            .await;
        if let SubmitOutcome::Failed(message) = &outcome {
            self.store.dispatch(RestaurantAction::SetError(message.clone()));
        }
        self.store.dispatch(RestaurantAction::SetLoading(false));
        outcome
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel(&mut self) {
        self.form.close();
        info!("Changes discarded");
    }
}
