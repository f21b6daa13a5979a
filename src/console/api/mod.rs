//! REST client for the restaurant backend

pub(crate) mod error;
#[cfg(test)]
pub(crate) mod stub;

use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use crate::console::api::error::ApiError;
use crate::console::controller::form::Gateway;
use crate::console::model::menu_item::{MenuItem, MenuItemDraft};
use crate::console::model::restaurant::{Restaurant, RestaurantDraft};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub(crate) struct ApiClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base: Url, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base,
            token,
        }
    }

    /// `POST /menu`
    pub async fn create_menu_item(&self, draft: &MenuItemDraft) -> Result<MenuItem, ApiError> {
        let url = self.endpoint(&["menu"])?;
        self.send(self.http.post(url).json(draft)).await
    }

    /// `PUT /menu/{id}`
    pub async fn update_menu_item(&self, id: &str, draft: &MenuItemDraft) -> Result<MenuItem, ApiError> {
        let url = self.endpoint(&["menu", id])?;
        self.send(self.http.put(url).json(draft)).await
    }

    /// `GET /restaurant/manager`, the restaurant owned by the token's manager
    pub async fn get_restaurant_profile(&self) -> Result<Restaurant, ApiError> {
        let url = self.endpoint(&["restaurant", "manager"])?;
        self.send(self.http.get(url)).await
    }

    /// `PUT /restaurant/{id}` with only the editable profile fields
    pub async fn update_restaurant_profile(&self, id: &str, partial: &RestaurantDraft) -> Result<Restaurant, ApiError> {
        let url = self.endpoint(&["restaurant", id])?;
        self.send(self.http.put(url).json(partial)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport {
                message: format!("invalid api base url {}", self.base),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let res = req.send().await?;
        let status = res.status();
        debug!("{} {}", status, res.url());
        if status.is_success() {
            return Ok(res.json::<T>().await?);
        }

        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        warn!("request failed with status={}, message={:?}", status, message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl Gateway<MenuItemDraft> for ApiClient {
    async fn create(&self, draft: &MenuItemDraft) -> Result<MenuItem, ApiError> {
        self.create_menu_item(draft).await
    }

    async fn update(&self, id: &str, draft: &MenuItemDraft) -> Result<MenuItem, ApiError> {
        self.update_menu_item(id, draft).await
    }
}

impl Gateway<RestaurantDraft> for ApiClient {
    /// Restaurants are created through onboarding, never from the profile editor.
    async fn create(&self, _: &RestaurantDraft) -> Result<Restaurant, ApiError> {
        Err(ApiError::MissingEntity)
    }

    async fn update(&self, id: &str, partial: &RestaurantDraft) -> Result<Restaurant, ApiError> {
        self.update_restaurant_profile(id, partial).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::api::stub::{Behavior, StubBackend};
    use crate::console::model::draft::Draft;

    #[actix_web::test]
    async fn create_and_update_menu_item() {
        let backend = StubBackend::start(Behavior::Echo).await;
        let api = ApiClient::new(backend.base.clone(), Some("tok".to_string()));

        let draft = MenuItemDraft {
            name: "Dumplings".to_string(),
            price: 8.0,
            ..MenuItemDraft::defaults()
        };
        let created = api.create_menu_item(&draft).await.unwrap();
        assert_eq!(created.id, "m-new");
        assert_eq!(created.name, "Dumplings");

        let updated = api.update_menu_item("m-7", &draft).await.unwrap();
        assert_eq!(updated.id, "m-7");

        let calls = backend.calls();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "/menu");
        assert_eq!(calls[0].body["imageUrl"], draft.image_url);
        assert_eq!(calls[1].method, "PUT");
        assert_eq!(calls[1].path, "/menu/m-7");
        assert!(calls.iter().all(|c| c.authorization.as_deref() == Some("Bearer tok")));
        backend.stop().await;
    }

    #[actix_web::test]
    async fn profile_requires_token() {
        let backend = StubBackend::start(Behavior::Echo).await;

        let anonymous = ApiClient::new(backend.base.clone(), None);
        let err = anonymous.get_restaurant_profile().await.unwrap_err();
        assert_eq!(err.status_code().map(|s| s.as_u16()), Some(401));
        assert_eq!(err.to_string(), "Unauthorized");

        let api = ApiClient::new(backend.base.clone(), Some("tok".to_string()));
        let restaurant = api.get_restaurant_profile().await.unwrap();
        assert_eq!(restaurant.id, "r-1");
        backend.stop().await;
    }

    #[actix_web::test]
    async fn failure_carries_server_message() {
        let backend = StubBackend::start(Behavior::Fail {
            status: 400,
            message: Some("Item already exists"),
        })
        .await;
        let api = ApiClient::new(backend.base.clone(), Some("tok".to_string()));
        let err = api
            .create_menu_item(&MenuItemDraft::defaults())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
        assert_eq!(err.to_string(), "Item already exists");
        backend.stop().await;
    }

    #[actix_web::test]
    async fn unreachable_backend_is_transport_error() {
        // nothing listens on the discard port
        let api = ApiClient::new(Url::parse("http://127.0.0.1:9").unwrap(), None);
        let err = api.get_restaurant_profile().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[test]
    fn endpoint_keeps_base_path_and_escapes_ids() {
        let api = ApiClient::new(Url::parse("http://localhost:3005/api/").unwrap(), None);
        assert_eq!(
            api.endpoint(&["menu", "a b"]).unwrap().as_str(),
            "http://localhost:3005/api/menu/a%20b"
        );
    }
}
