//! In-process backend used by tests

use std::sync::{Arc, Mutex};
use std::time::Duration;
use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use reqwest::Url;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Behavior {
    /// echo request bodies back as saved entities
    Echo,
    /// answer every call with this status and optional `message` body
    Fail {
        status: u16,
        message: Option<&'static str>,
    },
    /// echo, but only after a delay
    Slow(Duration),
}

#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

struct StubState {
    behavior: Behavior,
    calls: Mutex<Vec<Call>>,
}

pub(crate) struct StubBackend {
    pub base: Url,
    state: Arc<StubState>,
    handle: ServerHandle,
}

impl StubBackend {
    pub async fn start(behavior: Behavior) -> Self {
        let state = Arc::new(StubState {
            behavior,
            calls: Mutex::new(Vec::new()),
        });
        let data = web::Data::from(state.clone());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(dispatch))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("failed to bind stub backend");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base: Url::parse(&format!("http://{}", addr)).expect("invalid stub url"),
            state,
            handle,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn restaurant() -> Value {
    json!({
        "_id": "r-1",
        "name": "Noodle Bar",
        "description": "Hand pulled noodles",
        "tags": ["Chinese"],
        "address": "1 Main St",
        "phone": "555-0100",
        "createdAt": "2024-05-01T10:00:00Z",
    })
}

async fn dispatch(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.calls.lock().unwrap().push(Call {
        method: req.method().to_string(),
        path: req.path().to_string(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    match state.behavior {
        Behavior::Fail { status, message } => {
            let status = StatusCode::from_u16(status).unwrap();
            return match message {
                Some(message) => HttpResponse::build(status).json(json!({ "message": message })),
                None => HttpResponse::build(status).finish(),
            };
        }
        Behavior::Slow(delay) => actix_web::rt::time::sleep(delay).await,
        Behavior::Echo => {}
    }

    let segments = req.path().trim_matches('/').split('/').collect::<Vec<_>>();
    match (req.method().as_str(), segments.as_slice()) {
        ("POST", ["menu"]) => HttpResponse::Created().json(with_id(body, "id", "m-new")),
        ("PUT", ["menu", id]) => HttpResponse::Ok().json(with_id(body, "id", id)),
        ("GET", ["restaurant", "manager"]) if authorization.is_some() => HttpResponse::Ok().json(restaurant()),
        ("GET", ["restaurant", "manager"]) => HttpResponse::Unauthorized().json(json!({ "message": "Unauthorized" })),
        ("PUT", ["restaurant", id]) => {
            let mut merged = restaurant();
            if let (Some(target), Value::Object(fields)) = (merged.as_object_mut(), body) {
                target.extend(fields);
                target.insert("_id".to_string(), json!(id));
                target.insert("updatedAt".to_string(), json!("2024-06-01T08:30:00Z"));
            }
            HttpResponse::Ok().json(merged)
        }
        _ => HttpResponse::NotFound().json(json!({ "message": "Not found" })),
    }
}

fn with_id(mut body: Value, key: &str, id: &str) -> Value {
    if let Some(fields) = body.as_object_mut() {
        fields.insert(key.to_string(), json!(id));
    }
    body
}
