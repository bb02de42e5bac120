//! Shared fixtures

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use bookshelf_server::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository::{database, Repository},
    services::Services,
    AppState,
};

/// Fresh, empty, schema-initialized store
pub async fn repository() -> Repository {
    let database = database::connect_in_memory().await.expect("in-memory database");
    let repository = Repository::new(database);
    repository.initialize(false).await.expect("schema");
    repository
}

/// Schema-initialized store in a database file under `dir`, with the
/// default pool settings
pub async fn file_repository(dir: &tempfile::TempDir) -> Repository {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("catalog.db").display()),
        ..Default::default()
    };
    let database = database::connect(&config).await.expect("file database");
    let repository = Repository::new(database);
    repository.initialize(false).await.expect("schema");
    repository
}

/// Router over a fresh store
pub async fn app() -> Router {
    router(services().await)
}

pub async fn services() -> Services {
    Services::new(repository().await)
}

pub fn router(services: Services) -> Router {
    api::router(AppState::new(AppConfig::default(), services))
}

/// Send one request and decode the JSON response body
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}
