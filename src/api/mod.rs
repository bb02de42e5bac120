//! API handlers for Bookshelf REST endpoints

pub mod authors;
pub mod books;
pub mod genres;
pub mod health;
pub mod openapi;
pub mod tags;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{Author, BookDetails, Genre, Tag},
    AppState,
};

/// JSON body extractor whose rejections use the application error envelope.
///
/// A body missing a required field is reported as a validation error.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// Success envelope carrying one entity
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    AuthorResponse = DataResponse<Author>,
    BookResponse = DataResponse<BookDetails>,
    GenreResponse = DataResponse<Genre>,
    TagResponse = DataResponse<Tag>
)]
pub struct DataResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Always `true`
    pub success: bool,
    pub data: T,
    /// Set on writes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> DataResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Success envelope carrying a list
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    AuthorList = ListResponse<Author>,
    BookList = ListResponse<BookDetails>,
    GenreList = ListResponse<Genre>,
    TagList = ListResponse<Tag>
)]
pub struct ListResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Always `true`
    pub success: bool,
    pub data: Vec<T>,
    /// Number of elements in `data`
    pub count: usize,
}

impl<T> ListResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Success envelope without payload
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Always `true`
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        // Reference data
        .route("/genres", get(genres::list_genres))
        .route("/genres/:id", get(genres::get_genre))
        .route("/tags", get(tags::list_tags))
        .route("/tags/:id", get(tags::get_tag))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
