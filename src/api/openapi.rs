//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, genres, health, tags};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Book catalog REST API: books, authors, genres and tags"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Reference data
        genres::list_genres,
        genres::get_genre,
        tags::list_tags,
        tags::get_tag,
    ),
    components(
        schemas(
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::genre::Genre,
            crate::models::tag::Tag,
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::api::MessageResponse,
            crate::api::AuthorResponse,
            crate::api::AuthorList,
            crate::api::BookResponse,
            crate::api::BookList,
            crate::api::GenreResponse,
            crate::api::GenreList,
            crate::api::TagResponse,
            crate::api::TagList,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book catalog management"),
        (name = "reference", description = "Genres and tags")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
