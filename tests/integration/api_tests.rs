//! API integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use bookshelf_server::models::{genre::CreateGenre, tag::CreateTag};

use crate::common::{self, send};

#[tokio::test]
async fn test_health_check() {
    let app = common::app().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_book_lifecycle() {
    let services = common::services().await;
    let genre = services
        .catalog
        .create_genre(CreateGenre {
            name: "G1".to_string(),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(genre.id, 1);
    let app = common::router(services);

    let (status, body) = send(&app, Method::POST, "/api/authors", Some(json!({ "name": "A1" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "B1", "author_ids": [1], "genre_ids": [1] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book = &body["data"];
    let book_id = book["id"].as_i64().unwrap();
    assert_eq!(book["title"], "B1");
    assert_eq!(book["authors"].as_array().unwrap().len(), 1);
    assert_eq!(book["authors"][0]["id"], 1);
    assert_eq!(book["authors"][0]["name"], "A1");
    assert_eq!(book["genres"][0]["id"], 1);
    assert_eq!(book["genres"][0]["name"], "G1");
    assert_eq!(book["tags"], json!([]));

    let uri = format!("/api/books/{}", book_id);
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "tag_ids": [] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["authors"][0]["name"], "A1");
    assert_eq!(body["data"]["genres"][0]["name"], "G1");
    assert_eq!(body["data"]["tags"], json!([]));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_required_fields() {
    let app = common::app().await;

    let (status, body) = send(&app, Method::POST, "/api/authors", Some(json!({ "country": "France" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::POST, "/api/authors", Some(json!({ "name": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/api/books", Some(json!({ "isbn": "123" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_duplicates_conflict() {
    let app = common::app().await;

    let author = json!({ "name": "Victor Hugo", "country": "France" });
    let (status, _) = send(&app, Method::POST, "/api/authors", Some(author.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::POST, "/api/authors", Some(author)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let book = json!({ "title": "Les Miserables", "isbn": "9780451419439" });
    let (status, _) = send(&app, Method::POST, "/api/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Notre-Dame de Paris", "isbn": "9780451419439" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let app = common::app().await;

    let (_, body) = send(&app, Method::POST, "/api/authors", Some(json!({ "name": "Emile Zola" }))).await;
    let author_id = body["data"]["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Germinal", "author_ids": [author_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/authors/{}", author_id);
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("1 book"));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_author_partially() {
    let app = common::app().await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/authors",
        Some(json!({ "name": "Gustave Flaubert", "biography": "Realist", "country": "France" })),
    )
    .await;
    let uri = format!("/api/authors/{}", body["data"]["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "biography": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gustave Flaubert");
    assert_eq!(body["data"]["country"], "France");
    assert!(body["data"]["biography"].is_null());

    let (status, _) = send(&app, Method::PUT, "/api/authors/999", Some(json!({ "country": "Belgium" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_link_target_is_rejected() {
    let app = common::app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Ghost", "author_ids": [404] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Author 404 does not exist");

    let (_, body) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_reference_data_lists() {
    let services = common::services().await;
    for name in ["Poetry", "Drama"] {
        services
            .catalog
            .create_genre(CreateGenre {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap();
    }
    services
        .catalog
        .create_tag(CreateTag {
            name: "classic".to_string(),
        })
        .await
        .unwrap();
    let app = common::router(services);

    let (status, body) = send(&app, Method::GET, "/api/genres", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "Drama");
    assert_eq!(body["data"][1]["name"], "Poetry");

    let (status, body) = send(&app, Method::GET, "/api/tags", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let tag_id = body["data"][0]["id"].as_i64().unwrap();
    let (status, body) = send(&app, Method::GET, &format!("/api/tags/{}", tag_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "classic");

    let (status, _) = send(&app, Method::GET, "/api/genres/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = common::app().await;

    let (status, body) = send(&app, Method::GET, "/api/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_padded_isbn_is_trimmed_before_length_check() {
    let app = common::app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "The Brothers Karamazov", "isbn": " 9780374528379 " })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["isbn"], "9780374528379");

    let uri = format!("/api/books/{}", body["data"]["id"]);
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "isbn": "  9780374528370  " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isbn"], "9780374528370");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "isbn": "97803745283701" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_body_carries_code() {
    let app = common::app().await;

    let (status, body) = send(&app, Method::GET, "/api/authors/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 20);

    let (status, body) = send(&app, Method::POST, "/api/books", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
}

#[tokio::test]
async fn test_openapi_documents_response_envelopes() {
    let app = common::app().await;

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);

    let schema = |path: &str, method: &str, code: &str| {
        doc["paths"][path][method]["responses"][code]["content"]["application/json"]["schema"].clone()
    };

    assert_eq!(schema("/authors", "get", "200")["$ref"], "#/components/schemas/AuthorList");
    assert_eq!(schema("/books/{id}", "get", "200")["$ref"], "#/components/schemas/BookResponse");

    let schemas = &doc["components"]["schemas"];
    let list = &schemas["AuthorList"]["properties"];
    assert!(list["success"].is_object(), "{list}");
    assert!(list["count"].is_object(), "{list}");
    assert_eq!(list["data"]["type"], "array");
    let single = &schemas["BookResponse"]["properties"];
    assert!(single["success"].is_object(), "{single}");
    assert!(single["data"].is_object(), "{single}");

    let deleted = schema("/books/{id}", "delete", "200");
    assert_eq!(deleted["$ref"], "#/components/schemas/MessageResponse");
}
