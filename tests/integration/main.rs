//! Integration tests: store behavior on an in-memory database and the HTTP
//! surface driven through the router.

mod api_tests;
mod common;
