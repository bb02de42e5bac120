//! Business logic services

pub mod authors;
pub mod catalog;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub catalog: catalog::CatalogService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn check_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
