//! Business logic services

pub mod auth;
pub mod books;
pub mod loans;
pub mod students;
pub mod superadmins;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub superadmins: superadmins::SuperadminsService,
    pub students: students::StudentsService,
    pub books: books::BooksService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository. Fails on unusable JWT keys.
    pub fn new(repository: Repository, auth_config: &AuthConfig) -> AppResult<Self> {
        let tokens = auth::TokenService::new(auth_config)?;
        Ok(Self {
            superadmins: superadmins::SuperadminsService::new(repository.clone(), tokens),
            students: students::StudentsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            repository,
        })
    }
}
