//! Service layer sitting between front ends and the repository traits.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod search;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Form error: {0}")]
    Form(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
