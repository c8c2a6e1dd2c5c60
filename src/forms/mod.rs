//! Form definitions accepted by the search front ends.

use thiserror::Error;
use validator::ValidationErrors;

use crate::pagination::PageRequestError;

pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid page request: {0}")]
    InvalidPageRequest(#[from] PageRequestError),
}
