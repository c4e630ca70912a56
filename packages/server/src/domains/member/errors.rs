use thiserror::Error;

use crate::domains::member::validation::FieldErrors;
use crate::kernel::StoreError;

/// Why a registration attempt did not produce a member
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// One or more fields broke a validation rule; the store was not touched
    #[error("Validation failed: {0}")]
    FieldValidation(FieldErrors),

    #[error("Email address {0} is already registered.")]
    DuplicateEmail(String),

    /// Store unavailable or any other failure the caller cannot fix
    #[error("Unexpected registration failure: {0}")]
    Unexpected(#[source] StoreError),
}

impl From<StoreError> for RegistrationError {
    fn from(error: StoreError) -> Self {
        match error {
            // A unique-index rejection is a business conflict, not a fault
            StoreError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            other => Self::Unexpected(other),
        }
    }
}
