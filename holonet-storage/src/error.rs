//! Service error types

use holonet_api_types::EntityId;
use holonet_interfaces::RepositoryError;
use thiserror::Error;

/// Service result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised by the domain services
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// Input is well formed but breaks a domain rule
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Input points at an entity that does not exist
    #[error("{entity} {id} does not exist")]
    Reference { entity: &'static str, id: EntityId },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
