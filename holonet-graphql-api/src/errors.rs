//! GraphQL error handling
//!
//! Every error that reaches a client carries a machine readable
//! `extensions.code`.

use async_graphql::{ErrorExtensions, ServerError};
use holonet_api_types::TypeResolutionError;
use holonet_storage::ServiceError;
use thiserror::Error;

pub const REQUEST_REJECTED: &str = "REQUEST_REJECTED";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const REFERENCE_ERROR: &str = "REFERENCE_ERROR";
pub const TYPE_RESOLUTION_ERROR: &str = "TYPE_RESOLUTION_ERROR";
pub const REPOSITORY_ERROR: &str = "REPOSITORY_ERROR";
/// Field failure raised by the executor itself rather than by a resolver
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Errors raised while serving a request
#[derive(Error, Debug)]
pub enum GraphQLError {
    /// A static check refused the document before execution
    #[error("{0}")]
    RequestRejected(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),
}

impl GraphQLError {
    pub fn code(&self) -> &'static str {
        match self {
            GraphQLError::RequestRejected(_) => REQUEST_REJECTED,
            GraphQLError::Service(ServiceError::Validation { .. }) => VALIDATION_ERROR,
            GraphQLError::Service(ServiceError::Reference { .. }) => REFERENCE_ERROR,
            GraphQLError::Service(ServiceError::Repository(_)) => REPOSITORY_ERROR,
            GraphQLError::TypeResolution(_) => TYPE_RESOLUTION_ERROR,
        }
    }

    /// Request level error with no location or path
    pub fn into_server_error(self) -> ServerError {
        let error = self.extend();
        let mut server_error = ServerError::new(error.message, None);
        server_error.extensions = error.extensions;
        server_error
    }
}

impl ErrorExtensions for GraphQLError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, extensions| extensions.set("code", self.code().to_string()))
    }
}

/// Convert a service failure into a field error
pub(crate) fn field_error(error: impl Into<GraphQLError>) -> async_graphql::Error {
    error.into().extend()
}

/// The executable schema cannot be built; the server must not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Malformed schema text: {0}")]
    MalformedSchema(String),

    #[error("Type {type_name} is declared in the schema but has no binding")]
    MissingType { type_name: String },

    #[error("Field {type_name}.{field} is declared in the schema but has no resolver")]
    UnboundField { type_name: String, field: String },

    #[error("Resolver {type_name}.{field} is not declared in the schema")]
    UndeclaredField { type_name: String, field: String },

    #[error("{location} is declared as {declared} but bound as {bound}")]
    TypeMismatch {
        location: String,
        declared: String,
        bound: String,
    },
}
