//! Storage layer for Holonet
//!
//! In-memory repositories implementing the `holonet-interfaces` contracts,
//! and the services that sit on top of them. The services own everything the
//! repositories do not: id assignment, reference validation and the
//! starship to pilot back-reference index.

pub mod error;
pub mod repositories;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{ServiceError, ServiceResult};
pub use repositories::{InMemoryRepository, InMemoryRepositoryFactory};
pub use services::{CharacterService, IdSequence, PilotIndex, StarshipService};
