//! Testing utilities for holonet-storage
//!
//! Mock repositories built with mockall. Enable the `testing` feature to use
//! them from another crate:
//!
//! ```toml
//! [dev-dependencies]
//! holonet-storage = { features = ["testing"] }
//! ```

pub mod mocks;

pub use mocks::{MockCharacterRepo, MockStarshipRepo};
