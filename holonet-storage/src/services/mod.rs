//! Domain services wrapping the repositories

pub mod character;
pub mod ids;
pub mod pilots;
pub mod starship;

pub use character::CharacterService;
pub use ids::IdSequence;
pub use pilots::PilotIndex;
pub use starship::StarshipService;
