//! GraphQL resolvers

pub mod mutation;
pub mod query;
pub mod relations;

pub use mutation::Mutation;
pub use query::Query;
