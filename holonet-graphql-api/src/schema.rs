//! GraphQL schema definition

use async_graphql::{EmptySubscription, Schema, SchemaBuilder};
use std::sync::Arc;
use tracing::info;

use crate::{
    context::{GraphQLConfig, GraphQLContext},
    errors::ConfigurationError,
    instrumentation::{
        BatchDispatch, InstrumentationChain, ListMultiplier, MaxQueryComplexity, MaxQueryDepth,
    },
    resolvers::{Mutation, Query},
    wiring::{SchemaContract, SCHEMA_CONTRACT},
};

/// The executable schema type
pub type StarWarsSchema = Schema<Query, Mutation, EmptySubscription>;

/// Bind the resolvers, without data or instrumentation
pub fn create_schema() -> SchemaBuilder<Query, Mutation, EmptySubscription> {
    Schema::build(Query, Mutation, EmptySubscription)
}

/// Build the executable schema against the bundled schema text
pub fn build_schema(
    context: GraphQLContext,
    config: &GraphQLConfig,
) -> Result<StarWarsSchema, ConfigurationError> {
    build_schema_with_contract(SCHEMA_CONTRACT, context, config)
}

/// Build the executable schema, refusing to do so when the resolvers do
/// not match `contract`
pub fn build_schema_with_contract(
    contract: &str,
    context: GraphQLContext,
    config: &GraphQLConfig,
) -> Result<StarWarsSchema, ConfigurationError> {
    let contract = SchemaContract::parse(contract)?;
    contract.verify(&create_schema().finish().sdl())?;

    let chain = InstrumentationChain::new(
        Arc::new(contract.registry().clone()),
        ListMultiplier::new(config.list_size_estimate),
    )
    .stage(MaxQueryComplexity::new(config.max_query_complexity))
    .stage(MaxQueryDepth::new(config.max_query_depth))
    .stage(
        BatchDispatch::new(context.characters.clone(), context.starships.clone())
            .with_statistics(config.include_loader_statistics),
    );
    info!(
        stages = ?chain.stage_names(),
        max_query_complexity = config.max_query_complexity,
        max_query_depth = config.max_query_depth,
        "Schema contract verified"
    );

    let mut builder = create_schema().data(context).extension(chain);
    if !config.enable_introspection {
        builder = builder.disable_introspection();
    }
    Ok(builder.finish())
}
