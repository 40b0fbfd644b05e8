//! Service wiring and logging setup

use anyhow::{Context, Result};
use holonet_config::{HolonetConfig, LogFormat, LoggingConfig};
use holonet_graphql_api::{build_schema, ExecutionEngine, GraphQLConfig, GraphQLContext};
use holonet_interfaces::RepositoryFactory;
use holonet_storage::InMemoryRepositoryFactory;
use std::sync::Arc;

/// Service container holding all application services
#[derive(Clone)]
pub struct ServiceContainer {
    pub repositories: Arc<dyn RepositoryFactory>,
    pub engine: Arc<ExecutionEngine>,
}

impl ServiceContainer {
    /// Build the stores, services and executable schema.
    ///
    /// Fails when the resolvers no longer match the schema contract.
    pub fn new(config: &HolonetConfig) -> Result<Self> {
        let repositories: Arc<dyn RepositoryFactory> = Arc::new(InMemoryRepositoryFactory::new());
        Self::with_repositories(config, repositories)
    }

    pub fn with_repositories(
        config: &HolonetConfig,
        repositories: Arc<dyn RepositoryFactory>,
    ) -> Result<Self> {
        let context = GraphQLContext::from_repositories(repositories.as_ref());
        let schema = build_schema(context, &graphql_config(config))
            .context("Failed to build the GraphQL schema")?;

        Ok(Self {
            repositories,
            engine: Arc::new(ExecutionEngine::new(schema)),
        })
    }
}

/// Execution settings for the GraphQL layer
pub fn graphql_config(config: &HolonetConfig) -> GraphQLConfig {
    let graphql = &config.graphql;
    GraphQLConfig {
        max_query_depth: graphql.max_query_depth,
        max_query_complexity: graphql.max_query_complexity,
        list_size_estimate: graphql.list_size_estimate,
        enable_introspection: graphql.enable_introspection,
        include_loader_statistics: graphql.include_loader_statistics,
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set, otherwise the configured level applies.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.level.as_str())
            .with_context(|| format!("Invalid log level '{}'", config.level.as_str()))?,
    };

    let (json, text) = match config.format {
        LogFormat::Json => (Some(fmt::layer().json().with_target(false)), None),
        LogFormat::Text => (None, Some(fmt::layer().with_target(false))),
    };

    // Use try_init to avoid panic if global subscriber already set
    if tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}
