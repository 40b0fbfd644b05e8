//! GraphQL execution configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Query limits and optional GraphQL surfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    /// Path the endpoint is mounted on
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Deepest accepted nesting of object selections
    #[serde(default = "default_max_query_depth")]
    pub max_query_depth: usize,

    /// Highest accepted static query cost
    #[serde(default = "default_max_query_complexity")]
    pub max_query_complexity: usize,

    /// Assumed element count of list-returning fields when costing a query
    #[serde(default = "default_list_size_estimate")]
    pub list_size_estimate: usize,

    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_introspection: bool,

    /// Serve the GraphQL playground on `GET <endpoint>`
    #[serde(default = "crate::domains::utils::default_false")]
    pub enable_playground: bool,

    /// Attach per-request batch loader statistics to `extensions.dataloader`
    #[serde(default = "crate::domains::utils::default_false")]
    pub include_loader_statistics: bool,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_query_depth: default_max_query_depth(),
            max_query_complexity: default_max_query_complexity(),
            list_size_estimate: default_list_size_estimate(),
            enable_introspection: true,
            enable_playground: false,
            include_loader_statistics: false,
        }
    }
}

impl Validatable for GraphQLConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.endpoint, "endpoint", self.domain_name())?;
        if !self.endpoint.starts_with('/') {
            return Err(self.validation_error("endpoint must start with '/'"));
        }
        let domain = self.domain_name();
        validate_positive(self.max_query_depth, "max_query_depth", domain)?;
        validate_positive(self.max_query_complexity, "max_query_complexity", domain)?;
        validate_positive(self.list_size_estimate, "list_size_estimate", domain)?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "graphql"
    }
}

fn default_endpoint() -> String {
    "/graphql".to_string()
}

fn default_max_query_depth() -> usize {
    13
}

fn default_max_query_complexity() -> usize {
    100
}

fn default_list_size_estimate() -> usize {
    5
}
