//! Domain-specific configuration modules

pub mod graphql;
pub mod logging;
pub mod server;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Holonet configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HolonetConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// Query execution limits and GraphQL surface toggles
    #[serde(default)]
    pub graphql: graphql::GraphQLConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl HolonetConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.graphql.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = HolonetConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses_back() {
        let sample = HolonetConfig::generate_sample();
        let parsed: HolonetConfig = serde_yaml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.port, 8080);
        assert!(parsed.validate_all().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let parsed: HolonetConfig =
            serde_yaml::from_str("graphql:\n  max_query_depth: 20\n").unwrap();
        assert_eq!(parsed.graphql.max_query_depth, 20);
        assert_eq!(parsed.graphql.max_query_complexity, 100);
        assert_eq!(parsed.server.bind_address, "0.0.0.0");
    }
}
