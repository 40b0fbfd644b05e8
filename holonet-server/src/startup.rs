//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use holonet_config::HolonetConfig;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{graphql_handler, graphql_playground, health_handler, AppState};
use crate::services::ServiceContainer;

/// Server application struct
pub struct Server {
    config: HolonetConfig,
    services: ServiceContainer,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: HolonetConfig) -> Result<Self> {
        // Initialize logging first
        crate::services::init_logging(&config.logging)?;

        let services = ServiceContainer::new(&config)?;
        Ok(Self { config, services })
    }

    /// Use already built services
    pub fn with_services(config: HolonetConfig, services: ServiceContainer) -> Self {
        Self { config, services }
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        let graphql = &self.config.graphql;
        let state = AppState {
            engine: self.services.engine.clone(),
            repositories: self.services.repositories.clone(),
            endpoint: graphql.endpoint.clone(),
        };

        let endpoint = if graphql.enable_playground {
            post(graphql_handler).get(graphql_playground)
        } else {
            post(graphql_handler)
        };

        let mut app = Router::new()
            .route(&graphql.endpoint, endpoint)
            .route("/health", get(health_handler))
            .with_state(state);

        if self.config.server.enable_tracing {
            app = app.layer(TraceLayer::new_for_http());
        }

        if self.config.server.enable_cors {
            app = app.layer(CorsLayer::permissive());
        }

        app
    }

    /// Start the server and run until a shutdown signal arrives
    pub async fn start(self) -> Result<()> {
        let app = self.build_app();
        let addr = self.config.server.socket_address();

        self.log_config_summary();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn log_config_summary(&self) {
        let enabled = |flag: bool| if flag { "Enabled" } else { "Disabled" };
        let graphql = &self.config.graphql;

        tracing::info!("=== Holonet Server Configuration ===");
        tracing::info!("Bind Address: {}", self.config.server.socket_address());
        tracing::info!("GraphQL Endpoint: POST {}", graphql.endpoint);
        tracing::info!(
            "Query Limits: complexity {} / depth {}",
            graphql.max_query_complexity,
            graphql.max_query_depth
        );
        tracing::info!("Introspection: {}", enabled(graphql.enable_introspection));
        tracing::info!("CORS: {}", enabled(self.config.server.enable_cors));
        tracing::info!("Tracing: {}", enabled(self.config.server.enable_tracing));

        if graphql.enable_playground {
            tracing::info!(
                "GraphQL Playground: http://{}{}",
                self.config.server.socket_address(),
                graphql.endpoint
            );
        }
    }
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
