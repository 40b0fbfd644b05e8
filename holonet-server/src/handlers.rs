//! HTTP handlers

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::GraphQLRequest;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use holonet_graphql_api::{ExecutionEngine, ResultEnvelope};
use holonet_interfaces::RepositoryFactory;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::errors::{WebError, WebResult};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ExecutionEngine>,
    pub repositories: Arc<dyn RepositoryFactory>,
    /// Path the GraphQL endpoint is mounted on
    pub endpoint: String,
}

/// Execute one GraphQL request.
///
/// Malformed bodies are turned away by the extractor; a body without a
/// query never reaches the engine. Everything else is answered with 200 and
/// an envelope, whether or not it carries errors.
pub async fn graphql_handler(
    State(state): State<AppState>,
    request: GraphQLRequest,
) -> WebResult<Json<ResultEnvelope>> {
    let request = request.into_inner();
    if request.query.trim().is_empty() {
        return Err(WebError::bad_request(
            "Request body must contain a non-empty query",
        ));
    }

    Ok(Json(state.engine.execute(request).await))
}

/// GraphQL playground for development
pub async fn graphql_playground(State(state): State<AppState>) -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new(
        &state.endpoint,
    )))
}

/// Liveness of the process and its stores; 503 when a store fails its check
pub async fn health_handler(State(state): State<AppState>) -> WebResult<Json<Value>> {
    state
        .repositories
        .character_repository()
        .health_check()
        .await?;
    state
        .repositories
        .starship_repository()
        .health_check()
        .await?;

    Ok(Json(json!({
        "status": "ok",
        "service": "holonet",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
