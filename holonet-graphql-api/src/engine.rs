//! Execution engine
//!
//! Runs a request against the executable schema and always produces a
//! `{ data, errors }` envelope. Parse failures, validation failures and
//! static rejections come back with `data: null`. Field failures come back
//! next to whatever data could still be resolved, with an explicit `null`
//! at the path of every failed field.

use async_graphql::{PathSegment, Request, Response, ServerError, Variables};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::errors::{INTERNAL_ERROR, VALIDATION_ERROR};
use crate::schema::StarWarsSchema;

/// JSON body of a GraphQL request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLPayload {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub variables: Option<Value>,
    #[serde(default)]
    pub operation_name: Option<String>,
}

impl GraphQLPayload {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

impl From<GraphQLPayload> for Request {
    fn from(payload: GraphQLPayload) -> Self {
        let mut request = Request::new(payload.query);
        if let Some(variables) = payload.variables {
            request = request.variables(Variables::from_json(variables));
        }
        if let Some(name) = payload.operation_name {
            request = request.operation_name(name);
        }
        request
    }
}

/// Result of one execution, as sent to the client
#[derive(Debug, Serialize)]
pub struct ResultEnvelope {
    pub data: Value,
    pub errors: Vec<ServerError>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
}

impl ResultEnvelope {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Codes of all errors, in order
    pub fn error_codes(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter_map(|error| error.extensions.as_ref()?.get("code"))
            .map(|code| match code {
                async_graphql::Value::String(code) => code.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

impl From<Response> for ResultEnvelope {
    fn from(response: Response) -> Self {
        let mut data = response.data.into_json().unwrap_or(Value::Null);
        let extensions = response
            .extensions
            .into_iter()
            .filter_map(|(name, value)| Some((name, value.into_json().ok()?)))
            .collect();

        // Execution dropped the keys of failed nullable fields
        if data.is_null() && response.errors.iter().any(|error| !error.path.is_empty()) {
            data = Value::Object(Map::new());
        }
        for error in &response.errors {
            null_at(&mut data, &error.path);
        }

        let errors = response
            .errors
            .into_iter()
            .map(|mut error| {
                let fallback = if error.path.is_empty() {
                    // Parse and validation errors come from async-graphql without a code
                    VALIDATION_ERROR
                } else {
                    INTERNAL_ERROR
                };
                let extensions = error.extensions.get_or_insert_with(Default::default);
                if extensions.get("code").is_none() {
                    extensions.set("code", fallback.to_string());
                }
                error
            })
            .collect();

        Self {
            data,
            errors,
            extensions,
        }
    }
}

/// Write `null` at `path` unless a value is already there
fn null_at(data: &mut Value, path: &[PathSegment]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut node = data;
    for segment in parents {
        let child = match (segment, node) {
            (PathSegment::Field(name), Value::Object(fields)) => fields.get_mut(name),
            (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index),
            _ => None,
        };
        match child {
            Some(child) => node = child,
            // A parent already collapsed to null
            None => return,
        }
    }

    if let (PathSegment::Field(name), Value::Object(fields)) = (last, node) {
        fields.entry(name.clone()).or_insert(Value::Null);
    }
}

pub struct ExecutionEngine {
    schema: StarWarsSchema,
}

impl ExecutionEngine {
    pub fn new(schema: StarWarsSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &StarWarsSchema {
        &self.schema
    }

    pub async fn execute(&self, request: impl Into<Request>) -> ResultEnvelope {
        let request = request.into();
        debug!(operation = ?request.operation_name, "Executing GraphQL request");

        let envelope = ResultEnvelope::from(self.schema.execute(request).await);
        if !envelope.is_ok() {
            warn!(
                errors = envelope.errors.len(),
                codes = ?envelope.error_codes(),
                "GraphQL request finished with errors"
            );
        }
        envelope
    }
}
