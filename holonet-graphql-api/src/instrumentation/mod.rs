//! Instrumentation chain
//!
//! An ordered list of stages installed into async-graphql as one extension.
//! Stages can decorate the incoming request, veto the document once it has
//! passed schema validation, and post-process the response. Vetoes run in
//! stage order and all of them happen before any resolver is invoked.

pub mod analysis;
pub mod complexity;
pub mod depth;
pub mod dispatch;

pub use analysis::{FieldComplexity, FieldRef, ListMultiplier, QueryAnalyzer, QueryShape};
pub use complexity::MaxQueryComplexity;
pub use depth::MaxQueryDepth;
pub use dispatch::BatchDispatch;

use async_graphql::extensions::{
    Extension, ExtensionContext, ExtensionFactory, NextExecute, NextParseQuery,
    NextPrepareRequest, NextValidation,
};
use async_graphql::parser::types::ExecutableDocument;
use async_graphql::{Request, Response, ServerError, ServerResult, ValidationResult, Variables};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::errors::GraphQLError;
use crate::wiring::TypeRegistry;

/// One stage of the chain
pub trait Instrumentation: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn prepare_request(&self, request: Request) -> Request {
        request
    }

    /// Refuse the document before execution starts
    fn check(&self, _shape: &QueryShape) -> Result<(), GraphQLError> {
        Ok(())
    }

    fn finish(&self, _ctx: &ExtensionContext<'_>, response: Response) -> Response {
        response
    }
}

/// Extension factory running every stage for every request
pub struct InstrumentationChain {
    analyzer: Arc<QueryAnalyzer>,
    stages: Vec<Arc<dyn Instrumentation>>,
}

impl InstrumentationChain {
    pub fn new(registry: Arc<TypeRegistry>, cost: impl FieldComplexity) -> Self {
        Self {
            analyzer: Arc::new(QueryAnalyzer::new(registry, Arc::new(cost))),
            stages: Vec::new(),
        }
    }

    /// Append a stage; stages run in the order they are added
    pub fn stage(mut self, stage: impl Instrumentation) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}

impl ExtensionFactory for InstrumentationChain {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(ChainExtension {
            analyzer: self.analyzer.clone(),
            stages: self.stages.clone(),
            operation_name: OnceLock::new(),
            document: OnceLock::new(),
        })
    }
}

/// Per-request state of the chain
struct ChainExtension {
    analyzer: Arc<QueryAnalyzer>,
    stages: Vec<Arc<dyn Instrumentation>>,
    operation_name: OnceLock<Option<String>>,
    document: OnceLock<ExecutableDocument>,
}

#[async_trait::async_trait]
impl Extension for ChainExtension {
    async fn prepare_request(
        &self,
        ctx: &ExtensionContext<'_>,
        request: Request,
        next: NextPrepareRequest<'_>,
    ) -> ServerResult<Request> {
        let _ = self.operation_name.set(request.operation_name.clone());
        let request = self
            .stages
            .iter()
            .fold(request, |request, stage| stage.prepare_request(request));
        next.run(ctx, request).await
    }

    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let document = next.run(ctx, query, variables).await?;
        let _ = self.document.set(document.clone());
        Ok(document)
    }

    async fn validation(
        &self,
        ctx: &ExtensionContext<'_>,
        next: NextValidation<'_>,
    ) -> Result<ValidationResult, Vec<ServerError>> {
        let result = next.run(ctx).await?;

        if let Some(document) = self.document.get() {
            let operation_name = self.operation_name.get().and_then(|name| name.as_deref());
            let shape = self.analyzer.analyze(document, operation_name);
            debug!(
                depth = shape.depth,
                complexity = shape.complexity,
                "Analysed query"
            );

            for stage in &self.stages {
                stage
                    .check(&shape)
                    .map_err(|error| vec![error.into_server_error()])?;
            }
        }

        Ok(result)
    }

    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        let response = next.run(ctx, operation_name).await;
        self.stages
            .iter()
            .fold(response, |response, stage| stage.finish(ctx, response))
    }
}
