//! Query depth ceiling

use tracing::warn;

use super::{Instrumentation, QueryShape};
use crate::errors::GraphQLError;

/// Rejects documents nested deeper than the ceiling
#[derive(Debug, Clone, Copy)]
pub struct MaxQueryDepth {
    ceiling: usize,
}

impl MaxQueryDepth {
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling }
    }
}

impl Instrumentation for MaxQueryDepth {
    fn name(&self) -> &'static str {
        "max-query-depth"
    }

    fn check(&self, shape: &QueryShape) -> Result<(), GraphQLError> {
        if shape.depth > self.ceiling {
            warn!(
                depth = shape.depth,
                ceiling = self.ceiling,
                "Rejecting query"
            );
            return Err(GraphQLError::RequestRejected(format!(
                "Query depth {} exceeds the maximum of {}",
                shape.depth, self.ceiling
            )));
        }
        Ok(())
    }
}
