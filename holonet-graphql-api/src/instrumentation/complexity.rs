//! Query complexity ceiling

use tracing::warn;

use super::{Instrumentation, QueryShape};
use crate::errors::GraphQLError;

/// Rejects documents whose estimated cost exceeds the ceiling
#[derive(Debug, Clone, Copy)]
pub struct MaxQueryComplexity {
    ceiling: usize,
}

impl MaxQueryComplexity {
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling }
    }
}

impl Instrumentation for MaxQueryComplexity {
    fn name(&self) -> &'static str {
        "max-query-complexity"
    }

    fn check(&self, shape: &QueryShape) -> Result<(), GraphQLError> {
        if shape.complexity > self.ceiling {
            warn!(
                complexity = shape.complexity,
                ceiling = self.ceiling,
                "Rejecting query"
            );
            return Err(GraphQLError::RequestRejected(format!(
                "Query complexity {} exceeds the maximum of {}",
                shape.complexity, self.ceiling
            )));
        }
        Ok(())
    }
}
