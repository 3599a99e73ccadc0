//! Error types for behavior analysis
//!
//! Only integration bugs are errors. Problems in user-authored behavior text
//! are [`crate::Diagnostic`]s.

use dfd_model::GraphError;

/// Precondition violations by the caller
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BehaviorError {
    /// Symbol table could not be derived from the diagram graph
    #[error("port context unavailable: {0}")]
    Graph(#[from] GraphError),

    /// A custom port context could not resolve its port
    #[error("port context unavailable: {0}")]
    Context(String),
}

impl BehaviorError {
    /// Create context error
    pub fn context(message: impl Into<String>) -> Self {
        Self::Context(message.into())
    }
}

/// Result type alias for behavior operations
pub type BehaviorResult<T> = Result<T, BehaviorError>;
