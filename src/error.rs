use thiserror::Error;

/// Errors raised by the debt graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("member '{0}' not found")]
    MemberNotFound(String),
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Errors from reading or writing intent documents and snapshots.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
