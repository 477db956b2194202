use thiserror::Error;

/// Error types for the flavor-constraints library.
#[derive(Error, Debug)]
pub enum FlavorError {
    /// A parameter name was never registered, or has no constraint.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input data is internally inconsistent (e.g. a correlation matrix that
    /// stays non-positive-definite after repair, or a malformed table row).
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// A distribution or constraint was constructed with invalid arguments.
    #[error("Validation error: {0}")]
    Validation(String),

    /// `add_constraint` was called for a name that is already constrained.
    #[error("Parameter already constrained: {0}")]
    AlreadyConstrained(String),

    /// Malformed value/error specification string.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error indicating a mismatch in matrix or vector dimensions.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for flavor-constraints operations.
pub type Result<T> = std::result::Result<T, FlavorError>;

impl FlavorError {
    pub(crate) fn not_found(name: &str) -> Self {
        FlavorError::NotFound(format!("parameter '{}'", name))
    }
}
