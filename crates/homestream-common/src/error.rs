//! Common error types used throughout homestream.
//!
//! Every failure a stream request can hit before its response headers are
//! committed is represented here, along with the HTTP status it maps to.

/// Common error type for homestream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested file does not exist or is not a regular file.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The `Range` header is present but cannot be parsed.
    #[error("Malformed range: {0}")]
    MalformedRange(String),

    /// The requested range starts at or beyond the end of the resource.
    #[error("Range not satisfiable for resource of {size} bytes")]
    UnsatisfiableRange { size: u64 },

    /// The requested name would resolve outside the storage root.
    #[error("Path traversal rejected: {0}")]
    PathTraversal(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new MalformedRange error.
    pub fn malformed_range<S: Into<String>>(msg: S) -> Self {
        Self::MalformedRange(msg.into())
    }

    /// Create a new PathTraversal error.
    pub fn path_traversal<S: Into<String>>(msg: S) -> Self {
        Self::PathTraversal(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code this error is reported with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::MalformedRange(_) | Self::PathTraversal(_) | Self::InvalidInput(_) => 400,
            Self::UnsatisfiableRange { .. } => 416,
            Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::MalformedRange(_) => "malformed_range",
            Self::UnsatisfiableRange { .. } => "range_not_satisfiable",
            Self::PathTraversal(_) => "path_traversal",
            Self::InvalidInput(_) => "validation_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
