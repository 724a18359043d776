//! Error types for fasttext-query

use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::QueryKind;

/// Coarse classification of a [`FastTextError`].
///
/// Callers branch on this instead of matching message strings, e.g. to decide
/// whether reopening the model or retrying the query makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Model file missing or unloadable, or the handle is closed
    Resource,
    /// Engine response did not match the expected record schema
    Decode,
    /// Vector arithmetic on embeddings of different dimensionality
    DimensionMismatch,
    /// Similarity requested for a zero vector
    DegenerateInput,
    /// Argument rejected before reaching the engine
    InvalidInput,
}

/// Errors that can occur while querying a model
#[derive(Debug, Error)]
pub enum FastTextError {
    /// Model file does not exist
    #[error("Model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Engine refused to load the model file
    #[error("Failed to load model {}: {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// Query issued through a handle that was already closed
    #[error("Model handle is closed: {}", .0.display())]
    HandleClosed(PathBuf),

    /// Query argument cannot cross the C boundary
    #[error("Invalid query {query:?}: {reason}")]
    InvalidQuery { query: String, reason: String },

    /// Response text did not decode into the expected records
    #[error("Failed to decode {kind} response for {query}: {reason} (response: {excerpt:?})")]
    Decode {
        kind: QueryKind,
        query: String,
        reason: String,
        excerpt: String,
    },

    /// Engine returned no response buffer at all
    #[error("Engine returned no response for {kind} {query}")]
    EmptyResponse { kind: QueryKind, query: String },

    /// Vectors of unequal length
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Zero-norm vector in a similarity computation
    #[error("Similarity undefined for zero vector: {0}")]
    DegenerateInput(String),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl FastTextError {
    /// Create a model load error
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid query error
    pub fn invalid_query(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            query: query.into(),
            reason: reason.into(),
        }
    }

    /// Create a degenerate input error
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ModelNotFound(_)
            | Self::ModelLoad { .. }
            | Self::HandleClosed(_)
            | Self::InvalidPath(_) => ErrorKind::Resource,
            Self::Decode { .. } | Self::EmptyResponse { .. } => ErrorKind::Decode,
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::DegenerateInput(_) => ErrorKind::DegenerateInput,
            Self::InvalidQuery { .. } => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, FastTextError>;
