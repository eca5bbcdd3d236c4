//! Error types for the triage pipeline.
//!
//! This module defines the error types that can occur while loading images,
//! validating requests, and running the triage pipeline, along with utility
//! constructors for creating errors with appropriate context.

use std::path::Path;
use thiserror::Error;

/// Enum representing the errors that can occur in the triage pipeline.
///
/// Per-image failures (missing files, undecodable images) are recovered
/// locally by the pipeline into `invalid` predictions and never surface to
/// the caller; only request-level errors propagate out of
/// [`classify_batch`](crate::pipeline::TriageEngine::classify_batch).
#[derive(Error, Debug)]
pub enum TriageError {
    /// Error occurred while decoding an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// The path does not resolve to an existing file.
    #[error("file not found: {path}")]
    PathNotFound {
        /// The path that failed to resolve.
        path: String,
    },

    /// The request never had valid work to dispatch (empty path list,
    /// engine not ready). Rejects the whole request rather than producing
    /// a degenerate batch result.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// A message describing the invalid request.
        message: String,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl TriageError {
    /// Creates a request-level error from a message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates an error for a path that does not resolve to a file.
    pub fn path_not_found(path: &Path) -> Self {
        Self::PathNotFound {
            path: path.display().to_string(),
        }
    }

    /// Renders the error as the message stored in an invalid prediction's
    /// diagnostic details.
    ///
    /// Decode failures include the decoder's own message so that a missing
    /// file and a corrupt file remain distinguishable in the output.
    pub fn detail_message(&self) -> String {
        match self {
            TriageError::ImageLoad(source) => format!("Failed to decode image: {source}"),
            TriageError::PathNotFound { path } => format!("File not found: {path}"),
            other => other.to_string(),
        }
    }
}

/// Convenient result alias for triage operations.
pub type TriageResult<T> = Result<T, TriageError>;
