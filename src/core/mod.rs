//! The core module of the triage pipeline.
//!
//! This module contains the fundamental plumbing of the pipeline:
//! - Constants used throughout the pipeline
//! - Configuration management
//! - Error handling
//! - Request-level input validation
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;
pub mod validation;

pub use config::{ParallelPolicy, TriageConfig};
pub use constants::*;
pub use errors::{TriageError, TriageResult};
pub use validation::{validate_non_empty, validate_range};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and
/// formatting layer. It's typically called at the start of an application to
/// enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
