//! The triage pipeline.
//!
//! This module provides the [`TriageEngine`], the service context that
//! combines the loader, feature extractor, classification engine, and batch
//! aggregator into a single library call.

pub mod engine;

pub use crate::core::config::{ParallelPolicy, TriageConfig};
pub use engine::{ClassificationRequest, HealthStatus, TriageEngine};
