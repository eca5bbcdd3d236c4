//! # Mangrove Triage
//!
//! A Rust library that triages field imagery into coarse environmental-change
//! categories (healthy mangrove, clearing/cutting, water pollution,
//! encroachment) using deterministic pixel-statistics heuristics, then
//! aggregates per-image results into a batch verdict.
//!
//! ## Features
//!
//! - Image loading with normalization to 8-bit RGB
//! - Multi-signal feature extraction (color masks, brightness, texture
//!   variance, edge density)
//! - Additive rule-based classification with calibrated confidence
//! - Order-preserving batch processing with per-image failure recovery
//! - Majority-vote batch aggregation
//! - Report anomaly flagging and NDVI change analysis helpers
//!
//! ## Modules
//!
//! * [`core`] - Error handling, constants, configuration, and validation
//! * [`domain`] - Prediction and batch result types, anomaly and NDVI helpers
//! * [`processors`] - Feature extraction and rule-based classification
//! * [`pipeline`] - The triage engine that orchestrates a batch run
//! * [`utils`] - Image loading utilities
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mangrove_triage::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = TriageEngine::new(TriageConfig::default());
//!
//! let request = ClassificationRequest::new(vec![
//!     "site-a/photo1.jpg".to_string(),
//!     "site-a/photo2.jpg".to_string(),
//! ]);
//!
//! let batch = engine.classify_batch(&request)?;
//! println!("{}: {:.3}", batch.primary_class, batch.average_confidence);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use mangrove_triage::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - The triage engine (`TriageEngine`, `TriageConfig`, `ClassificationRequest`)
/// - Results (`BatchResult`, `Prediction`, `PredictionClass`)
/// - Essential error and result types (`TriageError`, `TriageResult`)
/// - Basic image loading (`load_image`)
pub mod prelude {
    pub use crate::pipeline::{ClassificationRequest, TriageConfig, TriageEngine};

    pub use crate::domain::{BatchResult, Prediction, PredictionClass};

    pub use crate::core::{TriageError, TriageResult};

    pub use crate::utils::load_image;
}
