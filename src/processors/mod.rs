//! Feature extraction and classification processors.
//!
//! The processors are pure, non-blocking computations over already
//! materialized pixel buffers; all I/O stays in the loader and the pipeline.

pub mod classify;
pub mod features;

pub use classify::{classify, ClassLabel, ClassScores, Classification};
pub use features::{extract_features, FeatureVector};
