//! Constants used throughout the triage pipeline.

/// Identifier of the heuristic model attached to every prediction.
pub const MODEL_NAME: &str = "rust-heuristic-v2";

/// Upper bound on the confidence of a successful classification.
pub const CONFIDENCE_CAP: f64 = 0.95;

/// Winning scores below this threshold fall back to the `unknown` class.
pub const UNKNOWN_THRESHOLD: f64 = 0.3;

/// A batch average confidence above this threshold marks the batch valid.
pub const BATCH_VALIDITY_THRESHOLD: f64 = 0.6;

/// Texture variance above this value indicates natural surface texture.
pub const HIGH_TEXTURE_VARIANCE: f64 = 500.0;

/// Texture variance below this value indicates artificial surfaces.
pub const LOW_TEXTURE_VARIANCE: f64 = 100.0;

/// Edge density above this value indicates cutting or construction edges.
pub const HIGH_EDGE_DENSITY: f64 = 10.0;

/// Default number of images above which a batch is processed in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;
