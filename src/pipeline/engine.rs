//! The triage engine.
//!
//! Orchestrates a batch run: request-level precondition checks, per-image
//! load → extract → classify with local failure recovery, order-preserving
//! parallel dispatch, and majority-vote aggregation.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{validate_non_empty, TriageConfig, TriageError, TriageResult};
use crate::domain::{aggregate, BatchResult, Prediction};
use crate::processors::{classify, extract_features};
use crate::utils::load_image;

/// A batch classification request.
///
/// The path list is ordered; the result's predictions are index-aligned
/// with it. The options bag is reserved for future extension and is not
/// interpreted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Image paths, absolute or relative to the working directory.
    pub image_paths: Vec<String>,
    /// Uninterpreted options.
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl ClassificationRequest {
    /// Creates a request for the given paths with an empty options bag.
    pub fn new(image_paths: Vec<String>) -> Self {
        Self {
            image_paths,
            options: serde_json::Map::new(),
        }
    }
}

/// Service health snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `healthy` when the engine is ready, `degraded` otherwise.
    pub status: String,
    /// Whether the engine is ready to serve requests.
    pub models_loaded: bool,
    /// Service identifier.
    pub service: String,
}

/// The triage engine.
///
/// An explicit service context constructed once at startup and passed by
/// reference into every call; holds the configuration and a readiness flag
/// instead of any global state. The engine itself is immutable during a
/// batch run, so it is freely shareable across threads.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    config: TriageConfig,
    ready: bool,
}

impl TriageEngine {
    /// Creates a ready engine from a configuration.
    pub fn new(config: TriageConfig) -> Self {
        info!(model = %config.model_name, "triage engine initialized");
        Self {
            config,
            ready: true,
        }
    }

    /// Whether the engine is ready to serve requests.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Marks the engine ready or not ready.
    ///
    /// A not-ready engine rejects every request with a request-level error.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// The engine's configuration.
    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Returns a health snapshot.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: if self.ready { "healthy" } else { "degraded" }.to_string(),
            models_loaded: self.ready,
            service: "mangrove-triage".to_string(),
        }
    }

    /// Classifies a batch of images and aggregates the results.
    ///
    /// Every path in the request produces exactly one prediction, in
    /// request order. Per-image failures (missing file, decode error) are
    /// recovered locally into `invalid` predictions; only request-level
    /// preconditions (empty path list, engine not ready) reject the whole
    /// request.
    pub fn classify_batch(&self, request: &ClassificationRequest) -> TriageResult<BatchResult> {
        if !self.ready {
            return Err(TriageError::invalid_request("triage engine is not ready"));
        }
        validate_non_empty(&request.image_paths, "image_paths")?;

        info!(count = request.image_paths.len(), "classifying images");

        let paths = &request.image_paths;
        let threshold = self.config.parallel_policy.batch_threshold;

        // Each image writes only its own output slot; rayon's indexed
        // collect keeps result order aligned with input order regardless of
        // completion order.
        let predictions: Vec<Prediction> = if paths.len() > threshold {
            match self.config.parallel_policy.max_threads {
                Some(threads) => match rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                {
                    Ok(pool) => {
                        pool.install(|| paths.par_iter().map(|p| self.analyze_path(p)).collect())
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to build sized worker pool, using default");
                        paths.par_iter().map(|p| self.analyze_path(p)).collect()
                    }
                },
                None => paths.par_iter().map(|p| self.analyze_path(p)).collect(),
            }
        } else {
            paths.iter().map(|p| self.analyze_path(p)).collect()
        };

        let batch = aggregate(predictions);
        debug!(
            primary = %batch.primary_class,
            average_confidence = batch.average_confidence,
            valid = batch.valid_images,
            total = batch.total_images,
            "batch aggregated"
        );
        Ok(batch)
    }

    /// Analyzes a single image path into a prediction.
    ///
    /// Never fails: loader and extractor errors map to the sentinel
    /// `invalid` prediction.
    fn analyze_path(&self, raw_path: &str) -> Prediction {
        let model = &self.config.model_name;
        let path = Path::new(raw_path);

        if !path.is_file() {
            warn!(path = raw_path, "image not found");
            let err = TriageError::path_not_found(path);
            return Prediction::invalid(model, err.detail_message());
        }

        match load_image(path) {
            Ok(image) => {
                let features = extract_features(&image);
                let classification = classify(&features);
                debug!(
                    path = raw_path,
                    class = classification.class_str(),
                    confidence = classification.confidence,
                    "image classified"
                );
                Prediction::from_classification(model, &features, &classification)
            }
            Err(err) => {
                warn!(path = raw_path, error = %err, "failed to analyze image");
                Prediction::invalid(model, err.detail_message())
            }
        }
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new(TriageConfig::default())
    }
}
