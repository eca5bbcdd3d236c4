//! Domain types for the triage pipeline.
//!
//! Prediction and batch result schema, plus the pure report-anomaly and
//! NDVI-change helpers that accompany image triage in the field workflow.

pub mod anomaly;
pub mod ndvi;
pub mod prediction;

pub use anomaly::{analyze_coordinates, AnomalyFlag, AnomalyReport};
pub use ndvi::{analyze_change, grade_deforestation, DeforestationAssessment, NdviChange, NdviSample};
pub use prediction::{
    aggregate, BatchResult, Dimensions, Prediction, PredictionClass, PredictionDetails, ScoreMap,
};

/// Rounds a value to the given number of decimal digits.
///
/// Display-only: internal scoring and comparisons always use unrounded
/// values.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
