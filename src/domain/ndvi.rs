//! NDVI change analysis.
//!
//! Pure vegetation-index arithmetic over before/after NDVI samples:
//! change detection, vegetation-loss percentage, and deforestation severity
//! grading. Fetching the samples from a satellite data source is the
//! caller's concern.

use serde::{Deserialize, Serialize};

use crate::domain::round_to;

/// Absolute NDVI difference above which a change is reported.
pub const DEFAULT_CHANGE_THRESHOLD: f64 = 0.2;

/// Vegetation loss percentage above which the loss is considered confirmed.
const CONFIRMED_LOSS_PERCENTAGE: f64 = 15.0;

/// An NDVI measurement with the confidence of the underlying data points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviSample {
    /// Normalized difference vegetation index, typically in [-1, 1].
    pub ndvi: f64,
    /// Confidence in [0, 1] of the measurement.
    pub confidence: f64,
}

/// Outcome of comparing two NDVI samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdviChange {
    /// NDVI of the earlier sample, rounded to 3 decimals.
    pub before_ndvi: f64,
    /// NDVI of the later sample, rounded to 3 decimals.
    pub after_ndvi: f64,
    /// before - after, rounded to 3 decimals.
    pub difference: f64,
    /// Whether the absolute difference exceeds the change threshold.
    pub change_detected: bool,
    /// Vegetation loss relative to the earlier sample, in percent, rounded
    /// to 2 decimals. Zero when the earlier NDVI is not positive.
    pub vegetation_loss_percentage: f64,
    /// Whether the loss percentage clears the confirmation threshold.
    pub confirmed: bool,
    /// The lower of the two sample confidences.
    pub confidence: f64,
}

/// Deforestation severity grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Loss of at most 10%.
    Low,
    /// Loss above 10%.
    Medium,
    /// Loss above 25%.
    High,
    /// Loss above 50%.
    Critical,
}

/// Deforestation assessment derived from an NDVI change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeforestationAssessment {
    /// Whether deforestation was detected (loss above 20%).
    pub detected: bool,
    /// Confidence of the assessment.
    pub confidence: f64,
    /// Graded severity.
    pub severity: Severity,
    /// The underlying NDVI change.
    pub analysis: NdviChange,
}

/// Compares two NDVI samples with the given change threshold.
pub fn analyze_change_with_threshold(
    before: NdviSample,
    after: NdviSample,
    change_threshold: f64,
) -> NdviChange {
    let difference = before.ndvi - after.ndvi;

    let vegetation_loss_percentage = if before.ndvi > 0.0 {
        (before.ndvi - after.ndvi) / before.ndvi * 100.0
    } else {
        0.0
    };

    NdviChange {
        before_ndvi: round_to(before.ndvi, 3),
        after_ndvi: round_to(after.ndvi, 3),
        difference: round_to(difference, 3),
        change_detected: difference.abs() > change_threshold,
        vegetation_loss_percentage: round_to(vegetation_loss_percentage, 2),
        confirmed: vegetation_loss_percentage > CONFIRMED_LOSS_PERCENTAGE,
        confidence: before.confidence.min(after.confidence),
    }
}

/// Compares two NDVI samples with the default change threshold.
pub fn analyze_change(before: NdviSample, after: NdviSample) -> NdviChange {
    analyze_change_with_threshold(before, after, DEFAULT_CHANGE_THRESHOLD)
}

/// Grades deforestation severity from a before/after NDVI pair.
///
/// Detection requires a vegetation loss above 20%; severity and confidence
/// step up at the 10 / 25 / 50 percent loss breakpoints.
pub fn grade_deforestation(before: NdviSample, after: NdviSample) -> DeforestationAssessment {
    let analysis = analyze_change(before, after);

    let mut detected = false;
    let mut confidence = 0.0;
    let mut severity = Severity::Low;

    if before.ndvi > 0.0 {
        let loss_pct = (before.ndvi - after.ndvi) / before.ndvi * 100.0;
        detected = loss_pct > 20.0;
        confidence = 0.5;
        if loss_pct > 50.0 {
            severity = Severity::Critical;
            confidence = 0.9;
        } else if loss_pct > 25.0 {
            severity = Severity::High;
            confidence = 0.75;
        } else if loss_pct > 10.0 {
            severity = Severity::Medium;
            confidence = 0.6;
        }
    }

    DeforestationAssessment {
        detected,
        confidence,
        severity,
        analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ndvi: f64) -> NdviSample {
        NdviSample {
            ndvi,
            confidence: 0.8,
        }
    }

    #[test]
    fn small_difference_is_not_a_change() {
        let change = analyze_change(sample(0.65), sample(0.55));
        assert!(!change.change_detected);
        assert_eq!(change.difference, 0.1);
    }

    #[test]
    fn large_drop_is_detected_and_confirmed() {
        let change = analyze_change(sample(0.7), sample(0.3));
        assert!(change.change_detected);
        assert!(change.confirmed);
        assert!((change.vegetation_loss_percentage - 57.14).abs() < 1e-9);
    }

    #[test]
    fn loss_percentage_requires_positive_baseline() {
        let change = analyze_change(sample(-0.1), sample(-0.5));
        assert_eq!(change.vegetation_loss_percentage, 0.0);
        assert!(!change.confirmed);
    }

    #[test]
    fn change_confidence_takes_the_minimum() {
        let before = NdviSample {
            ndvi: 0.6,
            confidence: 0.9,
        };
        let after = NdviSample {
            ndvi: 0.5,
            confidence: 0.4,
        };
        assert_eq!(analyze_change(before, after).confidence, 0.4);
    }

    #[test]
    fn severity_breakpoints() {
        // 5% loss: not detected, low.
        let a = grade_deforestation(sample(1.0), sample(0.95));
        assert!(!a.detected);
        assert_eq!(a.severity, Severity::Low);
        assert_eq!(a.confidence, 0.5);

        // 15% loss: not detected (needs > 20%), medium grade.
        let a = grade_deforestation(sample(1.0), sample(0.85));
        assert!(!a.detected);
        assert_eq!(a.severity, Severity::Medium);
        assert_eq!(a.confidence, 0.6);

        // 30% loss: detected, high.
        let a = grade_deforestation(sample(1.0), sample(0.7));
        assert!(a.detected);
        assert_eq!(a.severity, Severity::High);
        assert_eq!(a.confidence, 0.75);

        // 60% loss: detected, critical.
        let a = grade_deforestation(sample(1.0), sample(0.4));
        assert!(a.detected);
        assert_eq!(a.severity, Severity::Critical);
        assert_eq!(a.confidence, 0.9);
    }
}
