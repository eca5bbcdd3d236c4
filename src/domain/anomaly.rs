//! Report anomaly flagging.
//!
//! Pure plausibility scoring for field reports: checks the reported
//! coordinates against simple heuristics and accumulates a suspicion score.
//! Stateless by construction; frequency-based checks that would need a
//! report database live outside this crate.

use serde::{Deserialize, Serialize};

use crate::core::validate_range;
use crate::domain::round_to;

/// A suspicion score above this threshold marks the report suspicious.
const SUSPICION_THRESHOLD: f64 = 0.6;

/// Severity of an anomaly flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Low,
    /// Worth reviewing.
    Medium,
    /// Likely bogus report.
    High,
}

/// A single anomaly found in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFlag {
    /// Machine-readable flag type, e.g. `suspicious_coordinates`.
    #[serde(rename = "type")]
    pub flag_type: String,
    /// Flag severity.
    pub severity: Severity,
    /// Human-readable description.
    pub description: String,
}

/// Result of anomaly analysis for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Accumulated suspicion score, rounded to 3 decimals.
    pub score: f64,
    /// The anomalies found.
    pub flags: Vec<AnomalyFlag>,
    /// Whether the score clears the suspicion threshold.
    #[serde(rename = "isSuspicious")]
    pub is_suspicious: bool,
}

/// Scores the plausibility of a report's coordinates.
///
/// Coordinates exactly at (0, 0), the null island default of broken GPS
/// fixes, and coordinates outside the valid longitude/latitude ranges each
/// raise a high-severity flag.
pub fn analyze_coordinates(longitude: f64, latitude: f64) -> AnomalyReport {
    let mut flags = Vec::new();
    let mut score = 0.0;

    if longitude == 0.0 && latitude == 0.0 {
        flags.push(AnomalyFlag {
            flag_type: "suspicious_coordinates".to_string(),
            severity: Severity::High,
            description: "Coordinates are exactly (0,0)".to_string(),
        });
        score += 0.8;
    }

    let in_range = validate_range(longitude, -180.0, 180.0, "longitude")
        .and_then(|_| validate_range(latitude, -90.0, 90.0, "latitude"));
    if in_range.is_err() {
        flags.push(AnomalyFlag {
            flag_type: "invalid_coordinates".to_string(),
            severity: Severity::High,
            description: "Coordinates outside valid range".to_string(),
        });
        score += 0.9;
    }

    AnomalyReport {
        score: round_to(score, 3),
        is_suspicious: score > SUSPICION_THRESHOLD,
        flags,
    }
}
