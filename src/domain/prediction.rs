//! Prediction and batch result types.
//!
//! This module defines the per-image [`Prediction`] (with its diagnostic
//! details) and the [`BatchResult`] aggregate, along with the majority-vote
//! aggregation over an ordered prediction list. Field names follow the wire
//! schema of the triage service (`className`, `averageConfidence`, ...).

use serde::{Deserialize, Serialize};

use crate::core::constants::BATCH_VALIDITY_THRESHOLD;
use crate::domain::round_to;
use crate::processors::{ClassLabel, Classification, FeatureVector};

/// The class attached to a single prediction.
///
/// Extends the four scoring classes with `unknown` (no class was confident
/// enough) and the sentinel `invalid` (the image could not be analyzed at
/// all). Invalid predictions are excluded from all averaging and voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionClass {
    /// Healthy mangrove vegetation.
    Mangrove,
    /// Clearing / cutting activity.
    Cutting,
    /// Water pollution.
    Pollution,
    /// Human encroachment.
    Encroachment,
    /// No class was confident enough.
    Unknown,
    /// The image could not be analyzed (missing file, decode failure).
    Invalid,
}

impl PredictionClass {
    /// The class's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionClass::Mangrove => "mangrove",
            PredictionClass::Cutting => "cutting",
            PredictionClass::Pollution => "pollution",
            PredictionClass::Encroachment => "encroachment",
            PredictionClass::Unknown => "unknown",
            PredictionClass::Invalid => "invalid",
        }
    }

    /// Whether this is the sentinel `invalid` class.
    pub fn is_invalid(&self) -> bool {
        matches!(self, PredictionClass::Invalid)
    }
}

impl std::fmt::Display for PredictionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ClassLabel> for PredictionClass {
    fn from(label: ClassLabel) -> Self {
        match label {
            ClassLabel::Mangrove => PredictionClass::Mangrove,
            ClassLabel::Cutting => PredictionClass::Cutting,
            ClassLabel::Pollution => PredictionClass::Pollution,
            ClassLabel::Encroachment => PredictionClass::Encroachment,
        }
    }
}

/// Image dimensions carried in the diagnostic details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// The full score table rendered for diagnostics.
///
/// A struct rather than a map so the serialized key order is fixed to the
/// scoring tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreMap {
    /// Score of the mangrove class.
    pub mangrove: f64,
    /// Score of the cutting class.
    pub cutting: f64,
    /// Score of the pollution class.
    pub pollution: f64,
    /// Score of the encroachment class.
    pub encroachment: f64,
}

/// Diagnostic details attached to a prediction.
///
/// Successful predictions carry the rounded feature vector and score map;
/// invalid predictions carry only an error message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionDetails {
    /// Green mask ratio, rounded to 4 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green_ratio: Option<f64>,
    /// Brown mask ratio, rounded to 4 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brown_ratio: Option<f64>,
    /// Blue mask ratio, rounded to 4 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue_ratio: Option<f64>,
    /// Gray mask ratio, rounded to 4 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gray_ratio: Option<f64>,
    /// Average brightness, rounded to 2 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_brightness: Option<f64>,
    /// Texture variance, rounded to 2 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_variance: Option<f64>,
    /// Edge density, rounded to 2 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_density: Option<f64>,
    /// Image dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    /// Full score map, rounded to 3 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreMap>,
    /// Error message for invalid predictions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-image classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted class.
    #[serde(rename = "className")]
    pub class_name: PredictionClass,
    /// Confidence in [0, 0.95], rounded to 3 decimals; exactly 0.0 for
    /// invalid predictions.
    pub confidence: f64,
    /// Model identifier.
    pub model: String,
    /// Reserved timestamp slot; the core never populates it.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Diagnostic details.
    #[serde(default)]
    pub details: PredictionDetails,
}

impl Prediction {
    /// Builds a successful prediction from a feature vector and its
    /// classification outcome.
    ///
    /// Internal scoring has already happened on unrounded values; rounding
    /// here is display-only.
    pub fn from_classification(
        model: &str,
        features: &FeatureVector,
        classification: &Classification,
    ) -> Self {
        let class_name = classification
            .label
            .map_or(PredictionClass::Unknown, PredictionClass::from);

        Self {
            class_name,
            confidence: round_to(classification.confidence, 3),
            model: model.to_string(),
            timestamp: None,
            details: PredictionDetails {
                green_ratio: Some(round_to(features.green_ratio, 4)),
                brown_ratio: Some(round_to(features.brown_ratio, 4)),
                blue_ratio: Some(round_to(features.blue_ratio, 4)),
                gray_ratio: Some(round_to(features.gray_ratio, 4)),
                average_brightness: Some(round_to(features.average_brightness, 2)),
                texture_variance: Some(round_to(features.texture_variance, 2)),
                edge_density: Some(round_to(features.edge_density, 2)),
                dimensions: Some(Dimensions {
                    width: features.width,
                    height: features.height,
                }),
                scores: Some(ScoreMap {
                    mangrove: round_to(classification.scores.get(ClassLabel::Mangrove), 3),
                    cutting: round_to(classification.scores.get(ClassLabel::Cutting), 3),
                    pollution: round_to(classification.scores.get(ClassLabel::Pollution), 3),
                    encroachment: round_to(
                        classification.scores.get(ClassLabel::Encroachment),
                        3,
                    ),
                }),
                error: None,
            },
        }
    }

    /// Builds the sentinel invalid prediction for an image that could not
    /// be analyzed.
    pub fn invalid(model: &str, error: impl Into<String>) -> Self {
        Self {
            class_name: PredictionClass::Invalid,
            confidence: 0.0,
            model: model.to_string(),
            timestamp: None,
            details: PredictionDetails {
                error: Some(error.into()),
                ..PredictionDetails::default()
            },
        }
    }
}

/// Aggregate verdict over an ordered list of per-image predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Per-image predictions, index-aligned with the request's path list.
    pub predictions: Vec<Prediction>,
    /// Mean confidence over non-invalid predictions, rounded to 3 decimals;
    /// 0.0 if there are none.
    #[serde(rename = "averageConfidence")]
    pub average_confidence: f64,
    /// Majority-vote winner among non-invalid predictions; `unknown` if
    /// there are none.
    #[serde(rename = "primaryClass")]
    pub primary_class: PredictionClass,
    /// Whether the average confidence clears the batch validity threshold.
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    /// Length of the original path list.
    #[serde(rename = "totalImages")]
    pub total_images: usize,
    /// Number of non-invalid predictions.
    #[serde(rename = "validImages")]
    pub valid_images: usize,
}

/// Aggregates an ordered prediction list into a [`BatchResult`].
///
/// Majority-vote ties break in favor of the class seen first during the
/// count pass over the valid predictions.
pub fn aggregate(predictions: Vec<Prediction>) -> BatchResult {
    let total_images = predictions.len();

    let valid: Vec<&Prediction> = predictions
        .iter()
        .filter(|p| !p.class_name.is_invalid())
        .collect();
    let valid_images = valid.len();

    let average_confidence = if valid.is_empty() {
        0.0
    } else {
        round_to(
            valid.iter().map(|p| p.confidence).sum::<f64>() / valid.len() as f64,
            3,
        )
    };

    // Count in first-seen order so the vote tie-break is deterministic.
    let mut counts: Vec<(PredictionClass, usize)> = Vec::new();
    for prediction in &valid {
        match counts
            .iter_mut()
            .find(|(class, _)| *class == prediction.class_name)
        {
            Some(entry) => entry.1 += 1,
            None => counts.push((prediction.class_name, 1)),
        }
    }

    let mut primary_class = PredictionClass::Unknown;
    let mut best_count = 0usize;
    for &(class, count) in &counts {
        if count > best_count {
            primary_class = class;
            best_count = count;
        }
    }

    BatchResult {
        average_confidence,
        primary_class,
        is_valid: average_confidence > BATCH_VALIDITY_THRESHOLD,
        total_images,
        valid_images,
        predictions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(class_name: PredictionClass, confidence: f64) -> Prediction {
        Prediction {
            class_name,
            confidence,
            model: "rust-heuristic-test".to_string(),
            timestamp: None,
            details: PredictionDetails::default(),
        }
    }

    #[test]
    fn empty_batch_aggregates_to_unknown() {
        let result = aggregate(vec![]);
        assert_eq!(result.average_confidence, 0.0);
        assert_eq!(result.primary_class, PredictionClass::Unknown);
        assert!(!result.is_valid);
        assert_eq!(result.total_images, 0);
        assert_eq!(result.valid_images, 0);
    }

    #[test]
    fn invalid_predictions_are_excluded_from_averaging() {
        let result = aggregate(vec![
            prediction(PredictionClass::Mangrove, 0.8),
            prediction(PredictionClass::Invalid, 0.0),
            prediction(PredictionClass::Mangrove, 0.6),
        ]);
        assert_eq!(result.average_confidence, 0.7);
        assert_eq!(result.total_images, 3);
        assert_eq!(result.valid_images, 2);
        assert_eq!(result.primary_class, PredictionClass::Mangrove);
        assert!(result.is_valid);
    }

    #[test]
    fn all_invalid_batch_has_zero_confidence() {
        let result = aggregate(vec![
            prediction(PredictionClass::Invalid, 0.0),
            prediction(PredictionClass::Invalid, 0.0),
        ]);
        assert_eq!(result.average_confidence, 0.0);
        assert_eq!(result.primary_class, PredictionClass::Unknown);
        assert!(!result.is_valid);
        assert_eq!(result.valid_images, 0);
        assert_eq!(result.total_images, 2);
    }

    #[test]
    fn majority_vote_ties_break_first_seen() {
        let result = aggregate(vec![
            prediction(PredictionClass::Cutting, 0.5),
            prediction(PredictionClass::Mangrove, 0.9),
            prediction(PredictionClass::Mangrove, 0.9),
            prediction(PredictionClass::Cutting, 0.5),
        ]);
        // Two votes each; cutting was seen first.
        assert_eq!(result.primary_class, PredictionClass::Cutting);
    }

    #[test]
    fn unknown_predictions_participate_in_the_vote() {
        let result = aggregate(vec![
            prediction(PredictionClass::Unknown, 0.45),
            prediction(PredictionClass::Unknown, 0.45),
            prediction(PredictionClass::Pollution, 0.7),
        ]);
        assert_eq!(result.primary_class, PredictionClass::Unknown);
        assert_eq!(result.valid_images, 3);
    }

    #[test]
    fn validity_threshold_is_strict() {
        let result = aggregate(vec![prediction(PredictionClass::Mangrove, 0.6)]);
        assert!(!result.is_valid);

        let result = aggregate(vec![prediction(PredictionClass::Mangrove, 0.601)]);
        assert!(result.is_valid);
    }

    #[test]
    fn invalid_count_complements_valid_count() {
        let result = aggregate(vec![
            prediction(PredictionClass::Mangrove, 0.7),
            prediction(PredictionClass::Invalid, 0.0),
            prediction(PredictionClass::Unknown, 0.5),
        ]);
        let invalid = result
            .predictions
            .iter()
            .filter(|p| p.class_name.is_invalid())
            .count();
        assert_eq!(result.valid_images + invalid, result.total_images);
    }

    #[test]
    fn invalid_prediction_carries_error_only() {
        let p = Prediction::invalid("rust-heuristic-test", "File not found: x.png");
        assert_eq!(p.class_name, PredictionClass::Invalid);
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.details.error.as_deref(), Some("File not found: x.png"));
        assert!(p.details.scores.is_none());
        assert!(p.details.green_ratio.is_none());
    }

    #[test]
    fn prediction_serializes_with_wire_field_names() {
        let p = prediction(PredictionClass::Mangrove, 0.75);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["className"], "mangrove");
        assert_eq!(json["confidence"], 0.75);
        assert_eq!(json["model"], "rust-heuristic-test");
    }

    #[test]
    fn batch_result_serializes_with_wire_field_names() {
        let result = aggregate(vec![prediction(PredictionClass::Pollution, 0.8)]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["averageConfidence"], 0.8);
        assert_eq!(json["primaryClass"], "pollution");
        assert_eq!(json["isValid"], true);
        assert_eq!(json["totalImages"], 1);
        assert_eq!(json["validImages"], 1);
    }
}
