//! Rule-based classification of feature vectors.
//!
//! This module maps a [`FeatureVector`] to per-class scores via additive
//! rules, selects the top class over a fixed label order, calibrates the
//! confidence, and falls back to an unknown outcome when no class is
//! confident enough. Classification is a pure function: identical features
//! always produce an identical [`Classification`].

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    CONFIDENCE_CAP, HIGH_EDGE_DENSITY, HIGH_TEXTURE_VARIANCE, LOW_TEXTURE_VARIANCE,
    UNKNOWN_THRESHOLD,
};
use crate::processors::features::FeatureVector;

/// The environmental-change categories the scoring rules can award points to.
///
/// Declaration order is significant: ties in the score scan resolve in favor
/// of the earliest declared label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLabel {
    /// Healthy mangrove vegetation.
    Mangrove,
    /// Clearing / cutting activity.
    Cutting,
    /// Water pollution.
    Pollution,
    /// Human encroachment (artificial surfaces, construction).
    Encroachment,
}

impl ClassLabel {
    /// All labels in their fixed tie-break order.
    pub const ALL: [ClassLabel; 4] = [
        ClassLabel::Mangrove,
        ClassLabel::Cutting,
        ClassLabel::Pollution,
        ClassLabel::Encroachment,
    ];

    /// The label's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Mangrove => "mangrove",
            ClassLabel::Cutting => "cutting",
            ClassLabel::Pollution => "pollution",
            ClassLabel::Encroachment => "encroachment",
        }
    }
}

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-class scores, keyed by [`ClassLabel`] declaration order.
///
/// Backed by a fixed array rather than a map so that the argmax scan has a
/// specified, stable tie-break order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassScores([f64; 4]);

impl ClassScores {
    /// Creates a zeroed score table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the score of `label`.
    pub fn add(&mut self, label: ClassLabel, amount: f64) {
        self.0[label as usize] += amount;
    }

    /// Returns the score of `label`.
    pub fn get(&self, label: ClassLabel) -> f64 {
        self.0[label as usize]
    }

    /// Iterates over (label, score) pairs in fixed declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassLabel, f64)> + '_ {
        ClassLabel::ALL.iter().map(move |&label| (label, self.get(label)))
    }

    /// Left-to-right argmax over the fixed label order.
    ///
    /// Ties resolve in favor of the earliest declared label with the
    /// maximum score.
    pub fn argmax(&self) -> (ClassLabel, f64) {
        let mut winner = ClassLabel::ALL[0];
        let mut best = self.get(winner);
        for &label in &ClassLabel::ALL[1..] {
            let score = self.get(label);
            if score > best {
                winner = label;
                best = score;
            }
        }
        (winner, best)
    }
}

/// Outcome of classifying a single feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// The full score table, retained for diagnostic details.
    pub scores: ClassScores,
    /// The winning label, or `None` when no class was confident enough.
    pub label: Option<ClassLabel>,
    /// Calibrated confidence, unrounded, in [0, 0.95].
    pub confidence: f64,
}

impl Classification {
    /// The outcome's wire name (`"unknown"` when no class won).
    pub fn class_str(&self) -> &'static str {
        self.label.map_or("unknown", |label| label.as_str())
    }
}

/// Scores a feature vector against the rule set and selects the top class.
///
/// The rules apply independently and additively; a feature vector can
/// trigger several of them. Confidence is the winning score capped at 0.95.
/// If the capped confidence falls below 0.3 the outcome becomes unknown
/// with confidence `0.4 + clamp(green_ratio, 0, 0.2)`.
pub fn classify(features: &FeatureVector) -> Classification {
    let mut scores = ClassScores::new();

    // Color-based rules.
    if features.green_ratio > 0.25 && features.blue_ratio > 0.05 {
        scores.add(ClassLabel::Mangrove, 0.4 + features.green_ratio.min(0.3));
    }
    if features.brown_ratio > 0.2 && features.green_ratio < 0.1 {
        scores.add(ClassLabel::Cutting, 0.4 + features.brown_ratio.min(0.3));
    }
    if features.blue_ratio > 0.4 {
        scores.add(ClassLabel::Pollution, 0.4 + features.blue_ratio.min(0.3));
    }
    if features.gray_ratio > 0.3 {
        scores.add(ClassLabel::Pollution, 0.2);
        scores.add(ClassLabel::Encroachment, 0.2);
    }

    // Texture: high variance reads as natural canopy, low as artificial.
    if features.texture_variance > HIGH_TEXTURE_VARIANCE {
        scores.add(ClassLabel::Mangrove, 0.2);
    } else if features.texture_variance < LOW_TEXTURE_VARIANCE {
        scores.add(ClassLabel::Encroachment, 0.3);
    }

    // Edges: dense gradients read as cutting or construction boundaries.
    if features.edge_density > HIGH_EDGE_DENSITY {
        scores.add(ClassLabel::Cutting, 0.2);
        scores.add(ClassLabel::Encroachment, 0.2);
    }

    let (winner, best) = scores.argmax();
    let confidence = best.min(CONFIDENCE_CAP);

    if confidence < UNKNOWN_THRESHOLD {
        Classification {
            scores,
            label: None,
            confidence: 0.4 + features.green_ratio.clamp(0.0, 0.2),
        }
    } else {
        Classification {
            scores,
            label: Some(winner),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> FeatureVector {
        FeatureVector {
            green_ratio: 0.0,
            brown_ratio: 0.0,
            blue_ratio: 0.0,
            gray_ratio: 0.0,
            average_brightness: 128.0,
            texture_variance: 250.0,
            edge_density: 5.0,
            width: 100,
            height: 100,
        }
    }

    #[test]
    fn green_and_blue_score_mangrove() {
        let mut f = features();
        f.green_ratio = 0.6;
        f.blue_ratio = 0.1;

        let result = classify(&f);
        assert_eq!(result.label, Some(ClassLabel::Mangrove));
        // 0.4 + min(0.3, 0.6)
        assert!((result.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn brown_without_green_scores_cutting() {
        let mut f = features();
        f.brown_ratio = 0.5;
        f.green_ratio = 0.05;

        let result = classify(&f);
        assert_eq!(result.label, Some(ClassLabel::Cutting));
        assert!((result.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn brown_with_too_much_green_does_not_score_cutting() {
        let mut f = features();
        f.brown_ratio = 0.5;
        f.green_ratio = 0.15;

        let result = classify(&f);
        assert_eq!(result.scores.get(ClassLabel::Cutting), 0.0);
    }

    #[test]
    fn heavy_blue_scores_pollution() {
        let mut f = features();
        f.blue_ratio = 0.8;

        let result = classify(&f);
        assert_eq!(result.label, Some(ClassLabel::Pollution));
        // 0.4 + min(0.3, 0.8)
        assert!((result.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn gray_splits_between_pollution_and_encroachment() {
        let mut f = features();
        f.gray_ratio = 0.5;

        let result = classify(&f);
        assert_eq!(result.scores.get(ClassLabel::Pollution), 0.2);
        assert_eq!(result.scores.get(ClassLabel::Encroachment), 0.2);
    }

    #[test]
    fn texture_rules_are_mutually_exclusive() {
        let mut f = features();
        f.texture_variance = 600.0;
        let high = classify(&f);
        assert_eq!(high.scores.get(ClassLabel::Mangrove), 0.2);
        assert_eq!(high.scores.get(ClassLabel::Encroachment), 0.0);

        f.texture_variance = 50.0;
        let low = classify(&f);
        assert_eq!(low.scores.get(ClassLabel::Mangrove), 0.0);
        assert_eq!(low.scores.get(ClassLabel::Encroachment), 0.3);
    }

    #[test]
    fn high_edge_density_scores_cutting_and_encroachment() {
        let mut f = features();
        f.edge_density = 12.0;

        let result = classify(&f);
        assert_eq!(result.scores.get(ClassLabel::Cutting), 0.2);
        assert_eq!(result.scores.get(ClassLabel::Encroachment), 0.2);
    }

    #[test]
    fn ties_resolve_in_declaration_order() {
        // Gray rule awards 0.2 to both pollution and encroachment; with no
        // other rule firing, pollution wins because it is declared first.
        let mut f = features();
        f.gray_ratio = 0.5;
        f.texture_variance = 300.0;

        let (winner, best) = classify(&f).scores.argmax();
        assert_eq!(winner, ClassLabel::Pollution);
        assert_eq!(best, 0.2);
    }

    #[test]
    fn low_scores_fall_back_to_unknown() {
        // Gray rule alone yields 0.2, below the 0.3 threshold.
        let mut f = features();
        f.gray_ratio = 0.5;
        f.green_ratio = 0.08;
        f.texture_variance = 300.0;

        let result = classify(&f);
        assert_eq!(result.label, None);
        assert_eq!(result.class_str(), "unknown");
        // 0.4 + clamp(0.08, 0, 0.2)
        assert!((result.confidence - 0.48).abs() < 1e-12);
    }

    #[test]
    fn unknown_confidence_clamps_green_ratio() {
        let mut f = features();
        f.green_ratio = 0.9;
        // Green alone never fires a rule without blue, so the outcome is
        // unknown with the green contribution clamped to 0.2.
        let result = classify(&f);
        assert_eq!(result.label, None);
        assert!((result.confidence - 0.6).abs() < 1e-12);
    }

    #[test]
    fn confidence_is_capped() {
        let mut f = features();
        f.green_ratio = 0.9;
        f.blue_ratio = 0.1;
        f.texture_variance = 600.0;
        f.gray_ratio = 0.0;

        // Mangrove: 0.4 + 0.3 + 0.2 = 0.9, under the cap.
        let result = classify(&f);
        assert!(result.confidence <= CONFIDENCE_CAP);
        assert!((result.confidence - 0.9).abs() < 1e-12);
    }

    #[test]
    fn classification_is_pure() {
        let mut f = features();
        f.green_ratio = 0.4;
        f.blue_ratio = 0.2;

        assert_eq!(classify(&f), classify(&f));
    }

    #[test]
    fn score_iteration_follows_declaration_order() {
        let mut scores = ClassScores::new();
        scores.add(ClassLabel::Encroachment, 0.1);
        let labels: Vec<ClassLabel> = scores.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, ClassLabel::ALL.to_vec());
    }
}
