use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength label assigned to an evaluated sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Weak,
    Strong,
}

impl Label {
    /// Label a score against the threshold. The boundary belongs to `Strong`.
    ///
    /// A NaN score never compares `>=`, so it is labeled `Weak`.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            Label::Strong
        } else {
            Label::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Weak => "weak",
            Label::Strong => "strong",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived record for one successfully scored sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    #[serde(rename = "password")]
    pub sample: String,
    pub entropy: f64,
    #[serde(rename = "strength")]
    pub strength_score: f64,
    pub label: Label,
}

/// Result of evaluating a single sample. Workers always produce one of these,
/// so the collector can tell a failed item apart from a missing one.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    Evaluated(EvaluationRecord),
    Skipped { sample: String, reason: String },
}

impl EvaluationOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, EvaluationOutcome::Skipped { .. })
    }

    /// The sample this outcome was produced for
    pub fn sample(&self) -> &str {
        match self {
            EvaluationOutcome::Evaluated(record) => &record.sample,
            EvaluationOutcome::Skipped { sample, .. } => sample,
        }
    }

    pub fn record(&self) -> Option<&EvaluationRecord> {
        match self {
            EvaluationOutcome::Evaluated(record) => Some(record),
            EvaluationOutcome::Skipped { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive_on_strong_side() {
        assert_eq!(Label::from_score(0.5, 0.5), Label::Strong);
        assert_eq!(Label::from_score(0.4999, 0.5), Label::Weak);
        assert_eq!(Label::from_score(0.5001, 0.5), Label::Strong);
    }

    #[test]
    fn test_label_across_thresholds() {
        for threshold in [0.0, 0.25, 0.5, 0.75, 1.0] {
            for score in [0.0, 0.1, 0.25, 0.5, 0.6, 0.75, 0.9, 1.0] {
                let label = Label::from_score(score, threshold);
                assert_eq!(label == Label::Strong, score >= threshold);
                assert_eq!(label == Label::Weak, score < threshold);
            }
        }
    }

    #[test]
    fn test_nan_score_is_weak() {
        assert_eq!(Label::from_score(f64::NAN, 0.5), Label::Weak);
    }

    #[test]
    fn test_label_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Label::Strong).unwrap(), "\"strong\"");
        assert_eq!(Label::Weak.to_string(), "weak");
    }

    #[test]
    fn test_outcome_accessors() {
        let skipped = EvaluationOutcome::Skipped {
            sample: "".into(),
            reason: "empty".into(),
        };
        assert!(skipped.is_skipped());
        assert!(skipped.record().is_none());

        let evaluated = EvaluationOutcome::Evaluated(EvaluationRecord {
            sample: "abc".into(),
            entropy: 1.0,
            strength_score: 0.2,
            label: Label::Weak,
        });
        assert_eq!(evaluated.sample(), "abc");
        assert!(evaluated.record().is_some());
    }
}
