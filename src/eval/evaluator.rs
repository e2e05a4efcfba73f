use super::entropy::shannon_entropy;
use super::meter::StrengthMeter;
use super::types::{EvaluationOutcome, EvaluationRecord, Label};
use std::panic::{self, AssertUnwindSafe};

/// Evaluate one sample into an outcome.
///
/// A meter error or a panic inside the meter turns into
/// `EvaluationOutcome::Skipped`; nothing escapes this function, so one bad
/// sample cannot take the batch down with it. Reporting the skip is up to
/// whoever collects the outcome.
///
/// Holds no state between calls and is safe to run from many workers at once.
pub fn evaluate<M>(sample: String, threshold: f64, meter: &M) -> EvaluationOutcome
where
    M: StrengthMeter + ?Sized,
{
    let scored = panic::catch_unwind(AssertUnwindSafe(|| meter.score(&sample)));

    let strength = match scored {
        Ok(Ok(strength)) => strength,
        Ok(Err(e)) => {
            return EvaluationOutcome::Skipped {
                sample,
                reason: e.to_string(),
            };
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            return EvaluationOutcome::Skipped {
                sample,
                reason: format!("strength meter panicked: {message}"),
            };
        }
    };

    let entropy = shannon_entropy(&sample);
    let label = Label::from_score(strength.score, threshold);

    EvaluationOutcome::Evaluated(EvaluationRecord {
        sample,
        entropy,
        strength_score: strength.score,
        label,
    })
}
