use super::types::{EvaluationOutcome, EvaluationRecord, Label};
use crate::error::EvalError;

/// Final table of a run. Built once by [`aggregate`], read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<EvaluationRecord>,
    skipped: usize,
}

impl Dataset {
    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of samples that were excluded because they failed scoring
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn count_label(&self, label: Label) -> usize {
        self.records.iter().filter(|r| r.label == label).count()
    }

    pub fn into_records(self) -> Vec<EvaluationRecord> {
        self.records
    }
}

/// Keep the evaluated records, count the skipped ones.
///
/// An all-skipped (or empty) run is `EvalError::NoUsableResults`, never an
/// empty table.
pub fn aggregate<I>(outcomes: I) -> Result<Dataset, EvalError>
where
    I: IntoIterator<Item = EvaluationOutcome>,
{
    let mut records = Vec::new();
    let mut skipped = 0;

    for outcome in outcomes {
        match outcome {
            EvaluationOutcome::Evaluated(record) => records.push(record),
            EvaluationOutcome::Skipped { .. } => skipped += 1,
        }
    }

    if records.is_empty() {
        return Err(EvalError::NoUsableResults { skipped });
    }

    Ok(Dataset { records, skipped })
}
