use super::counts::{ErrorCounts, ErrorExamples};
use crate::alignment::{AlignmentResult, CostPolicy};
use serde::{Deserialize, Serialize};

/// Error statistics for one segment or an accumulated batch.
///
/// All rates are percentages of `total_words`. When insertions are ignored
/// the insertion count, rate and example list report zero/empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub wer: f64,
    pub accuracy: f64,
    pub substitution_rate: f64,
    pub deletion_rate: f64,
    pub insertion_rate: f64,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
    /// Reference word count, floored at 1.
    pub total_words: usize,
    pub total_errors: usize,
    pub examples: ErrorExamples,
}

impl StatsRecord {
    pub fn from_parts(counts: &ErrorCounts, examples: ErrorExamples, policy: CostPolicy) -> Self {
        let total_words = counts.reference_words().max(1);
        let insertions = if policy.ignore_insertions {
            0
        } else {
            counts.insertions
        };
        let total_errors = counts.substitutions + counts.deletions + insertions;
        let rate = |n: usize| n as f64 * 100.0 / total_words as f64;
        let wer = rate(total_errors);

        Self {
            wer,
            accuracy: 100.0 - wer,
            substitution_rate: rate(counts.substitutions),
            deletion_rate: rate(counts.deletions),
            insertion_rate: rate(insertions),
            substitutions: counts.substitutions,
            deletions: counts.deletions,
            insertions,
            total_words,
            total_errors,
            examples,
        }
    }
}

/// Fold one alignment into its statistics.
pub fn aggregate(result: &AlignmentResult, policy: CostPolicy) -> StatsRecord {
    let counts = ErrorCounts::from_alignment(result);
    let examples = ErrorExamples::collect(result, policy);
    StatsRecord::from_parts(&counts, examples, policy)
}
