use crate::alignment::{AlignmentResult, CostPolicy, Edit, EditKind};
use serde::{Deserialize, Serialize};

/// Per-kind operation tallies.
///
/// `merge` is commutative and associative, so per-segment counts can be
/// folded in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCounts {
    pub equal: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
}

impl ErrorCounts {
    pub fn from_alignment(result: &AlignmentResult) -> Self {
        let mut counts = Self::default();
        for op in result {
            counts.record(op.kind());
        }
        counts
    }

    pub fn record(&mut self, kind: EditKind) {
        match kind {
            EditKind::Equal => self.equal += 1,
            EditKind::Substitute => self.substitutions += 1,
            EditKind::Delete => self.deletions += 1,
            EditKind::Insert => self.insertions += 1,
        }
    }

    pub fn merge(&mut self, other: &ErrorCounts) {
        self.equal += other.equal;
        self.substitutions += other.substitutions;
        self.deletions += other.deletions;
        self.insertions += other.insertions;
    }

    /// Reference tokens consumed: matches, substitutions and deletions.
    pub fn reference_words(&self) -> usize {
        self.equal + self.substitutions + self.deletions
    }

    /// Hypothesis tokens consumed: matches, substitutions and insertions.
    pub fn hypothesis_words(&self) -> usize {
        self.equal + self.substitutions + self.insertions
    }
}

/// Error examples in the order they occur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExamples {
    /// `(hypothesis, reference)` pairs.
    pub substitutions: Vec<(String, String)>,
    pub deletions: Vec<String>,
    pub insertions: Vec<String>,
}

impl ErrorExamples {
    /// Collect examples from an alignment. Insertions are left out when the
    /// policy ignores them.
    pub fn collect(result: &AlignmentResult, policy: CostPolicy) -> Self {
        let mut examples = Self::default();
        for op in result {
            match &op.edit {
                Edit::Equal { .. } => {}
                Edit::Substitute {
                    hypothesis,
                    reference,
                } => examples
                    .substitutions
                    .push((hypothesis.clone(), reference.clone())),
                Edit::Delete { reference } => examples.deletions.push(reference.clone()),
                Edit::Insert { hypothesis } => {
                    if !policy.ignore_insertions {
                        examples.insertions.push(hypothesis.clone());
                    }
                }
            }
        }
        examples
    }

    /// Append another segment's examples after this one's.
    pub fn extend(&mut self, other: ErrorExamples) {
        self.substitutions.extend(other.substitutions);
        self.deletions.extend(other.deletions);
        self.insertions.extend(other.insertions);
    }

    pub fn clear(&mut self) {
        self.substitutions.clear();
        self.deletions.clear();
        self.insertions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty() && self.deletions.is_empty() && self.insertions.is_empty()
    }
}
