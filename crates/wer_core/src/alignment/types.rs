use crate::error::CoverageError;
use crate::normalize::Normalizer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Split text on whitespace runs; empty segments are discarded.
pub fn tokenize(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split_whitespace().collect()
}

/// A surface token paired with its comparison key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub key: String,
}

impl Token {
    pub fn new(text: &str, normalizer: &dyn Normalizer) -> Self {
        Self {
            text: text.to_string(),
            key: normalizer.canonical_key(text),
        }
    }

    pub fn with_key(text: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            key: key.into(),
        }
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Cost model for the alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostPolicy {
    /// Extra hypothesis tokens cost nothing and never count as errors.
    pub ignore_insertions: bool,
}

impl CostPolicy {
    pub fn new(ignore_insertions: bool) -> Self {
        Self { ignore_insertions }
    }

    pub fn insertion_cost(&self) -> usize {
        if self.ignore_insertions {
            0
        } else {
            1
        }
    }

    /// Cost charged for one operation of the given kind.
    pub fn cost_of(&self, kind: EditKind) -> usize {
        match kind {
            EditKind::Equal => 0,
            EditKind::Substitute | EditKind::Delete => 1,
            EditKind::Insert => self.insertion_cost(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Equal,
    Substitute,
    Delete,
    Insert,
}

impl EditKind {
    pub fn is_error(self) -> bool {
        !matches!(self, EditKind::Equal)
    }

    /// Whether this operation consumes a reference token.
    pub fn consumes_reference(self) -> bool {
        !matches!(self, EditKind::Insert)
    }

    /// Whether this operation consumes a hypothesis token.
    pub fn consumes_hypothesis(self) -> bool {
        !matches!(self, EditKind::Delete)
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditKind::Equal => "Equal",
            EditKind::Substitute => "Substitute",
            EditKind::Delete => "Delete",
            EditKind::Insert => "Insert",
        };
        f.write_str(name)
    }
}

/// One aligned step together with the surface tokens it consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Edit {
    Equal { hypothesis: String, reference: String },
    Substitute { hypothesis: String, reference: String },
    Delete { reference: String },
    Insert { hypothesis: String },
}

impl Edit {
    pub fn kind(&self) -> EditKind {
        match self {
            Edit::Equal { .. } => EditKind::Equal,
            Edit::Substitute { .. } => EditKind::Substitute,
            Edit::Delete { .. } => EditKind::Delete,
            Edit::Insert { .. } => EditKind::Insert,
        }
    }

    pub fn hypothesis(&self) -> Option<&str> {
        match self {
            Edit::Equal { hypothesis, .. }
            | Edit::Substitute { hypothesis, .. }
            | Edit::Insert { hypothesis } => Some(hypothesis.as_str()),
            Edit::Delete { .. } => None,
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            Edit::Equal { reference, .. }
            | Edit::Substitute { reference, .. }
            | Edit::Delete { reference } => Some(reference.as_str()),
            Edit::Insert { .. } => None,
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Equal { hypothesis, .. } => write!(f, "Equal({hypothesis})"),
            Edit::Substitute {
                hypothesis,
                reference,
            } => write!(f, "Substitute({hypothesis}/{reference})"),
            Edit::Delete { reference } => write!(f, "Delete({reference})"),
            Edit::Insert { hypothesis } => write!(f, "Insert({hypothesis})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Index in the final left-to-right sequence.
    pub position: usize,
    #[serde(flatten)]
    pub edit: Edit,
}

impl Operation {
    pub fn kind(&self) -> EditKind {
        self.edit.kind()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.edit, f)
    }
}

/// Operations in the left-to-right order of the input sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlignmentResult {
    operations: Vec<Operation>,
}

impl AlignmentResult {
    /// Wrap edits already in left-to-right order, numbering their positions.
    pub fn from_edits(edits: Vec<Edit>) -> Self {
        let operations = edits
            .into_iter()
            .enumerate()
            .map(|(position, edit)| Operation { position, edit })
            .collect();
        Self { operations }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn kinds(&self) -> Vec<EditKind> {
        self.operations.iter().map(Operation::kind).collect()
    }

    pub fn count(&self, kind: EditKind) -> usize {
        self.operations.iter().filter(|op| op.kind() == kind).count()
    }

    /// Reference tokens replayed from Equal/Substitute/Delete steps.
    pub fn reference_tokens(&self) -> Vec<&str> {
        self.operations
            .iter()
            .filter_map(|op| op.edit.reference())
            .collect()
    }

    /// Hypothesis tokens replayed from Equal/Substitute/Insert steps.
    pub fn hypothesis_tokens(&self) -> Vec<&str> {
        self.operations
            .iter()
            .filter_map(|op| op.edit.hypothesis())
            .collect()
    }

    /// Total cost of the sequence under `policy`.
    pub fn cost(&self, policy: CostPolicy) -> usize {
        self.operations
            .iter()
            .map(|op| policy.cost_of(op.kind()))
            .sum()
    }

    /// Check that replaying the operations yields both inputs exactly.
    pub fn verify_coverage<R, H>(
        &self,
        reference: &[R],
        hypothesis: &[H],
    ) -> Result<(), CoverageError>
    where
        R: AsRef<str>,
        H: AsRef<str>,
    {
        for (index, op) in self.operations.iter().enumerate() {
            if op.position != index {
                return Err(CoverageError::Position {
                    index,
                    position: op.position,
                });
            }
        }

        let replayed = self.reference_tokens();
        if replayed.len() != reference.len() {
            return Err(CoverageError::ReferenceLength {
                expected: reference.len(),
                replayed: replayed.len(),
            });
        }
        for (index, (found, expected)) in replayed.iter().zip(reference).enumerate() {
            if *found != expected.as_ref() {
                return Err(CoverageError::ReferenceToken {
                    index,
                    expected: expected.as_ref().to_string(),
                    found: found.to_string(),
                });
            }
        }

        let replayed = self.hypothesis_tokens();
        if replayed.len() != hypothesis.len() {
            return Err(CoverageError::HypothesisLength {
                expected: hypothesis.len(),
                replayed: replayed.len(),
            });
        }
        for (index, (found, expected)) in replayed.iter().zip(hypothesis).enumerate() {
            if *found != expected.as_ref() {
                return Err(CoverageError::HypothesisToken {
                    index,
                    expected: expected.as_ref().to_string(),
                    found: found.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AlignmentResult {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(h: &str, r: &str) -> Edit {
        Edit::Substitute {
            hypothesis: h.to_string(),
            reference: r.to_string(),
        }
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  the  cat\tsat\n"), vec!["the", "cat", "sat"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_policy_costs() {
        let counted = CostPolicy::default();
        let free = CostPolicy::new(true);
        assert_eq!(counted.cost_of(EditKind::Insert), 1);
        assert_eq!(free.cost_of(EditKind::Insert), 0);
        assert_eq!(free.cost_of(EditKind::Delete), 1);
        assert_eq!(free.cost_of(EditKind::Equal), 0);
    }

    #[test]
    fn test_edit_display() {
        assert_eq!(sub("a", "the").to_string(), "Substitute(a/the)");
        let del = Edit::Delete {
            reference: "sat".to_string(),
        };
        assert_eq!(del.to_string(), "Delete(sat)");
        assert_eq!(del.hypothesis(), None);
        assert_eq!(del.reference(), Some("sat"));
    }

    #[test]
    fn test_verify_coverage_detects_missing_token() {
        let result = AlignmentResult::from_edits(vec![sub("a", "the")]);
        assert!(result.verify_coverage(&["the"], &["a"]).is_ok());
        assert_eq!(
            result.verify_coverage(&["the", "cat"], &["a"]),
            Err(CoverageError::ReferenceLength {
                expected: 2,
                replayed: 1
            })
        );
        assert_eq!(
            result.verify_coverage(&["the"], &["an"]),
            Err(CoverageError::HypothesisToken {
                index: 0,
                expected: "an".to_string(),
                found: "a".to_string()
            })
        );
    }

    #[test]
    fn test_operation_serializes_flat() {
        let result = AlignmentResult::from_edits(vec![
            sub("a", "the"),
            Edit::Insert {
                hypothesis: "um".to_string(),
            },
        ]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json[0]["kind"], "substitute");
        assert_eq!(json[0]["position"], 0);
        assert_eq!(json[1]["kind"], "insert");
        assert_eq!(json[1]["hypothesis"], "um");
        let back: AlignmentResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
