use super::matrix::AlignmentMatrix;
use super::types::{AlignmentResult, Edit, EditKind, Token};
use crate::normalize::Normalizer;

/// Walk the stored choices from `(m, n)` back to the origin and return the
/// operations in left-to-right order.
///
/// Substitutions whose tokens share a canonical key under `normalizer` are
/// reclassified as matches afterwards.
pub fn backtrace(
    matrix: &AlignmentMatrix,
    reference: &[Token],
    hypothesis: &[Token],
    normalizer: &dyn Normalizer,
) -> AlignmentResult {
    assert_eq!(
        (matrix.reference_len(), matrix.hypothesis_len()),
        (reference.len(), hypothesis.len()),
        "matrix shape does not match the token lists"
    );

    let mut i = reference.len();
    let mut j = hypothesis.len();
    let mut reversed = Vec::with_capacity(i + j);

    while i > 0 || j > 0 {
        let edit = match matrix.op(i, j) {
            EditKind::Equal => Edit::Equal {
                hypothesis: hypothesis[j - 1].text.clone(),
                reference: reference[i - 1].text.clone(),
            },
            EditKind::Substitute => Edit::Substitute {
                hypothesis: hypothesis[j - 1].text.clone(),
                reference: reference[i - 1].text.clone(),
            },
            EditKind::Delete => Edit::Delete {
                reference: reference[i - 1].text.clone(),
            },
            EditKind::Insert => Edit::Insert {
                hypothesis: hypothesis[j - 1].text.clone(),
            },
        };
        let kind = edit.kind();
        if kind.consumes_reference() {
            i -= 1;
        }
        if kind.consumes_hypothesis() {
            j -= 1;
        }
        reversed.push(edit);
    }

    reversed.reverse();
    let edits = reconcile_substitutions(reversed, normalizer);
    AlignmentResult::from_edits(edits)
}

fn reconcile_substitutions(edits: Vec<Edit>, normalizer: &dyn Normalizer) -> Vec<Edit> {
    let mut reconciled = 0usize;
    let edits = edits
        .into_iter()
        .map(|edit| match edit {
            Edit::Substitute {
                hypothesis,
                reference,
            } if normalizer.canonical_key(&hypothesis) == normalizer.canonical_key(&reference) => {
                reconciled += 1;
                Edit::Equal {
                    hypothesis,
                    reference,
                }
            }
            other => other,
        })
        .collect();
    if reconciled > 0 {
        log::debug!("[backtrace] reconciled {} substitution(s) as matches", reconciled);
    }
    edits
}
