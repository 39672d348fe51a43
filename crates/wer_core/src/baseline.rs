//! Exact-token Levenshtein WER.
//!
//! No canonical keys, no phrase stripping and insertions always count. Used
//! as a cross-check next to the classified statistics.

use crate::alignment::{tokenize, AlignmentMatrix, CostPolicy, Token};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineStats {
    pub edits: usize,
    pub ref_words: usize,
}

impl BaselineStats {
    /// Edits per reference word, as a fraction.
    pub fn wer(&self) -> f64 {
        if self.ref_words == 0 {
            if self.edits == 0 {
                0.0
            } else {
                1.0
            }
        } else {
            self.edits as f64 / self.ref_words as f64
        }
    }

    pub fn merge(&mut self, other: &BaselineStats) {
        self.edits += other.edits;
        self.ref_words += other.ref_words;
    }
}

pub fn plain_wer(reference: &str, hypothesis: &str) -> BaselineStats {
    let r_tok = tokenize(reference);
    let h_tok = tokenize(hypothesis);
    BaselineStats {
        edits: levenshtein_tokens(&r_tok, &h_tok),
        ref_words: r_tok.len(),
    }
}

/// Edit distance between two token lists, comparing surface text exactly.
pub fn levenshtein_tokens(reference: &[&str], hypothesis: &[&str]) -> usize {
    let exact = |words: &[&str]| -> Vec<Token> {
        words.iter().map(|w| Token::with_key(*w, *w)).collect()
    };
    AlignmentMatrix::build(&exact(reference), &exact(hypothesis), CostPolicy::default())
        .total_cost()
}
