//! Text and token normalization.
//!
//! Two stages share one capability trait: whole-text normalization applied
//! before tokenization, and per-token canonical keys used only for equality
//! during alignment. Display text is never rewritten by the key stage.

mod text;
mod token;

pub use text::{BasicTextNormalizer, CommentStripper};
pub use token::{fold_plural, TokenNormalizer, DEFAULT_IGNORABLE_PHRASES};

/// A pluggable normalizer.
///
/// Both methods default to the identity so implementations only override
/// the stage they care about.
pub trait Normalizer: Send + Sync {
    fn name(&self) -> &str;

    /// Rewrite a full segment of text before it is split into tokens.
    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }

    /// Comparison key for a single surface token.
    fn canonical_key(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Runs normalizers in sequence.
///
/// `normalize` feeds each output into the next member; `canonical_key`
/// folds the key through every member in the same order. An empty chain is
/// the identity.
#[derive(Default)]
pub struct NormalizerChain {
    members: Vec<Box<dyn Normalizer>>,
}

impl NormalizerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.members.push(normalizer);
        self
    }

    pub fn push(&mut self, normalizer: Box<dyn Normalizer>) {
        self.members.push(normalizer);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Names of the members, in application order.
    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name()).collect()
    }
}

impl Normalizer for NormalizerChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn normalize(&self, text: &str) -> String {
        self.members
            .iter()
            .fold(text.to_string(), |acc, m| m.normalize(&acc))
    }

    fn canonical_key(&self, token: &str) -> String {
        self.members
            .iter()
            .fold(token.to_string(), |acc, m| m.canonical_key(&acc))
    }
}

/// Collapse whitespace runs to single spaces and trim both ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
