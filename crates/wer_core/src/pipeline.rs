use crate::alignment::{backtrace, tokenize, AlignmentMatrix, AlignmentResult, CostPolicy, Token};
use crate::normalize::{Normalizer, NormalizerChain, TokenNormalizer};
use crate::stats::{aggregate, StatsRecord};
use std::fmt;

/// Normalization, tokenization and alignment for one segment at a time.
///
/// The text normalizer runs first (case, numbers, comments, ...), then the
/// token normalizer strips ignorable phrases and supplies the canonical keys
/// used both in the matrix and in the post-backtrace reconciliation.
/// Matrices are allocated per call and dropped before returning.
pub struct WerPipeline {
    text: Box<dyn Normalizer>,
    tokens: Box<dyn Normalizer>,
    policy: CostPolicy,
}

impl WerPipeline {
    /// No text normalization, default [`TokenNormalizer`], insertions counted.
    pub fn new() -> Self {
        Self {
            text: Box::new(NormalizerChain::new()),
            tokens: Box::new(TokenNormalizer::new()),
            policy: CostPolicy::default(),
        }
    }

    pub fn with_text_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.text = normalizer;
        self
    }

    pub fn with_token_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.tokens = normalizer;
        self
    }

    pub fn with_policy(mut self, policy: CostPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CostPolicy {
        self.policy
    }

    /// Text after both normalization stages, before tokenization.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.text.normalize(text);
        self.tokens.normalize(&text)
    }

    /// Normalized tokens with their canonical keys.
    pub fn prepare(&self, text: &str) -> Vec<Token> {
        let normalized = self.normalize(text);
        tokenize(&normalized)
            .into_iter()
            .map(|t| Token::new(t, &*self.tokens))
            .collect()
    }

    /// Align a hypothesis against its reference.
    ///
    /// # Panics
    ///
    /// If the operation sequence fails to consume every token of both sides
    /// exactly once. That can only result from a defect in the alignment.
    pub fn align(&self, reference: &str, hypothesis: &str) -> AlignmentResult {
        let reference = self.prepare(reference);
        let hypothesis = self.prepare(hypothesis);
        if reference.is_empty() && !hypothesis.is_empty() {
            log::warn!(
                "[wer] empty reference against {} hypothesis token(s); word count floored to 1",
                hypothesis.len()
            );
        }

        let matrix = AlignmentMatrix::build(&reference, &hypothesis, self.policy);
        let result = backtrace(&matrix, &reference, &hypothesis, &*self.tokens);
        if let Err(err) = result.verify_coverage(&reference, &hypothesis) {
            panic!("alignment does not cover its inputs: {err}");
        }
        log::debug!(
            "[wer] aligned ref={} hyp={} cost={} ops={}",
            reference.len(),
            hypothesis.len(),
            matrix.total_cost(),
            result.len()
        );
        result
    }

    /// Align and fold into statistics.
    pub fn score(&self, reference: &str, hypothesis: &str) -> (AlignmentResult, StatsRecord) {
        let result = self.align(reference, hypothesis);
        let stats = aggregate(&result, self.policy);
        (result, stats)
    }
}

impl Default for WerPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WerPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WerPipeline")
            .field("text", &self.text.name())
            .field("tokens", &self.tokens.name())
            .field("policy", &self.policy)
            .finish()
    }
}
