use thiserror::Error;

/// Raised when an operation sequence does not consume both token lists
/// exactly once. This is a defect in the matrix or backtrace, never a
/// property of the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
    #[error("reference replay mismatch: expected {expected} tokens, replayed {replayed}")]
    ReferenceLength { expected: usize, replayed: usize },
    #[error("hypothesis replay mismatch: expected {expected} tokens, replayed {replayed}")]
    HypothesisLength { expected: usize, replayed: usize },
    #[error("reference token {index} replayed as {found:?}, expected {expected:?}")]
    ReferenceToken {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("hypothesis token {index} replayed as {found:?}, expected {expected:?}")]
    HypothesisToken {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("operation at index {index} carries position {position}")]
    Position { index: usize, position: usize },
}

/// Errors building a normalizer from user-supplied settings.
#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Ignorable phrase must not be empty")]
    EmptyPhrase,
    #[error("Invalid ignorable phrase pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
