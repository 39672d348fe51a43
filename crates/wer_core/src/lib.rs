//! # wer_core
//!
//! Word error rate scoring for speech recognition output.
//!
//! A reference and a hypothesis transcript are normalized, split into tokens,
//! aligned with a dynamic-programming edit distance and folded into error
//! statistics. Every divergence is classified as a substitution, deletion or
//! insertion so reports can show *which* words went wrong, not only how many.
//!
//! ## Example
//!
//! ```rust
//! use wer_core::{CostPolicy, WerPipeline};
//!
//! let pipeline = WerPipeline::new().with_policy(CostPolicy::default());
//! let (alignment, stats) = pipeline.score("the cat sat", "a cat sit");
//! assert_eq!(alignment.len(), 3);
//! assert_eq!(stats.total_errors, 2);
//! ```

pub mod alignment;
pub mod baseline;
pub mod calculator;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod stats;

pub use alignment::{
    AlignmentMatrix, AlignmentResult, CostPolicy, Edit, EditKind, Operation, Token,
    TIE_BREAK_ORDER,
};
pub use calculator::{SegmentScore, WerCalculator};
pub use error::{CoverageError, NormalizerError};
pub use normalize::{
    BasicTextNormalizer, CommentStripper, Normalizer, NormalizerChain, TokenNormalizer,
};
pub use pipeline::WerPipeline;
pub use stats::{ErrorCounts, ErrorExamples, StatsRecord};
