pub mod backtrace;
pub mod matrix;
pub mod types;

pub use backtrace::backtrace;
pub use matrix::{AlignmentMatrix, TIE_BREAK_ORDER};
pub use types::{tokenize, AlignmentResult, CostPolicy, Edit, EditKind, Operation, Token};
