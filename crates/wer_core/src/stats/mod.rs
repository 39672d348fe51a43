pub mod counts;
pub mod record;

pub use counts::{ErrorCounts, ErrorExamples};
pub use record::{aggregate, StatsRecord};
