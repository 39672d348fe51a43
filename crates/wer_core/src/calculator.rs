use crate::alignment::AlignmentResult;
use crate::pipeline::WerPipeline;
use crate::stats::{ErrorCounts, ErrorExamples, StatsRecord};
use serde::{Deserialize, Serialize};

/// Result of scoring one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentScore {
    pub alignment: AlignmentResult,
    pub stats: StatsRecord,
}

/// Scores segments one after another and accumulates batch statistics.
///
/// Counts, example lists and alignments are appended per segment; call
/// [`WerCalculator::reset`] before scoring an unrelated batch. The
/// accumulators are plain fields owned by one caller.
#[derive(Debug)]
pub struct WerCalculator {
    pipeline: WerPipeline,
    counts: ErrorCounts,
    examples: ErrorExamples,
    alignments: Vec<AlignmentResult>,
}

impl WerCalculator {
    pub fn new(pipeline: WerPipeline) -> Self {
        Self {
            pipeline,
            counts: ErrorCounts::default(),
            examples: ErrorExamples::default(),
            alignments: Vec::new(),
        }
    }

    pub fn pipeline(&self) -> &WerPipeline {
        &self.pipeline
    }

    /// Score one segment, returning its own statistics and adding it to the
    /// running totals.
    pub fn compute(&mut self, reference: &str, hypothesis: &str) -> SegmentScore {
        let policy = self.pipeline.policy();
        let alignment = self.pipeline.align(reference, hypothesis);
        let counts = ErrorCounts::from_alignment(&alignment);
        let examples = ErrorExamples::collect(&alignment, policy);
        let stats = StatsRecord::from_parts(&counts, examples.clone(), policy);

        self.counts.merge(&counts);
        self.examples.extend(examples);
        self.alignments.push(alignment.clone());
        log::debug!(
            "[wer] segment {} wer={:.2} errors={}/{}",
            self.alignments.len(),
            stats.wer,
            stats.total_errors,
            stats.total_words
        );

        SegmentScore { alignment, stats }
    }

    /// Statistics over every segment since the last reset.
    pub fn stats(&self) -> StatsRecord {
        StatsRecord::from_parts(&self.counts, self.examples.clone(), self.pipeline.policy())
    }

    pub fn counts(&self) -> ErrorCounts {
        self.counts
    }

    pub fn examples(&self) -> &ErrorExamples {
        &self.examples
    }

    pub fn alignments(&self) -> &[AlignmentResult] {
        &self.alignments
    }

    pub fn segments(&self) -> usize {
        self.alignments.len()
    }

    /// Clear counts, example lists and stored alignments.
    pub fn reset(&mut self) {
        self.counts = ErrorCounts::default();
        self.examples.clear();
        self.alignments.clear();
    }
}

impl Default for WerCalculator {
    fn default() -> Self {
        Self::new(WerPipeline::new())
    }
}
