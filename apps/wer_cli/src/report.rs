use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;
use wer_config::ScoringSettings;
use wer_core::baseline::BaselineStats;
use wer_core::{AlignmentResult, StatsRecord};

/// Number of examples per category printed in the summary table.
const EXAMPLES_SHOWN: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct SegmentResult {
    pub id: String,
    pub reference: String,
    pub hypothesis: String,
    pub stats: StatsRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselineStats>,
    pub operations: AlignmentResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub generated_at: String,
    pub segments: usize,
    pub settings: ScoringSettings,
    pub stats: StatsRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselineStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_wer: Option<f64>,
}

pub fn write_results_jsonl(path: &Path, results: &[SegmentResult]) -> anyhow::Result<()> {
    let mut out = String::new();
    for r in results {
        out.push_str(&serde_json::to_string(r)?);
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &Summary) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string_pretty(summary)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// One-line rendering of an alignment, e.g. `Substitute(a/the) Equal(cat)`.
pub fn render_alignment(alignment: &AlignmentResult) -> String {
    alignment
        .iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_examples<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    items
        .into_iter()
        .take(EXAMPLES_SHOWN)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_summary_table(summary: &Summary, results: &[SegmentResult], threshold: Option<f64>) {
    let stats = &summary.stats;
    eprintln!();
    eprintln!("{}", "=".repeat(50));
    eprintln!(
        "Configuration: normalize={}, remove_comments={}, ignore_insertions={}",
        summary.settings.normalize,
        summary.settings.remove_comments,
        summary.settings.ignore_insertions
    );
    eprintln!("segments    : {}", summary.segments);
    eprintln!("WER         : {:.3}", stats.wer);
    eprintln!("accuracy    : {:.1}%", stats.accuracy);
    eprintln!(
        "subs        : {:.1}% ({})",
        stats.substitution_rate, stats.substitutions
    );
    eprintln!("dels        : {:.1}% ({})", stats.deletion_rate, stats.deletions);
    eprintln!("ins         : {:.1}% ({})", stats.insertion_rate, stats.insertions);
    eprintln!("total words : {}", stats.total_words);
    eprintln!("total errors: {}", stats.total_errors);
    if let (Some(wer), Some(base)) = (summary.baseline_wer, summary.baseline.as_ref()) {
        eprintln!(
            "baseline WER: {:.3} (edits={} / ref_words={})",
            wer * 100.0,
            base.edits,
            base.ref_words
        );
    }
    if let Some(t) = threshold {
        eprintln!("threshold   : {:.3}", t);
    }

    let examples = &stats.examples;
    if !examples.is_empty() {
        eprintln!();
        eprintln!("examples:");
        if !examples.substitutions.is_empty() {
            eprintln!(
                "  sub: {}",
                join_examples(
                    examples
                        .substitutions
                        .iter()
                        .map(|(hyp, reference)| format!("{hyp}->{reference}"))
                )
            );
        }
        if !examples.deletions.is_empty() {
            eprintln!("  del: {}", join_examples(examples.deletions.iter().cloned()));
        }
        if !examples.insertions.is_empty() {
            eprintln!("  ins: {}", join_examples(examples.insertions.iter().cloned()));
        }
    }

    let mut worst = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.stats.total_errors > 0)
        .map(|(i, r)| (i, r.stats.wer))
        .collect::<Vec<_>>();
    worst.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    if !worst.is_empty() {
        eprintln!();
        eprintln!("worst_wer:");
        for (i, w) in worst.into_iter().take(10) {
            let r = &results[i];
            eprintln!(
                "  {:>8.2}  {}  ({}/{})",
                w, r.id, r.stats.total_errors, r.stats.total_words
            );
        }
    }
    eprintln!("{}", "=".repeat(50));
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wer_core::WerPipeline;

    fn sample_result() -> SegmentResult {
        let (operations, stats) = WerPipeline::new().score("the cat sat", "a cat sit");
        SegmentResult {
            id: "line-1".to_string(),
            reference: "the cat sat".to_string(),
            hypothesis: "a cat sit".to_string(),
            stats,
            baseline: None,
            operations,
        }
    }

    #[test]
    fn test_render_alignment() {
        let result = sample_result();
        assert_eq!(
            render_alignment(&result.operations),
            "Substitute(a/the) Equal(cat) Substitute(sit/sat)"
        );
    }

    #[test]
    fn test_write_results_jsonl() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.jsonl");
        write_results_jsonl(&path, &[sample_result(), sample_result()])?;
        let text = fs::read_to_string(&path)?;
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        let row: serde_json::Value = serde_json::from_str(lines[0])?;
        assert_eq!(row["id"], "line-1");
        assert_eq!(row["stats"]["total_errors"], 2);
        assert_eq!(row["operations"][0]["kind"], "substitute");
        assert!(row.get("baseline").is_none());
        Ok(())
    }
}
