mod dataset;
mod report;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use wer_config::ScoringSettings;
use wer_core::baseline::{plain_wer, BaselineStats};
use wer_core::{
    BasicTextNormalizer, CommentStripper, CostPolicy, Normalizer, NormalizerChain,
    TokenNormalizer, WerCalculator, WerPipeline,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Word error rate with classified errors")]
pub(crate) struct Args {
    /// Hypothesis transcript, one segment per line.
    #[arg(required_unless_present = "dataset", requires = "reference_file")]
    prediction_file: Option<PathBuf>,

    /// Reference transcript, line-aligned with the hypothesis file.
    reference_file: Option<PathBuf>,

    /// Directory scanned recursively for `<id>.ref.txt` / `<id>.hyp.txt` pairs.
    #[arg(long, conflicts_with_all = ["prediction_file", "reference_file"])]
    dataset: Option<PathBuf>,

    /// Config file (default: configs/wer.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Apply case/punctuation normalization.
    #[arg(long, short = 'n', overrides_with = "no_normalize")]
    normalize: bool,

    #[arg(long, overrides_with = "normalize")]
    no_normalize: bool,

    /// Remove bracketed comments such as `[noise]`.
    #[arg(long, short = 'r', overrides_with = "no_remove_comments")]
    remove_comments: bool,

    #[arg(long, overrides_with = "remove_comments")]
    no_remove_comments: bool,

    /// Extra hypothesis words cost nothing and are not counted as errors.
    #[arg(long, overrides_with = "no_ignore_insertions")]
    ignore_insertions: bool,

    #[arg(long, overrides_with = "ignore_insertions")]
    no_ignore_insertions: bool,

    /// Phrase to drop before scoring (repeatable; replaces the configured list).
    #[arg(long = "ignore-phrase")]
    ignore_phrases: Vec<String>,

    /// Output directory for results.jsonl + summary.json.
    #[arg(long, default_value = "target/wer")]
    out_dir: PathBuf,

    /// Fail when the aggregate WER (percent) exceeds this value.
    #[arg(long)]
    wer_threshold: Option<f64>,

    /// Print every segment's alignment.
    #[arg(long)]
    show_alignment: bool,

    /// Skip the exact-token Levenshtein cross-check.
    #[arg(long)]
    no_baseline: bool,
}

fn resolve_flag(on: bool, off: bool, configured: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        configured
    }
}

fn resolve_settings(args: &Args) -> anyhow::Result<ScoringSettings> {
    let configured = wer_config::load_scoring_settings(args.config.as_deref())?;
    let ignorable_phrases = if args.ignore_phrases.is_empty() {
        configured.ignorable_phrases
    } else {
        args.ignore_phrases.clone()
    };
    Ok(ScoringSettings {
        normalize: resolve_flag(args.normalize, args.no_normalize, configured.normalize),
        remove_comments: resolve_flag(
            args.remove_comments,
            args.no_remove_comments,
            configured.remove_comments,
        ),
        ignore_insertions: resolve_flag(
            args.ignore_insertions,
            args.no_ignore_insertions,
            configured.ignore_insertions,
        ),
        ignorable_phrases,
    })
}

fn text_normalizer(settings: &ScoringSettings) -> NormalizerChain {
    let mut chain = NormalizerChain::new();
    if settings.remove_comments {
        chain.push(Box::new(CommentStripper::new()));
    }
    if settings.normalize {
        chain.push(Box::new(BasicTextNormalizer::new()));
    }
    chain
}

fn build_pipeline(settings: &ScoringSettings) -> anyhow::Result<WerPipeline> {
    let tokens = TokenNormalizer::with_phrases(&settings.ignorable_phrases)
        .context("Invalid ignorable phrase")?;
    Ok(WerPipeline::new()
        .with_text_normalizer(Box::new(text_normalizer(settings)))
        .with_token_normalizer(Box::new(tokens))
        .with_policy(CostPolicy::new(settings.ignore_insertions)))
}

fn load_segments(args: &Args) -> anyhow::Result<Vec<dataset::Segment>> {
    if let Some(root) = &args.dataset {
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize dataset {}", root.display()))?;
        return dataset::build_dataset(&root);
    }
    match (&args.prediction_file, &args.reference_file) {
        (Some(prediction), Some(reference)) => dataset::paired_files(prediction, reference),
        _ => anyhow::bail!("Provide PREDICTION_FILE and REFERENCE_FILE, or --dataset"),
    }
}

fn preview(text: &str) -> String {
    let mut out = text.chars().take(50).collect::<String>();
    if text.chars().count() > 50 {
        out.push_str("...");
    }
    out
}

fn run(args: &Args, out_dir: &Path) -> anyhow::Result<()> {
    let settings = resolve_settings(args)?;
    log::info!(
        "[wer] normalize={} remove_comments={} ignore_insertions={} phrases={:?}",
        settings.normalize,
        settings.remove_comments,
        settings.ignore_insertions,
        settings.ignorable_phrases
    );

    let segments = load_segments(args)?;
    log::info!("[wer] {} segment(s)", segments.len());

    let baseline_text = text_normalizer(&settings);
    let mut calculator = WerCalculator::new(build_pipeline(&settings)?);
    calculator.reset();

    let mut results = Vec::with_capacity(segments.len());
    let mut baseline_total = BaselineStats::default();
    for seg in segments {
        log::debug!("[wer] {} hyp: {}", seg.id, preview(&seg.hypothesis));
        log::debug!("[wer] {} ref: {}", seg.id, preview(&seg.reference));
        let score = calculator.compute(&seg.reference, &seg.hypothesis);
        let baseline = if args.no_baseline {
            None
        } else {
            let b = plain_wer(
                &baseline_text.normalize(&seg.reference),
                &baseline_text.normalize(&seg.hypothesis),
            );
            baseline_total.merge(&b);
            Some(b)
        };
        if args.show_alignment {
            eprintln!("{}: {}", seg.id, report::render_alignment(&score.alignment));
        }
        results.push(report::SegmentResult {
            id: seg.id,
            reference: seg.reference,
            hypothesis: seg.hypothesis,
            stats: score.stats,
            baseline,
            operations: score.alignment,
        });
    }

    let results_path = out_dir.join("results.jsonl");
    report::write_results_jsonl(&results_path, &results)?;

    let baseline = (!args.no_baseline).then_some(baseline_total);
    let summary = report::Summary {
        generated_at: Local::now().to_rfc3339(),
        segments: calculator.segments(),
        settings,
        stats: calculator.stats(),
        baseline_wer: baseline.map(|b| b.wer()),
        baseline,
    };
    let summary_path = out_dir.join("summary.json");
    report::write_summary_json(&summary_path, &summary)?;
    log::info!(
        "[wer] wrote {} and {}",
        results_path.display(),
        summary_path.display()
    );

    report::print_summary_table(&summary, &results, args.wer_threshold);

    if let Some(th) = args.wer_threshold {
        if summary.stats.wer > th {
            anyhow::bail!(
                "aggregate WER {:.3} exceeds threshold {:.3}",
                summary.stats.wer,
                th
            );
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create out dir {}", args.out_dir.display()))?;

    run(&args, &args.out_dir)
}
