use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wer_core::alignment::tokenize;
use wer_core::{CostPolicy, EditKind, WerPipeline};

const VOCAB: &[&str] = &["a", "b", "c", "d", "cat", "cats", "dog"];
const EXTRAS: &[&str] = &["x", "y", "z"];

fn random_text(rng: &mut ChaCha8Rng, vocab: &[&str], max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| vocab[rng.gen_range(0..vocab.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn edit_distance(a: &[&str], b: &[&str]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        table[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let sub = table[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]);
            table[i][j] = sub.min(table[i - 1][j] + 1).min(table[i][j - 1] + 1);
        }
    }
    table[a.len()][b.len()]
}

fn pipelines() -> [WerPipeline; 2] {
    [
        WerPipeline::new().with_policy(CostPolicy::new(false)),
        WerPipeline::new().with_policy(CostPolicy::new(true)),
    ]
}

#[test]
fn test_worked_example() {
    let (result, stats) = WerPipeline::new().score("the cat sat", "a cat sit");
    let rendered = result.iter().map(|op| op.to_string()).collect::<Vec<_>>();
    assert_eq!(
        rendered,
        vec!["Substitute(a/the)", "Equal(cat)", "Substitute(sit/sat)"]
    );
    assert_eq!(stats.total_words, 3);
    assert_eq!(stats.total_errors, 2);
    assert!((stats.wer - 66.666_666).abs() < 1e-3);
    assert!((stats.accuracy - 33.333_333).abs() < 1e-3);
}

#[test]
fn test_empty_reference() {
    let (result, stats) = WerPipeline::new().score("", "hello");
    assert_eq!(result.kinds(), vec![EditKind::Insert]);
    assert_eq!(stats.total_words, 1);
    assert_eq!(stats.insertions, 1);
    assert_eq!(stats.total_errors, 1);
    assert_eq!(stats.wer, 100.0);
    assert_eq!(stats.examples.insertions, vec!["hello"]);
}

#[test]
fn test_empty_reference_with_free_insertions() {
    let pipeline = WerPipeline::new().with_policy(CostPolicy::new(true));
    let (result, stats) = pipeline.score("", "hello there");
    assert_eq!(result.count(EditKind::Insert), 2);
    assert_eq!(stats.total_words, 1);
    assert_eq!(stats.insertions, 0);
    assert_eq!(stats.total_errors, 0);
    assert_eq!(stats.wer, 0.0);
}

#[test]
fn test_plural_folding_aligns_as_equal() {
    let (result, stats) = WerPipeline::new().score("cat", "cats");
    assert_eq!(result.kinds(), vec![EditKind::Equal]);
    assert_eq!(result.hypothesis_tokens(), vec!["cats"]);
    assert_eq!(result.reference_tokens(), vec!["cat"]);
    assert_eq!(stats.total_errors, 0);
}

#[test]
fn test_identity_alignment() {
    let text = "the quick brown fox jumps over the lazy dog";
    for pipeline in pipelines() {
        let (result, stats) = pipeline.score(text, text);
        assert!(result.iter().all(|op| op.kind() == EditKind::Equal));
        assert_eq!(result.len(), 9);
        assert_eq!(stats.wer, 0.0);
    }
}

#[test]
fn test_ignorable_phrase_is_not_an_error() {
    let (result, stats) = WerPipeline::new().score("see you soon", "see you soon thank you");
    assert_eq!(result.len(), 3);
    assert_eq!(stats.total_errors, 0);
}

#[test]
fn test_tie_break_attribution() {
    // Both policies find cost-2 paths; the stored choices decide which
    // words are reported as deleted and inserted.
    let (result, stats) = WerPipeline::new().score("a b a", "b a b");
    assert_eq!(
        result.kinds(),
        vec![
            EditKind::Delete,
            EditKind::Equal,
            EditKind::Equal,
            EditKind::Insert
        ]
    );
    assert_eq!(stats.examples.deletions, vec!["a"]);
    assert_eq!(stats.examples.insertions, vec!["b"]);
}

#[test]
fn test_free_insertions_change_attribution() {
    let counted = WerPipeline::new();
    let free = WerPipeline::new().with_policy(CostPolicy::new(true));

    let (result, stats) = counted.score("a b", "b a");
    assert_eq!(
        result.kinds(),
        vec![EditKind::Substitute, EditKind::Substitute]
    );
    assert_eq!(stats.total_errors, 2);

    let (result, stats) = free.score("a b", "b a");
    assert_eq!(
        result.kinds(),
        vec![EditKind::Delete, EditKind::Equal, EditKind::Insert]
    );
    assert_eq!(stats.total_errors, 1);
    assert_eq!(stats.deletions, 1);
    assert_eq!(stats.insertions, 0);
}

#[test]
fn test_coverage_and_count_identities() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let reference = random_text(&mut rng, VOCAB, 8);
        let hypothesis = random_text(&mut rng, VOCAB, 8);
        for pipeline in pipelines() {
            let result = pipeline.align(&reference, &hypothesis);
            let r = tokenize(&reference);
            let h = tokenize(&hypothesis);

            assert_eq!(result.reference_tokens(), r);
            assert_eq!(result.hypothesis_tokens(), h);
            let equal = result.count(EditKind::Equal);
            let sub = result.count(EditKind::Substitute);
            assert_eq!(equal + sub + result.count(EditKind::Delete), r.len());
            assert_eq!(equal + sub + result.count(EditKind::Insert), h.len());
        }
    }
}

#[test]
fn test_operation_cost_matches_edit_distance() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..100 {
        let reference = random_text(&mut rng, &["a", "b", "c"], 7);
        let hypothesis = random_text(&mut rng, &["a", "b", "c"], 7);
        let result = WerPipeline::new().align(&reference, &hypothesis);
        let expected = edit_distance(&tokenize(&reference), &tokenize(&hypothesis));
        // No plurals in this vocabulary, so keys are the tokens themselves.
        assert_eq!(result.cost(CostPolicy::default()), expected);
        let baseline = wer_core::baseline::plain_wer(&reference, &hypothesis);
        assert_eq!(baseline.edits, expected);
    }
}

#[test]
fn test_determinism() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    for _ in 0..50 {
        let reference = random_text(&mut rng, VOCAB, 10);
        let hypothesis = random_text(&mut rng, VOCAB, 10);
        for pipeline in pipelines() {
            let first = pipeline.score(&reference, &hypothesis);
            let second = pipeline.score(&reference, &hypothesis);
            assert_eq!(
                serde_json::to_string(&first.0).unwrap(),
                serde_json::to_string(&second.0).unwrap()
            );
            assert_eq!(
                serde_json::to_string(&first.1).unwrap(),
                serde_json::to_string(&second.1).unwrap()
            );
        }
    }
}

#[test]
fn test_insertion_free_invariance() {
    let pipeline = WerPipeline::new().with_policy(CostPolicy::new(true));
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..200 {
        let reference = random_text(&mut rng, VOCAB, 8);
        let hypothesis = random_text(&mut rng, VOCAB, 8);
        let extra = random_text(&mut rng, EXTRAS, 4);
        let extended = format!("{hypothesis} {extra}");

        let (_, base) = pipeline.score(&reference, &hypothesis);
        let (_, more) = pipeline.score(&reference, &extended);
        assert_eq!(base.total_words, more.total_words);
        assert_eq!(base.total_errors, more.total_errors, "{reference:?} / {extended:?}");
        assert_eq!(base.wer, more.wer);
    }
}
