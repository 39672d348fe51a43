use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const REF_SUFFIX: &str = ".ref.txt";
const HYP_SUFFIX: &str = ".hyp.txt";

/// One reference/hypothesis pair to score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub reference: String,
    pub hypothesis: String,
}

pub fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file {}", path.display()))?;
    Ok(text.lines().map(|line| line.trim().to_string()).collect())
}

/// Pair two line-aligned files. Line `n` of each file forms segment `n`;
/// surplus lines of the longer file are skipped.
pub fn paired_files(prediction: &Path, reference: &Path) -> anyhow::Result<Vec<Segment>> {
    let hypotheses = read_lines(prediction)?;
    let references = read_lines(reference)?;
    if hypotheses.len() != references.len() {
        log::warn!(
            "[wer] line count mismatch: {} has {}, {} has {}; scoring the first {}",
            prediction.display(),
            hypotheses.len(),
            reference.display(),
            references.len(),
            hypotheses.len().min(references.len())
        );
    }
    Ok(hypotheses
        .into_iter()
        .zip(references)
        .enumerate()
        .map(|(idx, (hypothesis, reference))| Segment {
            id: format!("line-{}", idx + 1),
            reference,
            hypothesis,
        })
        .collect())
}

fn segment_id(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(REF_SUFFIX))
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
}

fn hypothesis_path_for(reference: &Path, id: &str) -> anyhow::Result<PathBuf> {
    Ok(reference
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Reference has no parent dir: {}", reference.display()))?
        .join(format!("{id}{HYP_SUFFIX}")))
}

fn read_segment_text(path: &Path) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Scan `root` recursively for `<id>.ref.txt` files with a sibling
/// `<id>.hyp.txt`. Each file pair is one segment; results are sorted by id.
pub fn build_dataset(root: &Path) -> anyhow::Result<Vec<Segment>> {
    let mut segments = Vec::new();

    for ent in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !ent.file_type().is_file() {
            continue;
        }
        let p = ent.path();
        let Some(id) = segment_id(p) else {
            continue;
        };
        let hyp_path = hypothesis_path_for(p, &id)?;
        if !hyp_path.exists() {
            anyhow::bail!(
                "Missing hypothesis for {} (expected {})",
                p.display(),
                hyp_path.display()
            );
        }
        segments.push(Segment {
            id,
            reference: read_segment_text(p)?,
            hypothesis: read_segment_text(&hyp_path)?,
        });
    }

    if segments.is_empty() {
        anyhow::bail!("No *{} files found under {}", REF_SUFFIX, root.display());
    }
    segments.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_id() {
        assert_eq!(
            segment_id(Path::new("/tmp/a/1272-0009.ref.txt")),
            Some("1272-0009".to_string())
        );
        assert_eq!(segment_id(Path::new("/tmp/a/1272-0009.hyp.txt")), None);
        assert_eq!(segment_id(Path::new("/tmp/a/.ref.txt")), None);
    }

    #[test]
    fn test_paired_files_truncates_to_shorter() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let hyp = dir.path().join("hyp.txt");
        let reference = dir.path().join("ref.txt");
        fs::write(&hyp, "a cat sit\n  hello  \nextra line\n")?;
        fs::write(&reference, "the cat sat\nhello\n")?;
        let segments = paired_files(&hyp, &reference)?;
        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0],
            Segment {
                id: "line-1".to_string(),
                reference: "the cat sat".to_string(),
                hypothesis: "a cat sit".to_string(),
            }
        );
        assert_eq!(segments[1].hypothesis, "hello");
        Ok(())
    }

    #[test]
    fn test_build_dataset() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("spk1");
        fs::create_dir_all(&nested)?;
        fs::write(nested.join("b.ref.txt"), "second\nsegment\n")?;
        fs::write(nested.join("b.hyp.txt"), "second segment")?;
        fs::write(dir.path().join("a.ref.txt"), "first")?;
        fs::write(dir.path().join("a.hyp.txt"), "frist")?;
        fs::write(dir.path().join("notes.txt"), "ignored")?;

        let segments = build_dataset(dir.path())?;
        let ids = segments.iter().map(|s| s.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(segments[1].reference, "second segment");
        assert_eq!(segments[0].hypothesis, "frist");
        Ok(())
    }

    #[test]
    fn test_build_dataset_missing_hypothesis() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.ref.txt"), "first")?;
        let err = build_dataset(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Missing hypothesis"));
        Ok(())
    }

    #[test]
    fn test_build_dataset_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(build_dataset(dir.path()).is_err());
        Ok(())
    }
}
