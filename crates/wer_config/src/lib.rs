use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Scoring options shared by the CLI and library callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringSettings {
    /// Apply case/punctuation normalization before tokenizing.
    pub normalize: bool,
    /// Strip bracketed annotator comments such as `[noise]`.
    pub remove_comments: bool,
    /// Treat extra hypothesis words as free.
    pub ignore_insertions: bool,
    /// Phrases removed from both sides before alignment.
    pub ignorable_phrases: Vec<String>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            normalize: true,
            remove_comments: true,
            ignore_insertions: false,
            ignorable_phrases: default_phrases(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ScoringToml {
    #[serde(default = "default_true")]
    normalize: bool,
    #[serde(default = "default_true")]
    remove_comments: bool,
    #[serde(default)]
    ignore_insertions: bool,
    #[serde(default = "default_phrases")]
    ignorable_phrases: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_phrases() -> Vec<String> {
    vec!["thank you".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    scoring: Option<ScoringToml>,
}

/// Default config locations, tried in order when no path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/wer.toml", "../../configs/wer.toml"];

/// Read the config text.
///
/// An explicit path must exist. Without one, the first readable default path
/// wins and `Ok(None)` means none was found.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &DEFAULT_CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

pub fn parse_scoring_settings(text: &str) -> anyhow::Result<ScoringSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse wer.toml scoring settings: {e}"))?;
    let Some(cfg) = root.scoring else {
        return Ok(ScoringSettings::default());
    };
    let ScoringToml {
        normalize,
        remove_comments,
        ignore_insertions,
        ignorable_phrases,
    } = cfg;
    validate_phrases(&ignorable_phrases)?;
    Ok(ScoringSettings {
        normalize,
        remove_comments,
        ignore_insertions,
        ignorable_phrases,
    })
}

fn validate_phrases(phrases: &[String]) -> anyhow::Result<()> {
    for (idx, phrase) in phrases.iter().enumerate() {
        if phrase.trim().is_empty() {
            anyhow::bail!("scoring.ignorable_phrases[{idx}] must not be empty");
        }
    }
    Ok(())
}

/// Load `[scoring]` from `explicit` or the default locations, falling back
/// to [`ScoringSettings::default`] when no default file exists.
pub fn load_scoring_settings(explicit: Option<&Path>) -> anyhow::Result<ScoringSettings> {
    match read_config_text(explicit)? {
        Some((path, text)) => parse_scoring_settings(&text)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display())),
        None => Ok(ScoringSettings::default()),
    }
}
