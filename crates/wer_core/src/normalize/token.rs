use super::{collapse_whitespace, Normalizer};
use crate::error::NormalizerError;
use regex::Regex;
use std::collections::HashMap;

/// Phrases removed from every segment when no explicit list is given.
pub const DEFAULT_IGNORABLE_PHRASES: &[&str] = &["thank you"];

lazy_static::lazy_static! {
    static ref IRREGULAR_PLURALS: HashMap<&'static str, &'static str> = [
        ("children", "child"),
        ("people", "person"),
        ("men", "man"),
        ("women", "woman"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("oxen", "ox"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("leaves", "leaf"),
        ("halves", "half"),
        ("wolves", "wolf"),
        ("shelves", "shelf"),
        ("indices", "index"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
    ]
    .into_iter()
    .collect();
}

/// Canonical comparison key with plural forms folded to the singular.
///
/// The irregular table is consulted first (case-insensitive), then the
/// suffix rules in order: `ies` -> `y` (only for words longer than three
/// characters), `ses`/`zes`/`ches`/`shes` lose two characters, a plain
/// trailing `s` is dropped. The key is always lower-cased.
pub fn fold_plural(token: &str) -> String {
    let lower = token.to_lowercase();
    if let Some(singular) = IRREGULAR_PLURALS.get(lower.as_str()) {
        return (*singular).to_string();
    }
    // All suffixes are ASCII, so byte slicing stays on char boundaries.
    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if ["ses", "zes", "ches", "shes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return lower[..lower.len() - 2].to_string();
    }
    if lower.ends_with('s') {
        return lower[..lower.len() - 1].to_string();
    }
    lower
}

/// Strips ignorable phrases from text and folds plurals in token keys.
#[derive(Debug, Clone)]
pub struct TokenNormalizer {
    phrases: Vec<String>,
    patterns: Vec<Regex>,
}

impl TokenNormalizer {
    /// Normalizer with [`DEFAULT_IGNORABLE_PHRASES`].
    pub fn new() -> Self {
        let mut normalizer = Self::without_phrases();
        for phrase in DEFAULT_IGNORABLE_PHRASES {
            let pattern = phrase_pattern(phrase).expect("Invalid regex");
            normalizer.phrases.push((*phrase).to_string());
            normalizer.patterns.push(pattern);
        }
        normalizer
    }

    pub fn without_phrases() -> Self {
        Self {
            phrases: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn with_phrases<I, S>(phrases: I) -> Result<Self, NormalizerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalizer = Self::without_phrases();
        for phrase in phrases {
            let phrase = phrase.as_ref();
            normalizer.patterns.push(phrase_pattern(phrase)?);
            normalizer.phrases.push(collapse_whitespace(phrase));
        }
        Ok(normalizer)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Remove every configured phrase (case-insensitive substring match)
    /// and collapse the whitespace left behind.
    pub fn strip_phrases(&self, text: &str) -> String {
        if self.patterns.is_empty() {
            return collapse_whitespace(text);
        }
        let mut out = text.to_string();
        for pattern in &self.patterns {
            out = pattern.replace_all(&out, " ").into_owned();
        }
        collapse_whitespace(&out)
    }
}

impl Default for TokenNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer for TokenNormalizer {
    fn name(&self) -> &str {
        "token"
    }

    fn normalize(&self, text: &str) -> String {
        self.strip_phrases(text)
    }

    fn canonical_key(&self, token: &str) -> String {
        fold_plural(token)
    }
}

/// Words of the phrase may be separated by any whitespace run in the text.
fn phrase_pattern(phrase: &str) -> Result<Regex, NormalizerError> {
    let words = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>();
    if words.is_empty() {
        return Err(NormalizerError::EmptyPhrase);
    }
    Ok(Regex::new(&format!("(?i){}", words.join(r"\s+")))?)
}
