use super::{collapse_whitespace, Normalizer};
use regex::Regex;

lazy_static::lazy_static! {
    static ref COMMENT: Regex = Regex::new(r"\[\w+\]").expect("Invalid regex");
    static ref CONTROL_WS: Regex = Regex::new(r"[\t\r\n]").expect("Invalid regex");
    static ref QUOTES_BRACKETS: Regex = Regex::new(r#"["()\[\]]"#).expect("Invalid regex");
    static ref PUNCT_BEFORE_SPACE: Regex = Regex::new(r"[,.?!]+ ").expect("Invalid regex");
    static ref PUNCT_AT_END: Regex = Regex::new(r"[,.?!]+$").expect("Invalid regex");
    static ref PUNCT_AFTER_SPACE: Regex = Regex::new(r" [,.?!]+").expect("Invalid regex");
}

/// Removes bracketed annotator comments such as `[laughter]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentStripper;

impl CommentStripper {
    pub fn new() -> Self {
        Self
    }
}

impl Normalizer for CommentStripper {
    fn name(&self) -> &str {
        "comment_stripper"
    }

    fn normalize(&self, text: &str) -> String {
        collapse_whitespace(&COMMENT.replace_all(text, " "))
    }
}

/// Case and punctuation folding for transcripts.
///
/// Lower-cases, drops `$`, turns tabs and newlines into spaces, removes
/// quotes, brackets and parentheses, and strips runs of `,.?!` at word
/// edges. Apostrophes and inner punctuation (`3.5`, `it's`) survive.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTextNormalizer;

impl BasicTextNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Normalizer for BasicTextNormalizer {
    fn name(&self) -> &str {
        "basic_text"
    }

    fn normalize(&self, text: &str) -> String {
        let s = text.to_lowercase().replace('$', "");
        let s = CONTROL_WS.replace_all(&s, " ");
        let s = QUOTES_BRACKETS.replace_all(&s, "");
        let s = PUNCT_BEFORE_SPACE.replace_all(&s, " ");
        let s = PUNCT_AT_END.replace_all(&s, " ");
        let s = PUNCT_AFTER_SPACE.replace_all(&s, " ");
        collapse_whitespace(&s)
    }
}
