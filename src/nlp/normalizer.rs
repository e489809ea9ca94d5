//! Text normalizer
//!
//! Keeps ASCII letters and digits, turns everything else into spaces and
//! collapses whitespace.

use crate::models::{NormalizedMessage, RawMessage};
use regex::Regex;
use std::sync::LazyLock;

/// One pass over the text; alternatives are tried left to right at each position.
///
/// - `@name` mentions
/// - `scheme://...` links up to the next whitespace
/// - `{...}` spans including their content
/// - any single character that is not an ASCII letter, digit or whitespace
static NOISE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@[A-Za-z0-9]+|\w+://\S+|\{[^}]*\}|[^0-9A-Za-z\s]").unwrap()
});

/// Text normalizer for chat messages
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new normalizer
    pub fn new() -> Self {
        Self
    }

    /// Clean a piece of text
    ///
    /// Never fails; the result may be empty.
    pub fn normalize(&self, text: &str) -> String {
        let stripped = NOISE_REGEX.replace_all(text, " ");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Clean a raw message, keeping the original next to the cleaned text
    pub fn normalize_message(&self, raw: &RawMessage) -> NormalizedMessage {
        NormalizedMessage {
            cleaned_text: self.normalize(&raw.text),
            raw: raw.clone(),
        }
    }
}
