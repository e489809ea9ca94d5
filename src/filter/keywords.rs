//! Keyword gate
//!
//! Case-insensitive substring search for the tracked coin names.

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};

/// Gate passing texts that mention at least one keyword
#[derive(Debug, Clone)]
pub struct KeywordGate {
    /// Lower-cased keywords in pattern order
    keywords: Vec<String>,
    /// Alternation of all keywords; `None` when there are no keywords
    pattern: Option<Regex>,
}

impl KeywordGate {
    /// Compile a gate from a keyword set
    ///
    /// Keywords are matched literally, anywhere in the text, ignoring case.
    /// Blank keywords are rejected since they would match every message.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(Error::InvalidKeyword("keyword must not be blank".to_string()));
            }
            if !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        let pattern = if normalized.is_empty() {
            None
        } else {
            let alternation = normalized
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&alternation)
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::InvalidKeyword(e.to_string()))?;
            Some(regex)
        };

        Ok(Self {
            keywords: normalized,
            pattern,
        })
    }

    /// Configured keywords, lower-cased
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True if any keyword occurs in `text`
    pub fn matches(&self, text: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }

    /// First keyword occurrence in `text`, lower-cased
    pub fn first_match(&self, text: &str) -> Option<String> {
        self.pattern
            .as_ref()?
            .find(text)
            .map(|m| m.as_str().to_lowercase())
    }
}
