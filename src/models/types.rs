//! Typed records flowing through the pipeline

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A chat message as handed over by the ingestion side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Message body; rich-text fragments are flattened on load
    #[serde(default, deserialize_with = "flatten_text")]
    pub text: String,
    /// ISO 8601 timestamp, e.g. `2021-05-10T14:03:11`
    #[serde(rename = "date")]
    pub timestamp: String,
}

impl RawMessage {
    /// Create a new raw message
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// A raw message together with its cleaned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage {
    /// Untouched source record
    pub raw: RawMessage,
    /// Text with mentions, links, bracketed spans and symbols removed
    pub cleaned_text: String,
}

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Polarity above zero
    Positive,
    /// Polarity exactly zero
    Neutral,
    /// Polarity below zero
    Negative,
}

impl SentimentLabel {
    /// Label for a polarity value; only the sign matters
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized message with its sentiment
///
/// The label is always derived from the stored polarity, so the two can
/// never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMessage {
    message: NormalizedMessage,
    label: SentimentLabel,
    score: f64,
}

impl ScoredMessage {
    /// Attach a polarity to a normalized message
    pub fn new(message: NormalizedMessage, score: f64) -> Self {
        Self {
            label: SentimentLabel::from_polarity(score),
            message,
            score,
        }
    }

    pub fn message(&self) -> &NormalizedMessage {
        &self.message
    }

    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Timestamp of the underlying raw message
    pub fn timestamp(&self) -> &str {
        &self.message.raw.timestamp
    }
}

/// Shapes the `text` field takes in chat exports
#[derive(Deserialize)]
#[serde(untagged)]
enum TextField {
    Plain(String),
    Rich(Vec<TextFragment>),
    Other(serde_json::Value),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextFragment {
    Plain(String),
    Entity {
        #[serde(default)]
        text: String,
    },
    Other(serde_json::Value),
}

fn flatten_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<TextField>::deserialize(deserializer)?;

    Ok(match field {
        None => String::new(),
        Some(TextField::Plain(text)) => text,
        Some(TextField::Rich(fragments)) => fragments
            .into_iter()
            .map(|fragment| match fragment {
                TextFragment::Plain(text) | TextFragment::Entity { text } => text,
                TextFragment::Other(value) => value.as_str().unwrap_or_default().to_string(),
            })
            .collect(),
        Some(TextField::Other(serde_json::Value::Null)) => String::new(),
        Some(TextField::Other(value)) => value.to_string(),
    })
}
