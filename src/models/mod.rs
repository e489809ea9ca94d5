//! Data models for chat messages and the day-wise summary

mod export;
mod types;

pub use export::{parse_export, ChatExport};
pub use types::{NormalizedMessage, RawMessage, ScoredMessage, SentimentLabel};
