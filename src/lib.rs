//! # Crypto Chat Sentiment
//!
//! Day-wise sentiment of crypto chat messages. Messages are cleaned,
//! filtered to English texts mentioning the tracked coins (SHIB and DOGE by
//! default), scored with a lexicon-based polarity model and folded into one
//! row per calendar day.
//!
//! ## Modules
//!
//! - `nlp` - Text cleaning
//! - `filter` - Language and keyword gates
//! - `sentiment` - Polarity model and labelling
//! - `aggregation` - Per-day statistics
//! - `pipeline` - Orchestration, sequential or on the rayon pool
//! - `models` - Message records and chat export parsing
//! - `utils` - Configuration and logging
//!
//! ## Example Usage
//!
//! ```no_run
//! use crypto_chat_sentiment::{
//!     LexiconModel, Pipeline, PipelineConfig, RawMessage, WhatlangDetector,
//! };
//!
//! fn main() -> crypto_chat_sentiment::Result<()> {
//!     let detector = WhatlangDetector::new();
//!     let model = LexiconModel::new();
//!     let pipeline = Pipeline::new(&PipelineConfig::default(), &detector, &model)?;
//!
//!     let messages = vec![
//!         RawMessage::new("Doge is going to the moon, this is great news", "2021-05-10T08:00:00"),
//!         RawMessage::new("I really hate shib, it is a total scam", "2021-05-10T21:30:00"),
//!     ];
//!
//!     let summary = pipeline.run(&messages)?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod error;
pub mod filter;
pub mod models;
pub mod nlp;
pub mod pipeline;
pub mod sentiment;
pub mod utils;

// Re-exports for convenience
pub use aggregation::{DayAggregator, DayBucket, DaySummaryRow, DayWiseSummary, SentimentCounts};
pub use error::{Error, Result};
pub use filter::{
    DetectionError, KeywordGate, LanguageDetector, LanguageGate, LanguageVerdict, WhatlangDetector,
};
pub use models::{parse_export, NormalizedMessage, RawMessage, ScoredMessage, SentimentLabel};
pub use nlp::TextNormalizer;
pub use pipeline::{DropReason, Pipeline, Stage};
pub use sentiment::{EnglishLexicon, LexiconModel, PolarityModel, SentimentLexicon, SentimentScorer};
pub use utils::{init_logging, load_config, AppConfig, LoggingSettings, PipelineConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Coins a message must mention
    pub const KEYWORDS: &[&str] = &["shib", "doge"];

    /// Language to keep (ISO 639-1)
    pub const LANGUAGE_CODE: &str = "en";

    /// How many preceding words a negation reaches
    pub const NEGATION_WINDOW: usize = 3;

    /// Decimals kept in day averages
    pub const SCORE_DECIMALS: i32 = 4;
}
