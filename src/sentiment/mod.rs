//! Sentiment analysis module
//!
//! Includes:
//! - Lexicon-based polarity model
//! - Sign-based labelling of polarity scores

mod lexicon;
mod scorer;

pub use lexicon::{EnglishLexicon, SentimentLexicon};
pub use scorer::{LexiconModel, PolarityModel, SentimentScorer};
