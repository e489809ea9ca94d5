//! Text cleaning
//!
//! Strips chat noise (mentions, links, bracketed spans, symbols) before
//! language detection and keyword matching.

mod normalizer;

pub use normalizer::TextNormalizer;
