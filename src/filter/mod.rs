//! Message gates
//!
//! A gate either lets a message through unchanged or drops it:
//! - `LanguageGate` keeps messages in the configured language
//! - `KeywordGate` keeps messages mentioning one of the tracked coins

mod keywords;
mod language;

pub use keywords::KeywordGate;
pub use language::{
    DetectionError, LanguageDetector, LanguageGate, LanguageVerdict, WhatlangDetector,
};
