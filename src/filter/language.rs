//! Language gate
//!
//! Classifier failures are a verdict of their own rather than an error, so
//! callers can tell "detected another language" from "could not tell".

use thiserror::Error;
use tracing::trace;

/// Why a detector could not name a language
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// Nothing alphabetic to look at (empty, digits or symbols only)
    #[error("no alphabetic features in text")]
    NoFeatures,

    /// The classifier gave up on the input
    #[error("language could not be determined")]
    Undetermined,
}

/// Language identification model
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of `text` as an ISO 639-1 code (`en`, `ru`, ...)
    fn detect(&self, text: &str) -> Result<String, DetectionError>;
}

/// Detector backed by the `whatlang` trigram classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    /// Create a new detector
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String, DetectionError> {
        if !text.chars().any(char::is_alphabetic) {
            return Err(DetectionError::NoFeatures);
        }

        let info = whatlang::detect(text).ok_or(DetectionError::Undetermined)?;
        trace!(
            lang = info.lang().code(),
            confidence = info.confidence(),
            "whatlang detection"
        );

        Ok(iso639_1(info.lang()).to_string())
    }
}

/// Map whatlang's ISO 639-3 codes onto ISO 639-1
///
/// Every language whatlang knows has a two-letter code; an unknown code is
/// passed through unchanged.
fn iso639_1(lang: whatlang::Lang) -> &'static str {
    match lang.code() {
        "epo" => "eo",
        "eng" => "en",
        "rus" => "ru",
        "cmn" => "zh",
        "spa" => "es",
        "por" => "pt",
        "ita" => "it",
        "ben" => "bn",
        "fra" => "fr",
        "deu" => "de",
        "ukr" => "uk",
        "kat" => "ka",
        "ara" => "ar",
        "hin" => "hi",
        "jpn" => "ja",
        "heb" => "he",
        "yid" => "yi",
        "pol" => "pl",
        "amh" => "am",
        "jav" => "jv",
        "kor" => "ko",
        "nob" => "nb",
        "dan" => "da",
        "swe" => "sv",
        "fin" => "fi",
        "tur" => "tr",
        "nld" => "nl",
        "hun" => "hu",
        "ces" => "cs",
        "ell" => "el",
        "bul" => "bg",
        "bel" => "be",
        "mar" => "mr",
        "kan" => "kn",
        "ron" => "ro",
        "slv" => "sl",
        "hrv" => "hr",
        "srp" => "sr",
        "mkd" => "mk",
        "lit" => "lt",
        "lav" => "lv",
        "est" => "et",
        "tam" => "ta",
        "vie" => "vi",
        "urd" => "ur",
        "tha" => "th",
        "guj" => "gu",
        "uzb" => "uz",
        "pan" => "pa",
        "aze" => "az",
        "ind" => "id",
        "tel" => "te",
        "pes" => "fa",
        "mal" => "ml",
        "ori" => "or",
        "mya" => "my",
        "nep" => "ne",
        "sin" => "si",
        "khm" => "km",
        "tuk" => "tk",
        "aka" => "ak",
        "zul" => "zu",
        "sna" => "sn",
        "afr" => "af",
        "lat" => "la",
        "slk" => "sk",
        "cat" => "ca",
        "tgl" => "tl",
        "hye" => "hy",
        other => other,
    }
}

/// Outcome of classifying one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageVerdict {
    /// Detected language is the configured one
    Target,
    /// Detected some other language
    Other(String),
    /// The detector failed; treated as "not the target language"
    Undetermined(DetectionError),
}

impl LanguageVerdict {
    pub fn is_target(&self) -> bool {
        matches!(self, LanguageVerdict::Target)
    }
}

/// Gate passing only texts in the configured language
pub struct LanguageGate<'a> {
    detector: &'a dyn LanguageDetector,
    language_code: String,
}

impl<'a> LanguageGate<'a> {
    /// Create a gate for `language_code` (ISO 639-1, case-insensitive)
    pub fn new(detector: &'a dyn LanguageDetector, language_code: &str) -> Self {
        Self {
            detector,
            language_code: language_code.trim().to_lowercase(),
        }
    }

    /// Configured target language
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Classify a text against the target language
    pub fn classify(&self, text: &str) -> LanguageVerdict {
        match self.detector.detect(text) {
            Ok(code) if code.eq_ignore_ascii_case(&self.language_code) => LanguageVerdict::Target,
            Ok(code) => LanguageVerdict::Other(code),
            Err(err) => LanguageVerdict::Undetermined(err),
        }
    }

    /// True iff the text is detected as the target language; total over all inputs
    pub fn accepts(&self, text: &str) -> bool {
        self.classify(text).is_target()
    }

    /// Same as [`accepts`](Self::accepts) for the default `en` target
    pub fn is_english(&self, text: &str) -> bool {
        self.accepts(text)
    }
}

impl std::fmt::Debug for LanguageGate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageGate")
            .field("language_code", &self.language_code)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Detector answering with a fixed result
    struct FixedDetector(Result<String, DetectionError>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Result<String, DetectionError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_verdict_branches() {
        let english = FixedDetector(Ok("en".to_string()));
        let german = FixedDetector(Ok("de".to_string()));
        let failing = FixedDetector(Err(DetectionError::Undetermined));

        assert_eq!(LanguageGate::new(&english, "en").classify("x"), LanguageVerdict::Target);
        assert_eq!(
            LanguageGate::new(&german, "en").classify("x"),
            LanguageVerdict::Other("de".to_string())
        );
        assert_eq!(
            LanguageGate::new(&failing, "en").classify("x"),
            LanguageVerdict::Undetermined(DetectionError::Undetermined)
        );
    }

    #[test]
    fn test_failure_means_not_english() {
        let failing = FixedDetector(Err(DetectionError::NoFeatures));
        let gate = LanguageGate::new(&failing, "en");
        assert!(!gate.is_english("anything"));
    }

    #[test]
    fn test_target_code_is_case_insensitive() {
        let english = FixedDetector(Ok("EN".to_string()));
        let gate = LanguageGate::new(&english, " En ");
        assert_eq!(gate.language_code(), "en");
        assert!(gate.accepts("hello"));
    }

    #[test]
    fn test_whatlang_detects_english() {
        let detector = WhatlangDetector::new();
        let gate = LanguageGate::new(&detector, "en");
        assert!(gate.is_english(
            "I think the price of doge will go up again next week because everyone is buying it"
        ));
    }

    #[test]
    fn test_whatlang_detects_other_language() {
        let detector = WhatlangDetector::new();
        let gate = LanguageGate::new(&detector, "en");
        let verdict = gate.classify(
            "Сегодня на рынке очень много покупателей, и цена продолжает расти каждый день",
        );
        assert_eq!(verdict, LanguageVerdict::Other("ru".to_string()));
    }

    #[test]
    fn test_every_whatlang_language_has_two_letter_code() {
        let mut seen = std::collections::HashSet::new();
        for &lang in whatlang::Lang::all() {
            let code = iso639_1(lang);
            assert_eq!(code.len(), 2, "{} maps to {code}", lang.code());
            assert!(seen.insert(code), "{code} used twice");
        }
    }

    #[test]
    fn test_less_common_target_languages() {
        assert_eq!(iso639_1(whatlang::Lang::Cat), "ca");
        assert_eq!(iso639_1(whatlang::Lang::Est), "et");
        assert_eq!(iso639_1(whatlang::Lang::Hye), "hy");
        assert_eq!(iso639_1(whatlang::Lang::Zul), "zu");

        let catalan = FixedDetector(Ok(iso639_1(whatlang::Lang::Cat).to_string()));
        assert!(LanguageGate::new(&catalan, "ca").accepts("bon dia"));
    }

    #[test]
    fn test_whatlang_total_on_degenerate_input() {
        let detector = WhatlangDetector::new();
        let gate = LanguageGate::new(&detector, "en");

        assert_eq!(
            gate.classify(""),
            LanguageVerdict::Undetermined(DetectionError::NoFeatures)
        );
        assert!(!gate.is_english("   "));
        assert!(!gate.is_english("12345 !!! ???"));
    }
}
