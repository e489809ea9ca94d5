//! Sentiment scorer
//!
//! Computes a polarity in [-1, 1] and maps its sign onto a label.

use super::lexicon::{EnglishLexicon, SentimentLexicon};
use crate::defaults;
use crate::models::{NormalizedMessage, ScoredMessage, SentimentLabel};

/// Factor applied to a word preceded by a negation
const NEGATION_FACTOR: f64 = -0.5;

/// Polarity model
pub trait PolarityModel: Send + Sync {
    /// Polarity of `text` in [-1.0, 1.0]; 0.0 means no sentiment
    fn polarity(&self, text: &str) -> f64;
}

/// Rule-based model over a sentiment lexicon
///
/// Every lexicon word contributes its polarity, scaled by an intensifier
/// directly in front of it and damped and flipped by a negation within the
/// negation window. The text's polarity is the mean contribution.
#[derive(Debug, Clone)]
pub struct LexiconModel<L = EnglishLexicon> {
    lexicon: L,
    negation_window: usize,
}

impl LexiconModel<EnglishLexicon> {
    /// Create a model with the built-in English lexicon
    pub fn new() -> Self {
        Self::with_lexicon(EnglishLexicon::new())
    }
}

impl Default for LexiconModel<EnglishLexicon> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SentimentLexicon> LexiconModel<L> {
    /// Create a model over a custom lexicon
    pub fn with_lexicon(lexicon: L) -> Self {
        Self {
            lexicon,
            negation_window: defaults::NEGATION_WINDOW,
        }
    }

    /// Set how many preceding words a negation reaches
    pub fn with_negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    pub fn lexicon_mut(&mut self) -> &mut L {
        &mut self.lexicon
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

impl<L: SentimentLexicon> PolarityModel for LexiconModel<L> {
    fn polarity(&self, text: &str) -> f64 {
        let tokens = Self::tokenize(text);
        let mut total = 0.0;
        let mut hits = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(base) = self.lexicon.polarity(token) else {
                continue;
            };

            let mut score = base;

            if let Some(multiplier) = i
                .checked_sub(1)
                .and_then(|prev| self.lexicon.intensity(&tokens[prev]))
            {
                score *= multiplier;
            }

            let window_start = i.saturating_sub(self.negation_window);
            if tokens[window_start..i]
                .iter()
                .any(|t| self.lexicon.is_negation(t))
            {
                score *= NEGATION_FACTOR;
            }

            total += score.clamp(-1.0, 1.0);
            hits += 1;
        }

        if hits == 0 {
            0.0
        } else {
            (total / hits as f64).clamp(-1.0, 1.0)
        }
    }
}

/// Scorer wrapping an injected polarity model
pub struct SentimentScorer<'a> {
    model: &'a dyn PolarityModel,
}

impl<'a> SentimentScorer<'a> {
    pub fn new(model: &'a dyn PolarityModel) -> Self {
        Self { model }
    }

    /// Label and polarity of a text
    pub fn score(&self, text: &str) -> (SentimentLabel, f64) {
        let raw = self.model.polarity(text);
        // Out-of-contract model output: NaN is "no sentiment", the rest is clamped
        let polarity = if raw.is_nan() { 0.0 } else { raw.clamp(-1.0, 1.0) };
        (SentimentLabel::from_polarity(polarity), polarity)
    }

    /// Score a normalized message by its cleaned text
    pub fn score_message(&self, message: NormalizedMessage) -> ScoredMessage {
        let (_, polarity) = self.score(&message.cleaned_text);
        ScoredMessage::new(message, polarity)
    }
}

impl std::fmt::Debug for SentimentScorer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawMessage;

    struct ConstantModel(f64);

    impl PolarityModel for ConstantModel {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_positive_sentiment() {
        let model = LexiconModel::new();
        let scorer = SentimentScorer::new(&model);

        let (label, polarity) = scorer.score("Doge to the moon");
        assert_eq!(label, SentimentLabel::Positive);
        assert!(polarity > 0.0);
    }

    #[test]
    fn test_negative_sentiment() {
        let model = LexiconModel::new();
        let scorer = SentimentScorer::new(&model);

        let (label, polarity) = scorer.score("I hate shib total scam");
        assert_eq!(label, SentimentLabel::Negative);
        assert!(polarity < 0.0);
    }

    #[test]
    fn test_no_sentiment_words_is_neutral() {
        let model = LexiconModel::new();
        let scorer = SentimentScorer::new(&model);

        assert_eq!(scorer.score("shib doge"), (SentimentLabel::Neutral, 0.0));
        assert_eq!(scorer.score(""), (SentimentLabel::Neutral, 0.0));
    }

    #[test]
    fn test_intensifier() {
        let model = LexiconModel::new();

        let plain = model.polarity("good");
        let intensified = model.polarity("very good");
        assert!(intensified > plain);
    }

    #[test]
    fn test_negation_flips_and_damps() {
        let model = LexiconModel::new();

        let plain = model.polarity("doge is good");
        let negated = model.polarity("doge is not good");
        assert!(negated < 0.0);
        assert!((negated - plain * NEGATION_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn test_negation_window() {
        let model = LexiconModel::new().with_negation_window(1);

        // "not" is two words before "good", outside a window of one
        assert!(model.polarity("not really good") > 0.0);
        assert!(model.polarity("not good") < 0.0);
    }

    #[test]
    fn test_mean_of_contributions() {
        let model = LexiconModel::new();
        let good = model.polarity("good");
        let bad = model.polarity("bad");

        let mixed = model.polarity("good bad");
        assert!((mixed - (good + bad) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_polarity_stays_in_range() {
        let model = LexiconModel::new();
        let texts = [
            "extremely best absolutely perfect",
            "extremely worst absolutely terrible",
            "not not not bad",
        ];
        for text in texts {
            let p = model.polarity(text);
            assert!((-1.0..=1.0).contains(&p), "{text}: {p}");
        }
    }

    #[test]
    fn test_label_consistency_with_injected_model() {
        for value in [0.5, -0.25, 0.0, 3.0, -7.0, f64::NAN] {
            let model = ConstantModel(value);
            let scorer = SentimentScorer::new(&model);
            let (label, polarity) = scorer.score("x");

            assert!((-1.0..=1.0).contains(&polarity));
            assert_eq!(label == SentimentLabel::Positive, polarity > 0.0);
            assert_eq!(label == SentimentLabel::Negative, polarity < 0.0);
            assert_eq!(label == SentimentLabel::Neutral, polarity == 0.0);
        }
    }

    #[test]
    fn test_score_message() {
        let model = ConstantModel(-0.4);
        let scorer = SentimentScorer::new(&model);
        let message = NormalizedMessage {
            raw: RawMessage::new("shib?", "2021-05-10T00:00:00"),
            cleaned_text: "shib".to_string(),
        };

        let scored = scorer.score_message(message);
        assert_eq!(scored.label(), SentimentLabel::Negative);
        assert_eq!(scored.score(), -0.4);
    }

    #[test]
    fn test_custom_word() {
        let mut model = LexiconModel::new();
        assert_eq!(model.polarity("wagmi"), 0.0);

        model.lexicon_mut().add_word("wagmi", 0.9);
        assert!(model.polarity("wagmi") > 0.0);
    }
}
