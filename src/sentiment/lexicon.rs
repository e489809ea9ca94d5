//! Sentiment lexicons
//!
//! Contains:
//! - The lexicon trait used by the rule-based model
//! - A built-in English lexicon with crypto chat vocabulary

use std::collections::{HashMap, HashSet};

/// Trait for a sentiment lexicon
pub trait SentimentLexicon: Send + Sync {
    /// Polarity of a word (-1.0 to 1.0), if the word carries sentiment
    fn polarity(&self, word: &str) -> Option<f64>;

    /// Multiplier applied to the word that follows an intensifier
    fn intensity(&self, word: &str) -> Option<f64>;

    /// Whether the word flips the sentiment of what follows
    fn is_negation(&self, word: &str) -> bool;
}

/// Built-in English lexicon
#[derive(Debug, Clone)]
pub struct EnglishLexicon {
    /// Words with polarity
    words: HashMap<String, f64>,
    /// Intensifiers and downtoners
    modifiers: HashMap<String, f64>,
    /// Negations, including apostrophe-less forms left by text cleaning
    negations: HashSet<String>,
}

impl EnglishLexicon {
    /// Create the lexicon with its built-in vocabulary
    pub fn new() -> Self {
        // General English adjectives, verbs and nouns
        let general = [
            ("good", 0.7),
            ("great", 0.8),
            ("best", 1.0),
            ("better", 0.5),
            ("nice", 0.6),
            ("love", 0.5),
            ("like", 0.2),
            ("happy", 0.8),
            ("glad", 0.5),
            ("cool", 0.35),
            ("awesome", 1.0),
            ("amazing", 0.6),
            ("excellent", 1.0),
            ("fantastic", 0.4),
            ("perfect", 1.0),
            ("beautiful", 0.85),
            ("wonderful", 1.0),
            ("incredible", 0.9),
            ("impressive", 1.0),
            ("interesting", 0.5),
            ("exciting", 0.3),
            ("excited", 0.4),
            ("strong", 0.43),
            ("safe", 0.5),
            ("easy", 0.43),
            ("free", 0.4),
            ("win", 0.8),
            ("winning", 0.5),
            ("winner", 0.6),
            ("success", 0.3),
            ("successful", 0.75),
            ("thanks", 0.2),
            ("thank", 0.2),
            ("lucky", 0.33),
            ("rich", 0.38),
            ("smart", 0.21),
            ("fun", 0.3),
            ("funny", 0.25),
            ("bad", -0.7),
            ("worse", -0.4),
            ("worst", -1.0),
            ("terrible", -1.0),
            ("horrible", -1.0),
            ("awful", -1.0),
            ("poor", -0.4),
            ("sad", -0.5),
            ("angry", -0.5),
            ("hate", -0.8),
            ("stupid", -0.8),
            ("dumb", -0.38),
            ("ugly", -0.7),
            ("boring", -1.0),
            ("wrong", -0.5),
            ("weak", -0.38),
            ("fake", -0.5),
            ("useless", -0.5),
            ("crazy", -0.6),
            ("scary", -0.5),
            ("dead", -0.2),
            ("broke", -0.4),
            ("lost", -0.1),
            ("lose", -0.4),
            ("losing", -0.4),
            ("fail", -0.5),
            ("failed", -0.5),
            ("disappointed", -0.75),
            ("disappointing", -0.6),
            ("sorry", -0.5),
            ("annoying", -0.8),
            ("pathetic", -1.0),
        ];

        // Crypto chat vocabulary
        let crypto = [
            ("moon", 0.6),
            ("mooning", 0.7),
            ("bullish", 0.6),
            ("pump", 0.3),
            ("pumping", 0.4),
            ("rally", 0.5),
            ("surge", 0.5),
            ("skyrocket", 0.7),
            ("lambo", 0.5),
            ("hodl", 0.3),
            ("gains", 0.5),
            ("profit", 0.4),
            ("ath", 0.6),
            ("gem", 0.5),
            ("undervalued", 0.4),
            ("adoption", 0.3),
            ("bearish", -0.6),
            ("dump", -0.5),
            ("dumping", -0.6),
            ("crash", -0.7),
            ("crashing", -0.7),
            ("scam", -0.8),
            ("fraud", -0.8),
            ("rugpull", -0.9),
            ("rug", -0.6),
            ("ponzi", -0.8),
            ("rekt", -0.7),
            ("fud", -0.4),
            ("bubble", -0.4),
            ("overvalued", -0.4),
            ("liquidated", -0.6),
            ("panic", -0.6),
            ("hacked", -0.7),
        ];

        let words = general
            .iter()
            .chain(crypto.iter())
            .map(|(word, score)| (word.to_string(), *score))
            .collect();

        let modifiers = [
            ("very", 1.3),
            ("really", 1.3),
            ("so", 1.3),
            ("too", 1.3),
            ("extremely", 1.5),
            ("super", 1.4),
            ("absolutely", 1.5),
            ("totally", 1.3),
            ("completely", 1.4),
            ("highly", 1.3),
            ("incredibly", 1.5),
            ("quite", 1.1),
            ("pretty", 1.1),
            ("somewhat", 0.8),
            ("slightly", 0.7),
            ("barely", 0.6),
            ("kinda", 0.8),
        ]
        .into_iter()
        .map(|(word, multiplier)| (word.to_string(), multiplier))
        .collect();

        let negations = [
            "not", "no", "never", "neither", "nor", "nobody", "nothing", "nowhere",
            "dont", "don", "doesnt", "doesn", "didnt", "didn", "isnt", "isn",
            "arent", "aren", "wasnt", "wasn", "werent", "weren", "cant", "cannot",
            "couldnt", "couldn", "wont", "wouldnt", "wouldn", "shouldnt", "shouldn",
            "havent", "haven", "hasnt", "hasn", "aint",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            words,
            modifiers,
            negations,
        }
    }

    /// Add or override a word's polarity; the value is clamped to [-1, 1]
    pub fn add_word(&mut self, word: &str, polarity: f64) {
        self.words
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
    }

    /// Number of words carrying polarity
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for EnglishLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon for EnglishLexicon {
    fn polarity(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    fn intensity(&self, word: &str) -> Option<f64> {
        self.modifiers.get(&word.to_lowercase()).copied()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(&word.to_lowercase())
    }
}
