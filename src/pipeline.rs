//! # Pipeline
//!
//! Every message goes through
//! `normalize -> language gate -> keyword gate -> score -> aggregate`.
//! A gate that says no drops the message; that is an expected outcome,
//! not an error. Only a malformed timestamp on a message that reaches
//! aggregation fails the run.

use crate::aggregation::{DayAggregator, DayWiseSummary};
use crate::error::Result;
use crate::filter::{DetectionError, KeywordGate, LanguageDetector, LanguageGate, LanguageVerdict};
use crate::models::{RawMessage, ScoredMessage};
use crate::nlp::TextNormalizer;
use crate::sentiment::{PolarityModel, SentimentScorer};
use crate::utils::PipelineConfig;
use rayon::prelude::*;
use tracing::{debug, info};

/// Why a message left the pipeline early
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Detected as a language other than the target
    OtherLanguage(String),
    /// Language detection failed
    LanguageUndetermined(DetectionError),
    /// None of the keywords occur in the cleaned text
    NoKeyword,
}

/// Where a single message ended up
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Dropped(DropReason),
    Scored(ScoredMessage),
}

/// Filtering, scoring and day-wise aggregation of chat messages
///
/// The language detector and polarity model are borrowed, so one set of
/// models can serve several pipelines and tests can pass doubles.
#[derive(Debug)]
pub struct Pipeline<'a> {
    normalizer: TextNormalizer,
    language_gate: LanguageGate<'a>,
    keyword_gate: KeywordGate,
    scorer: SentimentScorer<'a>,
    parallel: bool,
}

impl<'a> Pipeline<'a> {
    /// Build a pipeline from configuration and injected models
    pub fn new(
        config: &PipelineConfig,
        detector: &'a dyn LanguageDetector,
        model: &'a dyn PolarityModel,
    ) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new(),
            language_gate: LanguageGate::new(detector, &config.language_code),
            keyword_gate: KeywordGate::new(&config.keywords)?,
            scorer: SentimentScorer::new(model),
            parallel: config.parallel,
        })
    }

    /// Run one message through normalization, both gates and scoring
    pub fn process(&self, message: &RawMessage) -> Stage {
        let normalized = self.normalizer.normalize_message(message);

        match self.language_gate.classify(&normalized.cleaned_text) {
            LanguageVerdict::Target => {}
            LanguageVerdict::Other(code) => return Stage::Dropped(DropReason::OtherLanguage(code)),
            LanguageVerdict::Undetermined(err) => {
                return Stage::Dropped(DropReason::LanguageUndetermined(err))
            }
        }

        if !self.keyword_gate.matches(&normalized.cleaned_text) {
            return Stage::Dropped(DropReason::NoKeyword);
        }

        Stage::Scored(self.scorer.score_message(normalized))
    }

    /// Aggregate a message collection into the day-wise summary
    ///
    /// Uses the execution strategy selected in the configuration; both give
    /// the same table.
    pub fn run(&self, messages: &[RawMessage]) -> Result<DayWiseSummary> {
        info!(
            messages = messages.len(),
            parallel = self.parallel,
            language = self.language_gate.language_code(),
            keywords = ?self.keyword_gate.keywords(),
            "Running sentiment pipeline"
        );

        let aggregator = if self.parallel {
            self.fold_parallel(messages)?
        } else {
            self.fold_sequential(messages)?
        };

        let summary = aggregator.finish();
        let totals = summary.totals();
        info!(
            kept = totals.total,
            dropped = messages.len() as u64 - totals.total,
            days = summary.len(),
            "Sentiment pipeline finished"
        );

        Ok(summary)
    }

    /// Single-threaded fold in input order
    pub fn run_sequential(&self, messages: &[RawMessage]) -> Result<DayWiseSummary> {
        Ok(self.fold_sequential(messages)?.finish())
    }

    /// Fold on the rayon pool: private partial maps per worker, merged at the end
    ///
    /// If several records have malformed timestamps, which one is reported
    /// depends on scheduling.
    pub fn run_parallel(&self, messages: &[RawMessage]) -> Result<DayWiseSummary> {
        Ok(self.fold_parallel(messages)?.finish())
    }

    fn fold_sequential(&self, messages: &[RawMessage]) -> Result<DayAggregator> {
        let mut aggregator = DayAggregator::new();
        for (index, message) in messages.iter().enumerate() {
            self.fold_one(&mut aggregator, index, message)?;
        }
        Ok(aggregator)
    }

    fn fold_parallel(&self, messages: &[RawMessage]) -> Result<DayAggregator> {
        messages
            .par_iter()
            .enumerate()
            .try_fold(DayAggregator::new, |mut aggregator, (index, message)| -> Result<DayAggregator> {
                self.fold_one(&mut aggregator, index, message)?;
                Ok(aggregator)
            })
            .try_reduce(DayAggregator::new, |left, right| Ok(left.merge(right)))
    }

    fn fold_one(&self, aggregator: &mut DayAggregator, index: usize, message: &RawMessage) -> Result<()> {
        match self.process(message) {
            Stage::Scored(scored) => aggregator.accumulate_message(index, &scored),
            Stage::Dropped(reason) => {
                debug!(index, ?reason, "Message dropped");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::SentimentLabel;
    use crate::sentiment::LexiconModel;

    /// Says "en" for anything with letters, like a permissive classifier
    struct AlwaysEnglish;

    impl LanguageDetector for AlwaysEnglish {
        fn detect(&self, text: &str) -> std::result::Result<String, DetectionError> {
            if text.chars().any(char::is_alphabetic) {
                Ok("en".to_string())
            } else {
                Err(DetectionError::NoFeatures)
            }
        }
    }

    /// Treats texts containing "hola" as Spanish
    struct SpanishAware;

    impl LanguageDetector for SpanishAware {
        fn detect(&self, text: &str) -> std::result::Result<String, DetectionError> {
            if text.to_lowercase().contains("hola") {
                Ok("es".to_string())
            } else {
                AlwaysEnglish.detect(text)
            }
        }
    }

    #[test]
    fn test_process_scores_matching_message() {
        let model = LexiconModel::new();
        let pipeline = Pipeline::new(&PipelineConfig::default(), &AlwaysEnglish, &model).unwrap();

        let stage = pipeline.process(&RawMessage::new(
            "Doge to the moon!! 🚀 http://x.co",
            "2021-05-10T10:00:00",
        ));

        match stage {
            Stage::Scored(scored) => {
                assert_eq!(scored.message().cleaned_text, "Doge to the moon");
                assert_eq!(scored.label(), SentimentLabel::Positive);
            }
            other => panic!("expected scored message, got {other:?}"),
        }
    }

    #[test]
    fn test_process_drop_reasons() {
        let model = LexiconModel::new();
        let pipeline = Pipeline::new(&PipelineConfig::default(), &SpanishAware, &model).unwrap();

        assert_eq!(
            pipeline.process(&RawMessage::new("hola doge", "2021-05-10T10:00:00")),
            Stage::Dropped(DropReason::OtherLanguage("es".to_string()))
        );
        assert_eq!(
            pipeline.process(&RawMessage::new("🚀🚀 !!!", "2021-05-10T10:00:00")),
            Stage::Dropped(DropReason::LanguageUndetermined(DetectionError::NoFeatures))
        );
        assert_eq!(
            pipeline.process(&RawMessage::new("bitcoin is great", "2021-05-10T10:00:00")),
            Stage::Dropped(DropReason::NoKeyword)
        );
    }

    #[test]
    fn test_keyword_hidden_in_link_is_not_matched() {
        let model = LexiconModel::new();
        let pipeline = Pipeline::new(&PipelineConfig::default(), &AlwaysEnglish, &model).unwrap();

        let stage = pipeline.process(&RawMessage::new(
            "look at this https://example.com/doge",
            "2021-05-10T10:00:00",
        ));
        assert_eq!(stage, Stage::Dropped(DropReason::NoKeyword));
    }

    #[test]
    fn test_run_example_day() {
        let model = LexiconModel::new();
        let pipeline = Pipeline::new(&PipelineConfig::default(), &AlwaysEnglish, &model).unwrap();

        let messages = vec![
            RawMessage::new("Doge to the moon!! 🚀 http://x.co", "2021-05-10T08:00:00"),
            RawMessage::new("I hate shib, total scam", "2021-05-10T21:30:00"),
        ];
        let summary = pipeline.run(&messages).unwrap();

        assert_eq!(summary.len(), 1);
        let row = summary.get("2021-05-10").unwrap();
        assert_eq!((row.positive, row.neutral, row.negative, row.total), (1, 0, 1, 2));

        let p1 = model.polarity("Doge to the moon");
        let p2 = model.polarity("I hate shib total scam");
        assert_eq!(row.total_score, p1 + p2);
        assert_eq!(row.avg_score, crate::aggregation::round_score((p1 + p2) / 2.0));
    }

    #[test]
    fn test_malformed_timestamp_fails_run() {
        let model = LexiconModel::new();
        let pipeline = Pipeline::new(&PipelineConfig::default(), &AlwaysEnglish, &model).unwrap();

        let messages = vec![
            RawMessage::new("doge is good", "2021-05-10T08:00:00"),
            RawMessage::new("shib is bad", "May 10th"),
        ];
        let err = pipeline.run(&messages).unwrap_err();
        assert!(matches!(err, Error::DataFormat { index: 1, .. }));
    }

    #[test]
    fn test_dropped_message_timestamp_not_checked() {
        let model = LexiconModel::new();
        let pipeline = Pipeline::new(&PipelineConfig::default(), &AlwaysEnglish, &model).unwrap();

        let messages = vec![
            RawMessage::new("doge is good", "2021-05-10T08:00:00"),
            RawMessage::new("no coin mentioned", "garbage"),
        ];
        let summary = pipeline.run(&messages).unwrap();
        assert_eq!(summary.totals().total, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let model = LexiconModel::new();
        let pipeline = Pipeline::new(&PipelineConfig::default(), &AlwaysEnglish, &model).unwrap();

        let messages: Vec<RawMessage> = (0..200)
            .map(|i| {
                let text = match i % 4 {
                    0 => "doge is good",
                    1 => "shib is a scam",
                    2 => "doge and shib",
                    _ => "nothing to see",
                };
                RawMessage::new(text, format!("2021-05-{:02}T12:00:00", 1 + i % 7))
            })
            .collect();

        let sequential = pipeline.run_sequential(&messages).unwrap();
        let parallel = pipeline.run_parallel(&messages).unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.rows().iter().zip(parallel.rows()) {
            assert_eq!(a.date, b.date);
            assert_eq!(a.counts(), b.counts());
            assert!((a.total_score - b.total_score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_keyword_config() {
        let model = LexiconModel::new();
        let config = PipelineConfig::default().with_keywords([""]);
        assert!(matches!(
            Pipeline::new(&config, &AlwaysEnglish, &model),
            Err(Error::InvalidKeyword(_))
        ));
    }
}
