//! # Day-wise Aggregation
//!
//! Folds scored messages into one bucket per calendar date. Averages are
//! only computed once the fold is complete.

use crate::defaults;
use crate::error::{Error, Result};
use crate::models::{ScoredMessage, SentimentLabel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator between the date and time parts of an ISO 8601 timestamp
const DATE_TIME_SEPARATOR: char = 'T';

/// Calendar date of an ISO 8601 timestamp; time of day and offset are ignored
pub fn calendar_date(timestamp: &str) -> std::result::Result<NaiveDate, String> {
    let (date, _time) = timestamp
        .split_once(DATE_TIME_SEPARATOR)
        .ok_or_else(|| format!("missing '{DATE_TIME_SEPARATOR}' date/time separator"))?;

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| format!("invalid date {date:?}: {e}"))
}

/// Round to the number of decimals used for averages, ties to even
pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(defaults::SCORE_DECIMALS);
    (value * factor).round_ties_even() / factor
}

/// Message counts per sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub total: u64,
}

impl SentimentCounts {
    /// Count one message; keeps `positive + neutral + negative == total`
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
        self.total += 1;
    }

    /// Count for one label
    pub fn get(&self, label: SentimentLabel) -> u64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    /// Add another set of counts
    pub fn absorb(&mut self, other: &SentimentCounts) {
        self.positive += other.positive;
        self.neutral += other.neutral;
        self.negative += other.negative;
        self.total += other.total;
    }

    pub fn is_consistent(&self) -> bool {
        self.positive + self.neutral + self.negative == self.total
    }
}

/// Running statistics for one calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    date: NaiveDate,
    counts: SentimentCounts,
    total_score: f64,
}

impl DayBucket {
    /// Zero-valued bucket for `date`
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            counts: SentimentCounts::default(),
            total_score: 0.0,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn counts(&self) -> &SentimentCounts {
        &self.counts
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Fold one message into the bucket
    pub fn add(&mut self, label: SentimentLabel, score: f64) {
        self.counts.record(label);
        self.total_score += score;
    }

    /// `total_score / total`, rounded; 0.0 for a bucket with no messages
    pub fn avg_score(&self) -> f64 {
        if self.counts.total == 0 {
            return 0.0;
        }
        round_score(self.total_score / self.counts.total as f64)
    }

    fn absorb(&mut self, other: &DayBucket) {
        self.counts.absorb(&other.counts);
        self.total_score += other.total_score;
    }
}

/// Accumulator owning the bucket map
#[derive(Debug, Clone, Default)]
pub struct DayAggregator {
    buckets: HashMap<NaiveDate, DayBucket>,
}

impl DayAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket for `date`, created empty on first access
    pub fn bucket_mut(&mut self, date: NaiveDate) -> &mut DayBucket {
        self.buckets
            .entry(date)
            .or_insert_with(|| DayBucket::empty(date))
    }

    /// Bucket for `date` if any message has landed there
    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.buckets.get(&date)
    }

    /// Fold one labelled score into its day
    pub fn accumulate(&mut self, date: NaiveDate, label: SentimentLabel, score: f64) {
        self.bucket_mut(date).add(label, score);
    }

    /// Fold a scored message, reading the day from its timestamp
    ///
    /// `index` is the record's position in the input and is only used to
    /// report a malformed timestamp.
    pub fn accumulate_message(&mut self, index: usize, message: &ScoredMessage) -> Result<()> {
        let date = calendar_date(message.timestamp()).map_err(|reason| Error::DataFormat {
            index,
            timestamp: message.timestamp().to_string(),
            reason,
        })?;

        self.accumulate(date, message.label(), message.score());
        Ok(())
    }

    /// Combine two partial aggregations by summing per-day counts and scores
    pub fn merge(mut self, other: DayAggregator) -> Self {
        for (date, bucket) in other.buckets {
            self.bucket_mut(date).absorb(&bucket);
        }
        self
    }

    /// Number of distinct days seen
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Finalize into a date-ordered summary, computing averages
    pub fn finish(self) -> DayWiseSummary {
        let mut buckets: Vec<&DayBucket> = self.buckets.values().collect();
        buckets.sort_by_key(|bucket| bucket.date());

        let rows = buckets.into_iter().map(DaySummaryRow::from_bucket).collect();
        DayWiseSummary { rows }
    }
}

/// One output row per date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummaryRow {
    /// `YYYY-MM-DD`
    pub date: String,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub total: u64,
    pub total_score: f64,
    /// `total_score / total` rounded to four decimals
    pub avg_score: f64,
}

impl DaySummaryRow {
    fn from_bucket(bucket: &DayBucket) -> Self {
        let counts = bucket.counts();
        Self {
            date: bucket.date().format("%Y-%m-%d").to_string(),
            positive: counts.positive,
            neutral: counts.neutral,
            negative: counts.negative,
            total: counts.total,
            total_score: bucket.total_score(),
            avg_score: bucket.avg_score(),
        }
    }

    /// Counts of this row
    pub fn counts(&self) -> SentimentCounts {
        SentimentCounts {
            positive: self.positive,
            neutral: self.neutral,
            negative: self.negative,
            total: self.total,
        }
    }
}

/// Day-wise table handed to plotting, sorted by ascending date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayWiseSummary {
    rows: Vec<DaySummaryRow>,
}

impl DayWiseSummary {
    pub fn rows(&self) -> &[DaySummaryRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<DaySummaryRow> {
        self.rows
    }

    /// Row for a `YYYY-MM-DD` date
    pub fn get(&self, date: &str) -> Option<&DaySummaryRow> {
        self.rows.iter().find(|row| row.date == date)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Counts across all days
    pub fn totals(&self) -> SentimentCounts {
        let mut totals = SentimentCounts::default();
        for row in &self.rows {
            totals.absorb(&row.counts());
        }
        totals
    }

    /// Rows as a pretty-printed JSON array
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for DayWiseSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<10} {:>8} {:>8} {:>8} {:>6} {:>12} {:>9}",
            "date", "positive", "neutral", "negative", "total", "total_score", "avg_score"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<10} {:>8} {:>8} {:>8} {:>6} {:>12.4} {:>9.4}",
                row.date,
                row.positive,
                row.neutral,
                row.negative,
                row.total,
                row.total_score,
                row.avg_score
            )?;
        }
        Ok(())
    }
}
