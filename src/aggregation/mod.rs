//! # Aggregation Module
//!
//! Per-day sentiment statistics.

mod day;

pub use day::{
    calendar_date, round_score, DayAggregator, DayBucket, DaySummaryRow, DayWiseSummary,
    SentimentCounts,
};
