//! Day-wise sentiment over a small chat export
//!
//! Run with: cargo run --example day_wise_summary

use anyhow::Result;
use crypto_chat_sentiment::{
    init_logging, parse_export, AppConfig, LexiconModel, Pipeline, WhatlangDetector,
};
use tracing::info;

const EXPORT: &str = r#"{
    "name": "Crypto Chat",
    "messages": [
        {"id": 1, "date": "2021-05-08T09:12:44",
         "text": "Doge is going to the moon, I really love this community"},
        {"id": 2, "date": "2021-05-08T10:01:03",
         "text": ["Honestly ", {"type": "bold", "text": "SHIB"}, " looks like a total scam to me, stay away"]},
        {"id": 3, "date": "2021-05-09T14:45:10",
         "text": "Did anyone see what happened with doge and shib prices this afternoon?"},
        {"id": 4, "date": "2021-05-09T15:20:00",
         "text": "@trader check https://example.com for the latest bitcoin chart"},
        {"id": 5, "date": "2021-05-10T08:30:00",
         "text": "Doge to the moon!! 🚀 http://x.co"},
        {"id": 6, "date": "2021-05-10T21:05:59",
         "text": "I hate shib, total scam"},
        {"id": 7, "date": "2021-05-10T22:00:00", "action": "pin_message"}
    ]
}"#;

fn main() -> Result<()> {
    let config = AppConfig::default();
    init_logging(&config.logging);

    let messages = parse_export(EXPORT)?;
    info!("Loaded {} messages", messages.len());

    // Models are built once and lent to the pipeline
    let detector = WhatlangDetector::new();
    let model = LexiconModel::new();
    let pipeline = Pipeline::new(&config.pipeline, &detector, &model)?;

    let summary = pipeline.run(&messages)?;

    println!("\n{summary}");
    println!("{}", summary.to_json_pretty()?);

    let totals = summary.totals();
    println!(
        "\nKept {} of {} messages ({} positive, {} neutral, {} negative)",
        totals.total,
        messages.len(),
        totals.positive,
        totals.neutral,
        totals.negative
    );

    Ok(())
}
