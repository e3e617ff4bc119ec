//! Demo binary: run one refresh against the live feeds and print a summary.
//!
//! Usage: `covid-series [COUNTRY]`
//!
//! Fetches the three feeds, builds the dataset, and prints the latest global
//! totals and day-over-day deltas as JSON. With a country argument, also
//! prints that country's last week of daily totals.

use anyhow::Context;
use covid_series::{Pipeline, PipelineConfig};
use env_logger::Env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let pipeline = Pipeline::new(PipelineConfig::default())
        .context("failed to construct pipeline")?;
    let dataset = pipeline
        .refresh()
        .await
        .context("initial feed refresh failed")?;

    let summary = serde_json::json!({
        "refreshed_at": dataset.refreshed_at().to_rfc3339(),
        "latest_date": dataset.latest_date(),
        "records": dataset.records().len(),
        "countries": dataset.countries().len(),
        "latest_totals": dataset.latest_totals(),
        "deltas": dataset.latest_deltas(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(country) = std::env::args().nth(1) {
        let series = dataset.daily_totals_for_country(&country);
        if series.is_empty() {
            log::warn!("no records found for country '{country}'");
        } else {
            let tail = &series[series.len().saturating_sub(7)..];
            println!("{}", serde_json::to_string_pretty(&tail)?);
        }
    }

    Ok(())
}
