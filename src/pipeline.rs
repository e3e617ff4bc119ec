//! End-to-end pipeline orchestration.
//!
//! One refresh runs the full pass: fetch the three feeds concurrently,
//! validate their schemas, melt each wide table, left-join deaths and
//! recovered onto confirmed, derive the final records, and build the dataset
//! views. On success the new dataset is published to the snapshot store; on
//! failure the previously published dataset stays untouched.

use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::dataset::{CaseDataset, SnapshotStore};
use crate::error::Result;
use crate::schema;
use crate::source::{self, FeedSource, HttpFeedSource};
use crate::transform;

/// The processing pipeline and its published snapshot
pub struct Pipeline {
    config: PipelineConfig,
    source: Box<dyn FeedSource>,
    store: SnapshotStore,
}

impl Pipeline {
    /// Create a pipeline fetching over HTTP with the given configuration
    ///
    /// # Errors
    /// Returns `PipelineError::Config` when the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let source = HttpFeedSource::from_config(&config)?;
        Self::with_source(config, Box::new(source))
    }

    /// Create a pipeline with a custom feed source
    ///
    /// # Errors
    /// Returns `PipelineError::Config` when the configuration is invalid.
    pub fn with_source(config: PipelineConfig, source: Box<dyn FeedSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            store: SnapshotStore::new(),
        })
    }

    /// The pipeline's configuration
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The currently published dataset, if a refresh has succeeded yet
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<CaseDataset>> {
        self.store.current()
    }

    /// Run a full pass over the feeds and publish the result
    ///
    /// A failed refresh leaves the previously published dataset in place.
    ///
    /// # Errors
    /// Returns the first error of any stage: fetch, decode, schema
    /// validation, merge.
    pub async fn refresh(&self) -> Result<Arc<CaseDataset>> {
        match self.run_once().await {
            Ok(dataset) => {
                let dataset = Arc::new(dataset);
                self.store.publish(Arc::clone(&dataset));
                Ok(dataset)
            }
            Err(error) => {
                log::warn!("refresh failed, keeping previous snapshot: {error}");
                Err(error)
            }
        }
    }

    /// One full pass: fetch, validate, melt, join, derive, assemble
    async fn run_once(&self) -> Result<CaseDataset> {
        let raw = source::load_raw_tables(self.source.as_ref(), &self.config).await?;

        schema::check_feed_schemas(&raw, &self.config)?.into_result()?;

        let confirmed = transform::melt_table(&raw.confirmed, &self.config)?;
        let deaths = transform::melt_table(&raw.deaths, &self.config)?;
        let recovered = transform::melt_table(&raw.recovered, &self.config)?;

        let merged = transform::left_join_feeds(confirmed, deaths, recovered)?;
        let records = transform::finalize_records(merged);
        let dataset = CaseDataset::from_records(records);

        match (dataset.daily_totals().first(), dataset.latest_date()) {
            (Some(first), Some(latest)) => log::info!(
                "assembled dataset: {} records, {} countries, {} to {latest}",
                dataset.records().len(),
                dataset.countries().len(),
                first.date,
            ),
            _ => log::info!("assembled dataset: no records"),
        }

        Ok(dataset)
    }
}
