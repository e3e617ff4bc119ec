use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::utils::{denmark_two_day_source, pipeline_with, ToggleSource};

/// A successful refresh publishes its dataset as the current snapshot
#[tokio::test]
async fn test_refresh_publishes_snapshot() -> covid_series::Result<()> {
    let pipeline = pipeline_with(denmark_two_day_source());
    assert!(pipeline.snapshot().is_none());

    let dataset = pipeline.refresh().await?;
    let snapshot = pipeline.snapshot().expect("snapshot published");
    assert!(Arc::ptr_eq(&dataset, &snapshot));

    Ok(())
}

/// A failed refresh leaves the previously published snapshot untouched
#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() -> covid_series::Result<()> {
    let (source, healthy) = ToggleSource::new(denmark_two_day_source());
    let pipeline = pipeline_with(source);

    let first = pipeline.refresh().await?;

    healthy.store(false, Ordering::SeqCst);
    assert!(pipeline.refresh().await.is_err());

    let snapshot = pipeline.snapshot().expect("old snapshot still published");
    assert!(Arc::ptr_eq(&first, &snapshot));
    assert_eq!(snapshot.records().len(), 2);

    Ok(())
}

/// A later successful refresh swaps the snapshot while old handles stay valid
#[tokio::test]
async fn test_refresh_replaces_snapshot() -> covid_series::Result<()> {
    let pipeline = pipeline_with(denmark_two_day_source());

    let first = pipeline.refresh().await?;
    let second = pipeline.refresh().await?;
    assert!(!Arc::ptr_eq(&first, &second));

    let snapshot = pipeline.snapshot().expect("snapshot published");
    assert!(Arc::ptr_eq(&second, &snapshot));

    // The superseded handle still reads its own consistent dataset.
    assert_eq!(first.records().len(), second.records().len());

    Ok(())
}
