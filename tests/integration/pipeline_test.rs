use crate::utils::{denmark_two_day_source, pipeline_with, wide_csv, FailingSource};
use covid_series::{Metric, PipelineError, StaticFeedSource};

/// Full pass over a two-day single-region fixture, checked field by field
#[tokio::test]
async fn test_two_day_round_trip() -> covid_series::Result<()> {
    let pipeline = pipeline_with(denmark_two_day_source());
    let dataset = pipeline.refresh().await?;

    let records = dataset.records();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].region.country, "Denmark");
    assert_eq!(records[0].confirmed, 10);
    assert_eq!(records[0].deaths, 1);
    assert_eq!(records[0].recovered, 0, "absent recovered cell fills with zero");
    assert_eq!(records[0].active, 9);

    assert_eq!(records[1].confirmed, 15);
    assert_eq!(records[1].deaths, 2);
    assert_eq!(records[1].recovered, 3);
    assert_eq!(records[1].active, 10);

    assert_eq!(dataset.countries(), ["Denmark"]);
    assert_eq!(
        dataset.latest_date(),
        chrono::NaiveDate::from_ymd_opt(2020, 1, 23)
    );

    let delta = dataset.delta(Metric::Confirmed).unwrap();
    assert_eq!(delta.latest, 15);
    assert_eq!(delta.change, 5);
    assert_eq!(delta.percent, Some(33.33));

    Ok(())
}

/// Daily totals sum across regions and the country list is sorted and unique
#[tokio::test]
async fn test_multi_region_aggregation() -> covid_series::Result<()> {
    let dates = ["1/22/20", "1/23/20"];
    let source = StaticFeedSource::new(
        wide_csv(&dates, &[
            ",Sweden,60.1,18.6,4,6",
            ",Denmark,56.2,9.5,10,15",
            "Faroe Islands,Denmark,61.9,-6.9,1,2",
        ]),
        wide_csv(&dates, &[
            ",Sweden,60.1,18.6,0,1",
            ",Denmark,56.2,9.5,1,2",
            "Faroe Islands,Denmark,61.9,-6.9,0,0",
        ]),
        wide_csv(&dates, &[
            ",Sweden,60.1,18.6,0,0",
            ",Denmark,56.2,9.5,0,3",
            "Faroe Islands,Denmark,61.9,-6.9,0,1",
        ]),
    );

    let pipeline = pipeline_with(source);
    let dataset = pipeline.refresh().await?;

    assert_eq!(dataset.records().len(), 6);
    assert_eq!(dataset.countries(), ["Denmark", "Sweden"]);

    let daily = dataset.daily_totals();
    assert_eq!(daily.len(), 2);
    assert!(daily[0].date < daily[1].date);
    assert_eq!(daily[0].confirmed, 15);
    assert_eq!(daily[1].confirmed, 23);
    assert_eq!(daily[1].deaths, 3);
    assert_eq!(daily[1].recovered, 4);
    assert_eq!(daily[1].active, 16);

    let denmark = dataset.daily_totals_for_country("Denmark");
    assert_eq!(denmark.len(), 2);
    assert_eq!(denmark[1].confirmed, 17, "both Danish rows contribute");

    assert!(dataset.daily_totals_for_country("Norway").is_empty());

    Ok(())
}

/// Country names containing commas survive the CSV round trip
#[tokio::test]
async fn test_quoted_country_names() -> covid_series::Result<()> {
    let dates = ["1/22/20", "1/23/20"];
    let source = StaticFeedSource::new(
        wide_csv(&dates, &[",\"Korea, South\",35.9,127.8,1,4"]),
        wide_csv(&dates, &[",\"Korea, South\",35.9,127.8,0,0"]),
        wide_csv(&dates, &[",\"Korea, South\",35.9,127.8,0,1"]),
    );

    let dataset = pipeline_with(source).refresh().await?;
    assert_eq!(dataset.countries(), ["Korea, South"]);
    assert_eq!(dataset.daily_totals_for_country("Korea, South").len(), 2);

    Ok(())
}

/// A region the recovered feed dropped entirely still produces records,
/// with recovered counted as zero
#[tokio::test]
async fn test_region_absent_from_recovered_feed() -> covid_series::Result<()> {
    let dates = ["1/22/20"];
    let source = StaticFeedSource::new(
        wide_csv(&dates, &[",Denmark,56.2,9.5,10", ",Sweden,60.1,18.6,4"]),
        wide_csv(&dates, &[",Denmark,56.2,9.5,1", ",Sweden,60.1,18.6,0"]),
        wide_csv(&dates, &[",Denmark,56.2,9.5,2"]),
    );

    let dataset = pipeline_with(source).refresh().await?;

    let sweden = dataset.records_for_country("Sweden");
    assert_eq!(sweden.len(), 1);
    assert_eq!(sweden[0].recovered, 0);
    assert_eq!(sweden[0].active, 4);

    Ok(())
}

/// An unreachable feed fails the refresh with the feed named
#[tokio::test]
async fn test_unavailable_feed_surfaces_error() {
    let pipeline = pipeline_with(FailingSource);

    let err = pipeline.refresh().await.unwrap_err();
    assert!(matches!(err, PipelineError::FeedUnavailable { .. }));
    assert!(pipeline.snapshot().is_none(), "nothing published on failure");
}

/// A malformed count cell fails the refresh and names feed, row and column
#[tokio::test]
async fn test_malformed_count_surfaces_error() {
    let dates = ["1/22/20"];
    let source = StaticFeedSource::new(
        wide_csv(&dates, &[",Denmark,56.2,9.5,ten"]),
        wide_csv(&dates, &[",Denmark,56.2,9.5,1"]),
        wide_csv(&dates, &[",Denmark,56.2,9.5,2"]),
    );

    let err = pipeline_with(source).refresh().await.unwrap_err();
    match err {
        PipelineError::MalformedFeed { feed, detail } => {
            assert_eq!(feed.as_str(), "confirmed");
            assert!(detail.contains("1/22/20"), "column named in: {detail}");
        }
        other => panic!("expected MalformedFeed, got {other:?}"),
    }
}
