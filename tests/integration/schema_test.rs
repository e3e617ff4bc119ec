use crate::utils::{pipeline_with, wide_csv};
use covid_series::{PipelineError, StaticFeedSource};

/// A feed with fewer date columns than confirmed fails schema validation
#[tokio::test]
async fn test_misaligned_date_columns_fail_refresh() {
    let source = StaticFeedSource::new(
        wide_csv(&["1/22/20", "1/23/20"], &[",Denmark,56.2,9.5,10,15"]),
        wide_csv(&["1/22/20"], &[",Denmark,56.2,9.5,1"]),
        wide_csv(&["1/22/20", "1/23/20"], &[",Denmark,56.2,9.5,0,3"]),
    );

    let err = pipeline_with(source).refresh().await.unwrap_err();
    match err {
        PipelineError::SchemaMismatch { issues } => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].feed.as_str(), "deaths");
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

/// A renamed identity column fails schema validation and names the column
#[tokio::test]
async fn test_renamed_identity_header_fails_refresh() {
    let dates = ["1/22/20"];
    let renamed = format!(
        "State,Country/Region,Lat,Long,{}\n,Denmark,56.2,9.5,2\n",
        dates[0]
    );
    let source = StaticFeedSource::new(
        wide_csv(&dates, &[",Denmark,56.2,9.5,10"]),
        wide_csv(&dates, &[",Denmark,56.2,9.5,1"]),
        renamed,
    );

    let err = pipeline_with(source).refresh().await.unwrap_err();
    match err {
        PipelineError::SchemaMismatch { issues } => {
            assert!(issues.iter().any(|issue| {
                issue.feed.as_str() == "recovered" && issue.description.contains("'State'")
            }));
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

/// An unparseable date label aborts the run before any reshaping
#[tokio::test]
async fn test_bad_date_label_fails_refresh() {
    let source = StaticFeedSource::new(
        wide_csv(&["Jan 22"], &[",Denmark,56.2,9.5,10"]),
        wide_csv(&["Jan 22"], &[",Denmark,56.2,9.5,1"]),
        wide_csv(&["Jan 22"], &[",Denmark,56.2,9.5,0"]),
    );

    let err = pipeline_with(source).refresh().await.unwrap_err();
    match err {
        PipelineError::UnparseableDate { value, .. } => assert_eq!(value, "Jan 22"),
        other => panic!("expected UnparseableDate, got {other:?}"),
    }
}

/// Findings from several feeds are reported together, not one at a time
#[tokio::test]
async fn test_all_issues_reported_together() {
    let source = StaticFeedSource::new(
        wide_csv(&["1/22/20", "1/23/20"], &[",Denmark,56.2,9.5,10,15"]),
        wide_csv(&["1/22/20"], &[",Denmark,56.2,9.5,1"]),
        wide_csv(&["1/23/20", "1/22/20"], &[",Denmark,56.2,9.5,3,0"]),
    );

    let err = pipeline_with(source).refresh().await.unwrap_err();
    match err {
        PipelineError::SchemaMismatch { issues } => {
            let feeds: Vec<_> = issues.iter().map(|issue| issue.feed.as_str()).collect();
            assert!(feeds.contains(&"deaths"), "issues: {issues:?}");
            assert!(feeds.contains(&"recovered"), "issues: {issues:?}");

            // The error display carries every finding.
            let message = PipelineError::SchemaMismatch { issues }.to_string();
            assert!(message.contains("deaths"));
            assert!(message.contains("recovered"));
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}
