// Integration tests for the classification diff
// These tests load the fixture reports and invoked methods end to end

use instrumap::commands::{run_diff, DiffOptions};
use instrumap::config::FailurePolicy;
use instrumap::io::read_table;
use instrumap::reports::ReportSources;
use instrumap::Error;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fixtures")
        .join(name)
}

fn options(sources: ReportSources, output: &Path) -> DiffOptions {
    DiffOptions {
        invoked_methods: fixture("invoked-methods.csv"),
        sources,
        report_file_name: "methods.json".to_string(),
        output: output.to_path_buf(),
        summary_json: None,
        failure_policy: FailurePolicy::FailFast,
    }
}

fn after_column(path: &Path) -> Vec<(String, String)> {
    let table = read_table(path).unwrap();
    let after = table.headers.len() - 1;
    table
        .rows
        .iter()
        .map(|r| (r[2].clone(), r[after].clone()))
        .collect()
}

#[test]
fn test_diff_against_report_folder() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("result.csv");
    let sources = ReportSources::new(vec![], vec![fixture("reports")]).unwrap();

    let summary = run_diff(&options(sources, &output)).unwrap();

    assert_eq!(summary.methods, 4);
    assert_eq!(summary.report_conflicts, 0);

    let h = &summary.histogram;
    assert_eq!(h.get("pseudo-tested-before"), Some(1));
    assert_eq!(h.get("partially-tested-before"), Some(1));
    assert_eq!(h.get("not-covered-before"), Some(1));
    assert_eq!(h.get("tested-before"), Some(1));
    assert_eq!(h.get("tested-after"), Some(2));
    assert_eq!(h.get("partially-tested-after"), Some(2));
    assert_eq!(h.get("not-covered-after"), Some(0));
    assert_eq!(h.get("pseudo-tested-after"), Some(0));

    let table = read_table(&output).unwrap();
    assert_eq!(table.headers.last().map(String::as_str), Some("classification-after"));
    assert_eq!(table.headers.len(), 7);

    assert_eq!(
        after_column(&output),
        vec![
            ("accept".to_string(), "tested".to_string()),
            // not-covered in the new report keeps the old classification
            ("maybeApplyHeaderExtension".to_string(), "partially-tested".to_string()),
            ("rewriteRtp".to_string(), "partially-tested".to_string()),
            ("conferenceRequest".to_string(), "tested".to_string()),
        ]
    );
}

#[test]
fn test_later_report_wins_on_collision() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("result.csv");
    let videobridge = fixture("reports/videobridge/target/pit-reports/methods.json");
    let jicofo = fixture("reports/jicofo/target/pit-reports/methods.json");

    let sources = ReportSources::new(
        vec![videobridge.clone(), fixture("methods-override.json"), jicofo.clone()],
        vec![],
    )
    .unwrap();
    let summary = run_diff(&options(sources, &output)).unwrap();
    assert_eq!(summary.report_conflicts, 1);
    assert_eq!(after_column(&output)[0].1, "pseudo-tested");

    let sources = ReportSources::new(
        vec![fixture("methods-override.json"), videobridge, jicofo],
        vec![],
    )
    .unwrap();
    run_diff(&options(sources, &output)).unwrap();
    assert_eq!(after_column(&output)[0].1, "tested");
}

#[test]
fn test_method_missing_from_reports_aborts() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("result.csv");
    let sources = ReportSources::new(
        vec![fixture("reports/videobridge/target/pit-reports/methods.json")],
        vec![],
    )
    .unwrap();

    let err = run_diff(&options(sources, &output)).unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::MissingClassification { key }) => {
            assert_eq!(key, "org.jitsi.jicofo.FocusManager.conferenceRequest")
        }
        other => panic!("expected missing classification, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_malformed_report_aborts() {
    let temp = TempDir::new().unwrap();
    let sources = ReportSources::new(vec![fixture("malformed-report.json")], vec![]).unwrap();

    let err = run_diff(&options(sources, &temp.path().join("result.csv"))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::ReportParse { .. })
    ));
}

#[test]
fn test_skip_invalid_and_summary_json() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("result.csv");
    let summary_path = temp.path().join("summary.json");
    let sources = ReportSources::new(
        vec![fixture("reports/videobridge/target/pit-reports/methods.json")],
        vec![],
    )
    .unwrap();

    let mut opts = options(sources, &output);
    opts.failure_policy = FailurePolicy::SkipInvalid;
    opts.summary_json = Some(summary_path.clone());

    let summary = run_diff(&opts).unwrap();
    assert_eq!(summary.methods, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(read_table(&output).unwrap().rows.len(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(json["tested-after"], 1);
    assert_eq!(json["partially-tested-after"], 2);
    assert_eq!(json["pseudo-tested-before"], 1);
}
