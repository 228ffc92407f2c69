use polars::prelude::{DataFrame, df};
use tempfile::TempDir;

use ivs_validate::{BuildConfig, CheckStatus, Validator, checks, write_report_json};

/// Small stand-in for a merged table: both sources present, four countries.
fn merged_fixture() -> DataFrame {
    df! {
        "S007_01" => [1i64, 2, 3, 4, 5, 6, 7, 8],
        "S024" => [151i64, 152, 161, 162, 241, 242, 251, 252],
        "S001" => [1i64, 1, 1, 2, 2, 2, 2, 2],
    }
    .expect("frame")
}

fn fixture_config() -> BuildConfig {
    BuildConfig::default().with_country_range(2, 6)
}

#[test]
fn battery_runs_in_fixed_order() {
    let config = fixture_config();
    let report = Validator::new(&config).validate(&merged_fixture());

    let names: Vec<&str> = report
        .checks
        .iter()
        .map(|check| check.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            checks::UNIQUE_RESPONDENT_IDS,
            checks::COUNTRY_COUNT,
            checks::COMPOSITION_EVS,
            checks::COMPOSITION_WVS,
            checks::MISSING_VALUES,
            checks::MISSING_VALUES,
            checks::MISSING_VALUES,
        ]
    );
    let audited: Vec<Option<&str>> = report.checks[4..]
        .iter()
        .map(|check| check.column.as_deref())
        .collect();
    assert_eq!(audited, vec![Some("S007_01"), Some("S024"), Some("S001")]);
}

#[test]
fn clean_merge_passes_with_composition_reported() {
    let config = fixture_config();
    let report = Validator::new(&config).validate(&merged_fixture());

    assert!(!report.has_failures());
    // countries 15, 16, 24, 25
    let countries = report.find(checks::COUNTRY_COUNT).expect("country check");
    assert_eq!(countries.count, Some(4));
    let evs = report.find(checks::COMPOSITION_EVS).expect("evs share");
    assert_eq!(evs.status, CheckStatus::Info);
    assert_eq!(evs.share, Some(37.5));
    let wvs = report.find(checks::COMPOSITION_WVS).expect("wvs share");
    assert_eq!(wvs.share, Some(62.5));
}

#[test]
fn duplicate_and_missing_failures_accumulate() {
    let config = fixture_config();
    let frame = df! {
        "S007_01" => [1i64, 1, 2, 3],
        "S024" => [Some(151i64), Some(152), None, Some(241)],
        "S001" => [1i64, 1, 2, 2],
    }
    .expect("frame");

    let report = Validator::new(&config).validate(&frame);

    // one duplicated id, one null country-wave cell
    assert_eq!(report.failure_count(), 2);
    let unique = report
        .find(checks::UNIQUE_RESPONDENT_IDS)
        .expect("uniqueness");
    assert_eq!(unique.count, Some(1));
    let audit = report
        .checks
        .iter()
        .find(|check| {
            check.name == checks::MISSING_VALUES && check.column.as_deref() == Some("S024")
        })
        .expect("audit result");
    assert_eq!(audit.status, CheckStatus::Fail);
    assert_eq!(audit.count, Some(1));
}

#[test]
fn report_file_matches_the_battery() {
    let config = fixture_config();
    let report = Validator::new(&config).validate(&merged_fixture());

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("ivs.validation.json");
    write_report_json(&path, &report).expect("write report");

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read file"))
            .expect("parse json");
    assert_eq!(value["failure_count"], 0);
    assert_eq!(
        value["checks"].as_array().expect("checks").len(),
        report.checks.len()
    );
    assert_eq!(value["checks"][0]["name"], checks::UNIQUE_RESPONDENT_IDS);
    assert_eq!(value["checks"][2]["share"], 37.5);
}
