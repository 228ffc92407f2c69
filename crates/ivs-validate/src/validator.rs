//! Structural checks for the merged IVS table.
//!
//! The battery runs after merge and reports, it never rejects:
//!
//! - **unique_respondent_ids**: duplicate id values → **Fail**
//! - **country_count**: distinct countries (from the composite country-wave
//!   code) outside the configured bounds → **Fail**
//! - **composition_evs / composition_wvs**: per-source row shares → **Info**
//! - **missing_values**: per key column, any missing value → **Fail**
//!
//! A key column absent from the table altogether is reported as **Fail** on
//! the corresponding check; the battery itself never errors or panics.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, DataFrame};

use ivs_ingest::{any_to_i64, any_to_string, is_missing};
use ivs_model::{BuildConfig, CheckResult, CheckStatus, ValidationReport, checks};

/// Check battery bound to one build configuration.
pub struct Validator<'a> {
    config: &'a BuildConfig,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    /// Run every check against the merged table.
    ///
    /// Results come back in battery order: uniqueness, country count, the
    /// two composition shares, then one missing-value audit per key column.
    pub fn validate(&self, df: &DataFrame) -> ValidationReport {
        let mut results = Vec::with_capacity(7);
        results.push(self.check_unique_ids(df));
        results.push(self.check_country_count(df));
        results.extend(self.check_composition(df));
        for column in self.config.columns.audited() {
            results.push(check_missing_values(df, column));
        }
        ValidationReport { checks: results }
    }

    /// Duplicate respondent ids break downstream joins.
    fn check_unique_ids(&self, df: &DataFrame) -> CheckResult {
        let column = &self.config.columns.respondent_id;
        let Some(duplicates) = count_duplicates(df, column) else {
            return missing_column_result(checks::UNIQUE_RESPONDENT_IDS, column);
        };

        if duplicates == 0 {
            CheckResult {
                name: checks::UNIQUE_RESPONDENT_IDS.to_string(),
                status: CheckStatus::Pass,
                column: Some(column.clone()),
                message: format!("no duplicate respondent ids across {} rows", df.height()),
                count: Some(0),
                share: None,
            }
        } else {
            CheckResult {
                name: checks::UNIQUE_RESPONDENT_IDS.to_string(),
                status: CheckStatus::Fail,
                column: Some(column.clone()),
                message: format!("{duplicates} duplicate respondent id value(s)"),
                count: Some(duplicates),
                share: None,
            }
        }
    }

    /// Distinct-country cardinality, derived as `floor(country_wave / 10)`.
    fn check_country_count(&self, df: &DataFrame) -> CheckResult {
        let column = &self.config.columns.country_wave;
        let Some(countries) = count_distinct_countries(df, column) else {
            return missing_column_result(checks::COUNTRY_COUNT, column);
        };

        let range = self.config.country_range;
        if range.contains(countries) {
            CheckResult {
                name: checks::COUNTRY_COUNT.to_string(),
                status: CheckStatus::Pass,
                column: Some(column.clone()),
                message: format!("{countries} distinct countries"),
                count: Some(countries),
                share: None,
            }
        } else {
            CheckResult {
                name: checks::COUNTRY_COUNT.to_string(),
                status: CheckStatus::Fail,
                column: Some(column.clone()),
                message: format!(
                    "{countries} distinct countries, expected between {} and {}",
                    range.lower, range.upper
                ),
                count: Some(countries),
                share: None,
            }
        }
    }

    /// Row share contributed by each source, from the source-flag column.
    fn check_composition(&self, df: &DataFrame) -> Vec<CheckResult> {
        let column = &self.config.columns.source_flag;
        let Ok(series) = df.column(column) else {
            return vec![
                missing_column_result(checks::COMPOSITION_EVS, column),
                missing_column_result(checks::COMPOSITION_WVS, column),
            ];
        };

        let total = df.height();
        let mut evs_rows = 0u64;
        let mut wvs_rows = 0u64;
        for idx in 0..total {
            match any_to_i64(series.get(idx).unwrap_or(AnyValue::Null)) {
                Some(flag) if flag == self.config.flags.evs => evs_rows += 1,
                Some(flag) if flag == self.config.flags.wvs => wvs_rows += 1,
                _ => {}
            }
        }

        vec![
            composition_result(checks::COMPOSITION_EVS, "EVS", column, evs_rows, total),
            composition_result(checks::COMPOSITION_WVS, "WVS", column, wvs_rows, total),
        ]
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn missing_column_result(name: &str, column: &str) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status: CheckStatus::Fail,
        column: Some(column.to_string()),
        message: format!("column '{column}' not found in merged table"),
        count: None,
        share: None,
    }
}

fn composition_result(
    name: &str,
    label: &str,
    column: &str,
    rows: u64,
    total: usize,
) -> CheckResult {
    let share = percent(rows, total);
    CheckResult {
        name: name.to_string(),
        status: CheckStatus::Info,
        column: Some(column.to_string()),
        message: format!("{label} contributes {rows} of {total} rows ({share:.1}%)"),
        count: Some(rows),
        share: Some(share),
    }
}

fn check_missing_values(df: &DataFrame, column: &str) -> CheckResult {
    let Some(missing) = count_missing(df, column) else {
        return missing_column_result(checks::MISSING_VALUES, column);
    };

    let share = percent(missing, df.height());
    let status = if missing == 0 {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    CheckResult {
        name: checks::MISSING_VALUES.to_string(),
        status,
        column: Some(column.to_string()),
        message: format!(
            "{missing} missing value(s) in {} rows ({share:.1}%)",
            df.height()
        ),
        count: Some(missing),
        share: Some(share),
    }
}

fn count_duplicates(df: &DataFrame, column: &str) -> Option<u64> {
    let series = df.column(column).ok()?;
    let mut seen = BTreeSet::new();
    let mut duplicates = 0u64;
    for idx in 0..df.height() {
        let value = any_to_string(series.get(idx).unwrap_or(AnyValue::Null));
        if !seen.insert(value.trim().to_string()) {
            duplicates += 1;
        }
    }
    Some(duplicates)
}

fn count_distinct_countries(df: &DataFrame, column: &str) -> Option<u64> {
    let series = df.column(column).ok()?;
    let mut countries = BTreeSet::new();
    for idx in 0..df.height() {
        if let Some(code) = any_to_i64(series.get(idx).unwrap_or(AnyValue::Null)) {
            // Floor, not truncate: negative sentinel codes keep their own bucket
            countries.insert(code.div_euclid(10));
        }
    }
    Some(countries.len() as u64)
}

fn count_missing(df: &DataFrame, column: &str) -> Option<u64> {
    let series = df.column(column).ok()?;
    let mut count = 0u64;
    for idx in 0..df.height() {
        if is_missing(&series.get(idx).unwrap_or(AnyValue::Null)) {
            count += 1;
        }
    }
    Some(count)
}

/// Share of `part` in `total` rows, in percent. Zero for an empty table.
fn percent(part: u64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}
