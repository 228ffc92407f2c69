//! Validation report types.

use serde::{Deserialize, Serialize};

/// Stable names for the battery's checks.
pub mod checks {
    pub const UNIQUE_RESPONDENT_IDS: &str = "unique_respondent_ids";
    pub const COUNTRY_COUNT: &str = "country_count";
    pub const COMPOSITION_EVS: &str = "composition_evs";
    pub const COMPOSITION_WVS: &str = "composition_wvs";
    pub const MISSING_VALUES: &str = "missing_values";
}

/// Outcome of a single structural check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Informational measurement with no pass/fail semantics.
    Info,
}

/// A named check result with its measured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Stable check name (see [`checks`]).
    pub name: String,
    /// Pass/fail/info outcome.
    pub status: CheckStatus,
    /// Column the check inspected, if column-scoped.
    pub column: Option<String>,
    /// Human-readable outcome description.
    pub message: String,
    /// Measured count (duplicates, distinct countries, missing values, rows).
    pub count: Option<u64>,
    /// Measured share of total rows, in percent.
    pub share: Option<f64>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }

    pub fn failed(&self) -> bool {
        self.status == CheckStatus::Fail
    }
}

/// Ordered results of the full check battery for one merged table.
///
/// Produced once per build and never mutated afterwards. Failed checks are
/// surfaced here for operator review; they never abort the build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|check| check.failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// First result with the given name (per-column results share a name;
    /// pair with [`CheckResult::column`] to disambiguate).
    pub fn find(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.name == name)
    }
}
