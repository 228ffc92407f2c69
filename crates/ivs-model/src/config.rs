//! Configuration for the IVS build pipeline.
//!
//! Everything the pipeline needs to know about its two sources arrives
//! through these types: which column carries the wave indicator in each
//! extract, which waves to retain, which columns key the merged table, and
//! the bounds the country-cardinality check is held to. Defaults match the
//! published WVS/EVS trend files.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Wave selection and column naming for one source extract.
///
/// The wave-indicator column is named differently in each extract for the
/// same semantic field (`s002` in WVS, `S002EVS` in EVS), so the mapping is
/// carried per source instead of hard-coded in the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Source label used in logs and error messages (e.g. "WVS").
    pub label: String,
    /// Name of the wave-indicator column in this extract.
    pub wave_column: String,
    /// Wave codes to retain.
    pub waves: BTreeSet<i64>,
}

impl SourceSpec {
    pub fn new(
        label: impl Into<String>,
        wave_column: impl Into<String>,
        waves: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self {
            label: label.into(),
            wave_column: wave_column.into(),
            waves: waves.into_iter().collect(),
        }
    }

    /// WVS trend extract: lowercase wave column.
    pub fn wvs(waves: impl IntoIterator<Item = i64>) -> Self {
        Self::new("WVS", "s002", waves)
    }

    /// EVS trend extract.
    pub fn evs(waves: impl IntoIterator<Item = i64>) -> Self {
        Self::new("EVS", "S002EVS", waves)
    }

    #[must_use]
    pub fn with_waves(mut self, waves: impl IntoIterator<Item = i64>) -> Self {
        self.waves = waves.into_iter().collect();
        self
    }
}

/// Names of the key columns shared by both extracts post-merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumns {
    /// Respondent identifier, the merge sort key.
    pub respondent_id: String,
    /// Composite country-wave code (`country*10 + wave`).
    pub country_wave: String,
    /// Survey-of-origin flag.
    pub source_flag: String,
}

impl Default for KeyColumns {
    fn default() -> Self {
        Self {
            respondent_id: "S007_01".to_string(),
            country_wave: "S024".to_string(),
            source_flag: "S001".to_string(),
        }
    }
}

impl KeyColumns {
    /// Columns audited for missing values, in report order.
    pub fn audited(&self) -> [&str; 3] {
        [&self.respondent_id, &self.country_wave, &self.source_flag]
    }
}

/// Source-flag column values identifying each survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFlags {
    pub evs: i64,
    pub wvs: i64,
}

impl Default for SourceFlags {
    fn default() -> Self {
        Self { evs: 1, wvs: 2 }
    }
}

/// Inclusive bounds for the distinct-country count check.
///
/// The combined trend files cover roughly 112 countries; counts outside
/// these bounds indicate a wave-selection or merge problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRange {
    pub lower: u64,
    pub upper: u64,
}

impl Default for CountryRange {
    fn default() -> Self {
        Self {
            lower: 100,
            upper: 120,
        }
    }
}

impl CountryRange {
    pub fn contains(&self, count: u64) -> bool {
        (self.lower..=self.upper).contains(&count)
    }
}

/// Complete configuration for one build invocation.
///
/// Passed explicitly into the pipeline; there are no module-level wave
/// constants or other implicit globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub wvs: SourceSpec,
    pub evs: SourceSpec,
    pub columns: KeyColumns,
    pub flags: SourceFlags,
    pub country_range: CountryRange,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            wvs: SourceSpec::wvs([5, 6, 7]),
            evs: SourceSpec::evs([4, 5]),
            columns: KeyColumns::default(),
            flags: SourceFlags::default(),
            country_range: CountryRange::default(),
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_wvs_waves(mut self, waves: impl IntoIterator<Item = i64>) -> Self {
        self.wvs.waves = waves.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_evs_waves(mut self, waves: impl IntoIterator<Item = i64>) -> Self {
        self.evs.waves = waves.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_country_range(mut self, lower: u64, upper: u64) -> Self {
        self.country_range = CountryRange { lower, upper };
        self
    }
}
