//! IVS build pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: read each trend extract from CSV
//! 2. **Filter**: keep only the requested waves per source
//! 3. **Merge**: concatenate with a column union, stable-sort by respondent id
//! 4. **Validate**: run the structural check battery
//! 5. **Write**: merged CSV, metadata JSON, validation report JSON
//!
//! Filter through validate are pure over in-memory tables; all I/O sits in
//! the load and write stages so tests can drive the core without disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, info_span};

use ivs_core::{filter_waves, merge_sorted};
use ivs_ingest::{read_survey_csv, write_survey_csv};
use ivs_model::{BuildConfig, SourceSpec, ValidationReport, checks};
use ivs_validate::{Validator, write_report_json};

const METADATA_SCHEMA: &str = "ivs-pipeline.build-metadata";
const METADATA_SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Reads one trend extract from disk.
pub fn load_extract(path: &Path, spec: &SourceSpec) -> Result<DataFrame> {
    let span = info_span!("load", source = %spec.label);
    let _guard = span.enter();
    let start = Instant::now();

    let df = read_survey_csv(path)
        .with_context(|| format!("read {} extract from {}", spec.label, path.display()))?;

    info!(
        source = %spec.label,
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "extract loaded"
    );
    Ok(df)
}

// ============================================================================
// Stages 2-4: Filter, Merge, Validate
// ============================================================================

/// Pure core of the build: filter both extracts, merge, validate.
///
/// Returns the merged table together with its check battery results. A
/// missing wave or id column aborts with a schema error; failed checks do
/// not, they ride along in the report.
pub fn build(
    wvs: &DataFrame,
    evs: &DataFrame,
    config: &BuildConfig,
) -> ivs_core::Result<(DataFrame, ValidationReport)> {
    let filter_span = info_span!("filter");
    let filter_start = Instant::now();
    let (filtered_wvs, filtered_evs) = filter_span.in_scope(|| -> ivs_core::Result<_> {
        let wvs_rows = filter_waves(wvs, &config.wvs)?;
        let evs_rows = filter_waves(evs, &config.evs)?;
        Ok((wvs_rows, evs_rows))
    })?;
    info!(
        wvs_rows = filtered_wvs.height(),
        evs_rows = filtered_evs.height(),
        duration_ms = filter_start.elapsed().as_millis(),
        "wave filtering complete"
    );

    let merge_span = info_span!("merge");
    let merge_start = Instant::now();
    let merged =
        merge_span.in_scope(|| merge_sorted(&filtered_wvs, &filtered_evs, &config.columns))?;
    info!(
        rows = merged.height(),
        columns = merged.width(),
        duration_ms = merge_start.elapsed().as_millis(),
        "merge complete"
    );

    let validate_span = info_span!("validate");
    let validate_start = Instant::now();
    let report = validate_span.in_scope(|| Validator::new(config).validate(&merged));
    info!(
        checks = report.checks.len(),
        failures = report.failure_count(),
        duration_ms = validate_start.elapsed().as_millis(),
        "validation complete"
    );

    Ok((merged, report))
}

// ============================================================================
// Stage 5: Write
// ============================================================================

/// Paths of the companion artifacts written beside the merged CSV.
#[derive(Debug)]
pub struct WrittenArtifacts {
    pub metadata: PathBuf,
    pub report_file: Option<PathBuf>,
}

/// Writes the merged table and its companion artifacts.
///
/// The metadata lands at `<output stem>.metadata.json`, the validation
/// report (unless suppressed) at `<output stem>.validation.json`.
pub fn write_outputs(
    merged: &mut DataFrame,
    report: &ValidationReport,
    config: &BuildConfig,
    out: &Path,
    with_report: bool,
) -> Result<WrittenArtifacts> {
    let span = info_span!("write");
    let _guard = span.enter();
    let start = Instant::now();

    write_survey_csv(merged, out)
        .with_context(|| format!("write merged table to {}", out.display()))?;
    let metadata = write_metadata_json(out, merged, report, config)?;
    let report_file = if with_report {
        Some(write_report_json(&out.with_extension("validation.json"), report)?)
    } else {
        None
    };

    info!(
        output = %out.display(),
        metadata = %metadata.display(),
        duration_ms = start.elapsed().as_millis(),
        "artifacts written"
    );
    Ok(WrittenArtifacts {
        metadata,
        report_file,
    })
}

#[derive(Debug, Serialize)]
struct MetadataPayload {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    n_rows: usize,
    n_cols: usize,
    /// Distinct countries, taken from the country-cardinality check. Null
    /// when the country-wave column was absent.
    n_countries: Option<u64>,
    wvs_waves: Vec<i64>,
    evs_waves: Vec<i64>,
}

fn write_metadata_json(
    out: &Path,
    merged: &DataFrame,
    report: &ValidationReport,
    config: &BuildConfig,
) -> Result<PathBuf> {
    let path = out.with_extension("metadata.json");
    let payload = MetadataPayload {
        schema: METADATA_SCHEMA,
        schema_version: METADATA_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        n_rows: merged.height(),
        n_cols: merged.width(),
        n_countries: report
            .find(checks::COUNTRY_COUNT)
            .and_then(|check| check.count),
        wvs_waves: config.wvs.waves.iter().copied().collect(),
        evs_waves: config.evs.waves.iter().copied().collect(),
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize build metadata")?;
    std::fs::write(&path, format!("{json}\n"))
        .with_context(|| format!("write build metadata to {}", path.display()))?;
    Ok(path)
}
