//! Wave filtering for a single source extract.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};
use tracing::{debug, info};

use ivs_ingest::any_to_i64;
use ivs_model::SourceSpec;

use crate::error::{BuildError, Result};

/// Retains only the rows whose wave code is a member of the requested set.
///
/// The wave-indicator column name differs per extract and arrives via the
/// source spec. Row order and the column set are preserved; rows with a
/// missing or unparseable wave code are never members and drop out.
pub fn filter_waves(df: &DataFrame, spec: &SourceSpec) -> Result<DataFrame> {
    let series = df
        .column(&spec.wave_column)
        .map_err(|_| BuildError::MissingColumn {
            table: spec.label.clone(),
            column: spec.wave_column.clone(),
        })?;

    let mut keep = Vec::with_capacity(df.height());
    let mut kept_by_wave: BTreeMap<i64, u64> = BTreeMap::new();
    for idx in 0..df.height() {
        let retain = match any_to_i64(series.get(idx).unwrap_or(AnyValue::Null)) {
            Some(code) if spec.waves.contains(&code) => {
                *kept_by_wave.entry(code).or_insert(0) += 1;
                true
            }
            _ => false,
        };
        keep.push(retain);
    }

    let mask = BooleanChunked::from_slice("wave_filter".into(), &keep);
    let filtered = df.filter(&mask)?;

    info!(
        source = %spec.label,
        total_rows = df.height(),
        kept_rows = filtered.height(),
        "wave filter applied"
    );
    for (wave, rows) in kept_by_wave {
        debug!(source = %spec.label, wave, rows, "wave breakdown");
    }

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn spec(waves: impl IntoIterator<Item = i64>) -> SourceSpec {
        SourceSpec::new("WVS", "s002", waves)
    }

    #[test]
    fn test_keeps_only_requested_waves() {
        let df = df! {
            "s002" => [4i64, 5, 6, 7, 4],
            "S007_01" => [10i64, 20, 30, 40, 50],
        }
        .unwrap();

        let filtered = filter_waves(&df, &spec([5, 6, 7])).unwrap();

        assert_eq!(filtered.height(), 3);
        let ids: Vec<Option<i64>> = filtered
            .column("S007_01")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ids, vec![Some(20), Some(30), Some(40)]);
    }

    #[test]
    fn test_preserves_source_row_order() {
        let df = df! {
            "s002" => [6i64, 5, 6, 5],
            "S007_01" => [4i64, 3, 2, 1],
        }
        .unwrap();

        let filtered = filter_waves(&df, &spec([5, 6])).unwrap();

        let ids: Vec<Option<i64>> = filtered
            .column("S007_01")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        // No reordering before the merge sort
        assert_eq!(ids, vec![Some(4), Some(3), Some(2), Some(1)]);
    }

    #[test]
    fn test_missing_wave_column_is_schema_error() {
        let df = df! {
            "S002EVS" => [4i64, 5],
        }
        .unwrap();

        let result = filter_waves(&df, &spec([5]));

        assert!(matches!(
            result,
            Err(BuildError::MissingColumn { ref column, .. }) if column == "s002"
        ));
    }

    #[test]
    fn test_no_matching_waves_yields_empty_frame() {
        let df = df! {
            "s002" => [1i64, 2, 3],
        }
        .unwrap();

        let filtered = filter_waves(&df, &spec([5, 6, 7])).unwrap();

        assert_eq!(filtered.height(), 0);
        assert_eq!(filtered.width(), 1);
    }

    #[test]
    fn test_null_wave_codes_drop_out() {
        let df = df! {
            "s002" => [Some(5i64), None, Some(6), None],
        }
        .unwrap();

        let filtered = filter_waves(&df, &spec([5, 6])).unwrap();

        assert_eq!(filtered.height(), 2);
    }
}
