//! Concatenation and ordering of the filtered extracts.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, DataFrame, DataType, PlSmallStr, Series, SortMultipleOptions};
use tracing::{debug, info};

use ivs_ingest::any_to_string;
use ivs_model::KeyColumns;

use crate::error::{BuildError, Result};

/// Concatenates two filtered tables and stable-sorts by respondent id.
///
/// The output column set is the union of both inputs; columns absent from
/// one side hold nulls for its rows. The sort keeps the pre-sort relative
/// order of equal identifiers, so numerically colliding legacy ids stay
/// inspectable instead of being shuffled.
pub fn merge_sorted(a: &DataFrame, b: &DataFrame, columns: &KeyColumns) -> Result<DataFrame> {
    require_column(a, "first", &columns.respondent_id)?;
    require_column(b, "second", &columns.respondent_id)?;

    let layout = column_union(a, b);
    let mut merged = align_to(a, &layout)?;
    let aligned_b = align_to(b, &layout)?;
    merged.vstack_mut(&aligned_b)?;

    let sorted = merged.sort(
        [columns.respondent_id.as_str()],
        SortMultipleOptions::default()
            .with_maintain_order(true)
            .with_nulls_last(true),
    )?;

    info!(
        rows = sorted.height(),
        columns = sorted.width(),
        sort_key = %columns.respondent_id,
        "tables merged and sorted"
    );
    log_source_breakdown(&sorted, &columns.source_flag);

    Ok(sorted)
}

fn require_column(df: &DataFrame, table: &str, column: &str) -> Result<()> {
    if df.column(column).is_err() {
        return Err(BuildError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        });
    }
    Ok(())
}

/// Union of both frames' columns: all of `a`'s in order, then `b`-only ones.
fn column_union(a: &DataFrame, b: &DataFrame) -> Vec<(PlSmallStr, DataType)> {
    let mut layout: Vec<(PlSmallStr, DataType)> = Vec::with_capacity(a.width() + b.width());
    for column in a.get_columns() {
        layout.push((column.name().clone(), column.dtype().clone()));
    }
    for column in b.get_columns() {
        if a.column(column.name()).is_err() {
            layout.push((column.name().clone(), column.dtype().clone()));
        }
    }
    layout
}

/// Returns `df` with every layout column present (null-filled when absent)
/// and columns ordered per the layout.
fn align_to(df: &DataFrame, layout: &[(PlSmallStr, DataType)]) -> Result<DataFrame> {
    let mut aligned = df.clone();
    for (name, dtype) in layout {
        if aligned.column(name).is_err() {
            let filler = Series::full_null(name.clone(), aligned.height(), dtype);
            aligned.with_column(filler)?;
        }
    }
    let names: Vec<PlSmallStr> = layout.iter().map(|(name, _)| name.clone()).collect();
    Ok(aligned.select(names)?)
}

/// Post-merge row breakdown by source flag, reporting only.
fn log_source_breakdown(df: &DataFrame, flag_column: &str) {
    let Ok(series) = df.column(flag_column) else {
        debug!(column = flag_column, "source flag column absent, skipping breakdown");
        return;
    };
    let mut by_source: BTreeMap<String, u64> = BTreeMap::new();
    for idx in 0..df.height() {
        let value = any_to_string(series.get(idx).unwrap_or(AnyValue::Null));
        let key = if value.trim().is_empty() {
            "missing".to_string()
        } else {
            value
        };
        *by_source.entry(key).or_insert(0) += 1;
    }
    for (flag, rows) in by_source {
        info!(flag = %flag, rows, "source breakdown");
    }
}
