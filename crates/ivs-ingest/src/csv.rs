//! Survey extract reading and writing via Polars CSV.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads a survey extract into a DataFrame.
///
/// The extract must carry a single header row naming its columns. Values
/// keep whatever dtype schema inference assigns; the key columns in the
/// trend files are plain integer codes.
pub fn read_survey_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "extract loaded"
    );
    Ok(df)
}

/// Writes a table as CSV with a header row, creating parent directories.
pub fn write_survey_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(file).include_header(true).finish(df)?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "table written"
    );
    Ok(())
}
