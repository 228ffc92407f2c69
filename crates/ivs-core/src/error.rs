//! Error types for the build core.

use thiserror::Error;

/// Errors raised by the filter and merge operations.
///
/// A missing column is a structural mismatch the caller must fix upstream
/// (wrong file, wrong wave-variable naming), so it always aborts the build;
/// nothing here is retried or recovered internally.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required column is absent from an input table.
    #[error("column '{column}' not found in {table} table")]
    MissingColumn { table: String, column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for BuildError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildError::MissingColumn {
            table: "WVS".to_string(),
            column: "s002".to_string(),
        };
        assert_eq!(err.to_string(), "column 's002' not found in WVS table");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("S007_01".into());
        let build_err: BuildError = polars_err.into();
        assert!(matches!(build_err, BuildError::Frame { .. }));
    }
}
