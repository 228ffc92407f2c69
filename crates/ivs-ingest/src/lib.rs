//! Survey extract ingestion: CSV loading, writing, and value helpers.

pub mod csv;
pub mod error;
pub mod values;

pub use csv::{read_survey_csv, write_survey_csv};
pub use error::{IngestError, Result};
pub use values::{any_to_i64, any_to_string, format_numeric, is_missing, parse_i64};
