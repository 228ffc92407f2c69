//! Shared model types for the Integrated Values Survey builder.

pub mod config;
pub mod report;

pub use config::{BuildConfig, CountryRange, KeyColumns, SourceFlags, SourceSpec};
pub use report::{CheckResult, CheckStatus, ValidationReport, checks};
