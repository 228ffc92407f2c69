//! Validation battery for the merged IVS table.
//!
//! The battery is pure over the table and its [`BuildConfig`]: it measures,
//! it never mutates and never aborts. Failed checks land in the
//! [`ValidationReport`] for operator review; [`report::write_report_json`]
//! persists them next to the merged output.

pub mod report;
pub mod validator;

pub use report::write_report_json;
pub use validator::Validator;

// Re-exported so battery consumers need only this crate.
pub use ivs_model::{BuildConfig, CheckResult, CheckStatus, ValidationReport, checks};
