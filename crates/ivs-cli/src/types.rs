use std::path::PathBuf;

use ivs_model::ValidationReport;

#[derive(Debug)]
pub struct BuildOutcome {
    pub output: PathBuf,
    pub metadata: PathBuf,
    pub report_file: Option<PathBuf>,
    pub rows: usize,
    pub columns: usize,
    pub report: ValidationReport,
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub input: PathBuf,
    pub report_file: Option<PathBuf>,
    pub rows: usize,
    pub report: ValidationReport,
}
