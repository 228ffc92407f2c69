//! CLI argument definitions for the IVS builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ivs",
    version,
    about = "Integrated Values Surveys builder - merge WVS and EVS trend extracts",
    long_about = "Build the Integrated Values Surveys (IVS) table from the World Values\n\
                  Survey and European Values Study trend extracts: filter each file to\n\
                  the requested waves, concatenate with a column union, sort by\n\
                  respondent id, and run the structural check battery."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the merged IVS table from the two trend extracts.
    Build(BuildArgs),

    /// Run the check battery against an existing merged table.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Path to the WVS trend CSV extract.
    #[arg(
        long = "wvs",
        value_name = "PATH",
        default_value = "data/raw/csv/wvs_trend_1981-2022.csv"
    )]
    pub wvs: PathBuf,

    /// Path to the EVS trend CSV extract.
    #[arg(
        long = "evs",
        value_name = "PATH",
        default_value = "data/raw/csv/evs_trend_1981-2017.csv"
    )]
    pub evs: PathBuf,

    /// WVS wave codes to keep, comma separated.
    #[arg(
        long = "wvs-waves",
        value_name = "WAVES",
        value_delimiter = ',',
        default_values_t = [5, 6, 7]
    )]
    pub wvs_waves: Vec<i64>,

    /// EVS wave codes to keep, comma separated.
    #[arg(
        long = "evs-waves",
        value_name = "WAVES",
        value_delimiter = ',',
        default_values_t = [4, 5]
    )]
    pub evs_waves: Vec<i64>,

    /// Output path for the merged CSV.
    #[arg(
        long = "out",
        value_name = "PATH",
        default_value = "data/processed/ivs_2005-2022.csv"
    )]
    pub out: PathBuf,

    /// Skip writing the validation report JSON next to the output.
    #[arg(long = "no-report")]
    pub no_report: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to an existing merged IVS CSV.
    #[arg(long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Write the validation report JSON to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
