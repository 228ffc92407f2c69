use anyhow::{Context, Result};
use tracing::info_span;

use ivs_ingest::read_survey_csv;
use ivs_model::BuildConfig;
use ivs_validate::{Validator, write_report_json};

use crate::cli::{BuildArgs, CheckArgs};
use crate::pipeline::{build, load_extract, write_outputs};
use crate::types::{BuildOutcome, CheckOutcome};

pub fn run_build(args: &BuildArgs) -> Result<BuildOutcome> {
    let config = BuildConfig::default()
        .with_wvs_waves(args.wvs_waves.iter().copied())
        .with_evs_waves(args.evs_waves.iter().copied());
    let build_span = info_span!("build");
    let _build_guard = build_span.enter();

    let wvs = load_extract(&args.wvs, &config.wvs)?;
    let evs = load_extract(&args.evs, &config.evs)?;
    let (mut merged, report) = build(&wvs, &evs, &config)?;
    let artifacts = write_outputs(&mut merged, &report, &config, &args.out, !args.no_report)?;

    Ok(BuildOutcome {
        output: args.out.clone(),
        metadata: artifacts.metadata,
        report_file: artifacts.report_file,
        rows: merged.height(),
        columns: merged.width(),
        report,
    })
}

pub fn run_check(args: &CheckArgs) -> Result<CheckOutcome> {
    let config = BuildConfig::default();
    let check_span = info_span!("check", table = %args.input.display());
    let _check_guard = check_span.enter();

    let df = read_survey_csv(&args.input)
        .with_context(|| format!("read merged table from {}", args.input.display()))?;
    let report = Validator::new(&config).validate(&df);
    let report_file = match &args.report {
        Some(path) => Some(write_report_json(path, &report)?),
        None => None,
    };

    Ok(CheckOutcome {
        input: args.input.clone(),
        report_file,
        rows: df.height(),
        report,
    })
}
