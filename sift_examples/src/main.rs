// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample program for `sift_query`: runs the sample pipelines over a small dataset.

mod fixture;
mod json;

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use sift_core::{QueryError, Recorder, TextRecorder};
use sift_query::queries::{QueryParams, sample_program};
use sift_query::{PriceThresholds, Program};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::json::JsonRecorder;

/// Command line arguments.
///
/// Every threshold defaults to the value the sample pipelines are described with.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Run the sift sample pipelines")]
struct Args {
    /// Run only the pipeline with this name (see `--list`).
    #[arg(long, value_name = "NAME")]
    query: Option<String>,

    /// List pipeline names and exit.
    #[arg(long)]
    list: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Upper bound (exclusive) for `numbers-below-limit`.
    #[arg(long, default_value_t = 5, env = "SIFT_NUMBER_LIMIT")]
    number_limit: i32,

    /// Minimum order sum for `customers-over-turnover`.
    #[arg(long, default_value_t = 100_000.0, env = "SIFT_MIN_TURNOVER")]
    min_turnover: f64,

    /// Minimum single order total for `customers-with-large-order`.
    #[arg(long, default_value_t = 10_000.0, env = "SIFT_MIN_ORDER_TOTAL")]
    min_order_total: f64,

    /// Prices below this are in the low tier.
    #[arg(long, default_value_t = 10.0)]
    price_low: f64,

    /// Prices below this (and not low) are in the medium tier.
    #[arg(long, default_value_t = 100.0)]
    price_high: f64,

    /// After the run, set the minimum turnover to this value and run
    /// `customers-over-turnover` again without rebuilding it.
    #[arg(long, value_name = "TURNOVER")]
    rerun_turnover: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `name=value` lines.
    Text,
    /// One JSON object per line.
    Json,
}

impl Args {
    fn params(&self) -> QueryParams {
        let params = QueryParams::default();
        params.number_limit.set(self.number_limit);
        params.min_turnover.set(self.min_turnover);
        params.min_order_total.set(self.min_order_total);
        params
            .price_tiers
            .set(PriceThresholds::new(self.price_low, self.price_high));
        params
    }
}

fn init_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {err}");
    }
}

fn execute(
    program: &Program<'_>,
    params: &QueryParams,
    args: &Args,
    recorder: &mut impl Recorder,
) -> Result<usize, QueryError> {
    let mut produced = match &args.query {
        Some(name) => program.run(name, recorder)?,
        None => program.run_all(recorder)?,
    };
    if let Some(turnover) = args.rerun_turnover {
        tracing::info!(
            from = params.min_turnover.get(),
            to = turnover,
            "rerunning with a new minimum turnover"
        );
        params.min_turnover.set(turnover);
        produced += program.run("customers-over-turnover", recorder)?;
    }
    Ok(produced)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let dataset = fixture::sample()?;
    let params = args.params();
    let program = sample_program(&dataset, &params);

    if args.list {
        for pipeline in program.pipelines() {
            println!("{:<32}{}", pipeline.name(), pipeline.description());
        }
        return Ok(());
    }

    // Output already recorded is emitted even when a pipeline fails.
    let result = match args.format {
        Format::Text => {
            let mut recorder = TextRecorder::new(String::new());
            let result = execute(&program, &params, args, &mut recorder);
            print!("{}", recorder.finish()?);
            result
        }
        Format::Json => {
            let mut recorder = JsonRecorder::new(io::stdout().lock());
            let result = execute(&program, &params, args, &mut recorder);
            drop(recorder.finish()?);
            result
        }
    };
    let produced = result?;
    tracing::info!(produced, "done");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();
    tracing::debug!(?args, "starting");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "sample program failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
