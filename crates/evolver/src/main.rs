//! CLI entry point for the `cosmac-evolve` batch driver.

use std::env;
use std::ffi::OsString;
use std::str::FromStr;

use cosmac_core::{ArithmeticConvention, ProductWorld};
use evolver::{run_batch, BatchSummary, DriverConfig};
use rand as _;
use thiserror as _;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "cosmac_evolve=info,evolver=info";

const USAGE_TEXT: &str = "\
Usage: cosmac-evolve [options]

Options:
  --runs <n>                Number of random genomes to score (default: 100)
  --workers <n>             Worker threads (default: available parallelism)
  --genome-len <n>          Genome length in bytes (default: 64)
  --seed <n>                Seed for genome generation (default: entropy)
  --consistent-arithmetic   Use borrow-consistent DF semantics
  -h, --help                Show this help message

Output:
  One `completed<TAB>steps<TAB>fitness` line per run with positive fitness,
  then `MAX <fitness>`. Set RUST_LOG to adjust diagnostics on stderr.
";

#[derive(Debug)]
enum ParseResult {
    Run(DriverConfig),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut config = DriverConfig::default();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--consistent-arithmetic" {
            config.run.arithmetic = ArithmeticConvention::Consistent;
            continue;
        }

        let flag = arg.to_string_lossy().to_string();
        match flag.as_str() {
            "--runs" => config.runs = parse_value(&flag, args.next())?,
            "--workers" => config.workers = parse_value(&flag, args.next())?,
            "--genome-len" => config.genome_len = parse_value(&flag, args.next())?,
            "--seed" => config.seed = Some(parse_value(&flag, args.next())?),
            other if other.starts_with('-') => return Err(format!("unknown option: {other}")),
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(ParseResult::Run(config))
}

fn parse_value<T: FromStr>(flag: &str, value: Option<OsString>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    let text = value.to_string_lossy();
    text.parse()
        .map_err(|_| format!("invalid value for {flag}: {text}"))
}

fn print_summary(summary: &BatchSummary) {
    for result in summary.scored() {
        println!("{}\t{}\t{:.0}", result.completed, result.steps, result.fitness);
    }
    println!("MAX {:.0}", summary.max_fitness);
}

fn run(config: &DriverConfig) -> Result<(), i32> {
    match run_batch(config, || ProductWorld) {
        Ok(summary) => {
            print_summary(&summary);
            if let Some(best) = &summary.best {
                info!(
                    index = best.index,
                    out_ports = ?best.out_ports,
                    "best genome"
                );
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "batch failed");
            eprintln!("error: {e}");
            Err(1)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(config)) => match run(&config) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
