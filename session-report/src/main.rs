//! # session-report - Main Entry Point
//!
//! Converts an LTTng text log into a Chrome trace report. When no input is
//! given the default log is read and timestamps are rebased on this host's
//! boot time.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use std::path::PathBuf;

use session_report::cli::{Args, DEFAULT_INPUT_FILE};
use session_report::config::{Configuration, RunOptions, ViewSet};
use session_report::conversion::{self, host_info};
use session_report::domain::ConvertError;
use session_report::preflight::{check_dump_dir, run_preflight_checks};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let args = Args::parse();
    init_logger(args.debug);
    std::process::exit(match run(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

/// `RUST_LOG` wins over `--debug`
fn init_logger(debug: bool) {
    let default = if debug { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ConvertError>() {
        Some(ConvertError::NoActiveView | ConvertError::InvalidPeriod(_)) => EXIT_USAGE,
        _ => EXIT_ERROR,
    }
}

fn run(args: Args) -> Result<()> {
    // The boot time only applies to a log captured on this host in this boot
    let (input, boot_time) = match args.input {
        Some(path) => (path, None),
        None => {
            let boot_time = host_info::boot_time_secs()
                .map_err(|e| warn!("{e:#}, timestamps keep wall-clock seconds"))
                .ok();
            (PathBuf::from(DEFAULT_INPUT_FILE), boot_time)
        }
    };

    run_preflight_checks(&args.config, &input, &args.output)?;
    if let Some(dir) = &args.dump_dir {
        check_dump_dir(dir)?;
    }

    let config = Configuration::load(&args.config)?;

    let core_count = match args.cores {
        Some(n) => usize::from(n),
        None => host_info::possible_cpus()
            .context("Cannot determine the CPU core count, pass --cores")?
            .len()
            .max(1),
    };

    let mut options = RunOptions::new(input, &args.output);
    options.boot_time = boot_time;
    options.views = args.enable.map(|views| views.into_iter().collect::<ViewSet>());
    options.processes = args.process;
    options.cpu_period_ms = args.measure;
    options.core_count = core_count;
    options.retain_nodes = args.debug;
    options.dump_dir = args.dump_dir;

    let summary = conversion::run(&config, &options)
        .with_context(|| format!("Failed to convert {}", options.input.display()))?;

    info!("{} events written", summary.events_written);
    println!("saved: {}", options.output.display());
    Ok(())
}
