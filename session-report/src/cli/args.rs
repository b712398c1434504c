//! CLI argument definitions

use crate::config::{View, DEFAULT_CPU_PERIOD_MS};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "/etc/pmtrace/session-report-conf.json";
pub const DEFAULT_INPUT_FILE: &str = "/tmp/pmtrace/lttng.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "/tmp/session-report-result.json";

#[derive(Parser, Debug)]
#[command(
    name = "session-report",
    version,
    about = "Convert an LTTng text trace into a Chrome trace JSON report",
    after_help = "\
EXAMPLES:
    session-report                               Default input, config and output
    session-report -i lttng.txt -o report.json   Explicit files (boot time not applied)
    session-report -e user,cpu -m 100            User and CPU views, 100 ms CPU windows
    session-report -p AppMgr,Compositor          Only events of these processes"
)]
pub struct Args {
    /// Configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// LTTng text log. When omitted the default log is read and timestamps
    /// are made relative to this host's boot time.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Report file to write
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Views to render, overriding the config file
    #[arg(short, long, value_enum, value_delimiter = ',', value_name = "VIEWS")]
    pub enable: Option<Vec<View>>,

    /// Only emit events of these processes
    #[arg(short, long, value_delimiter = ',', value_name = "NAMES")]
    pub process: Option<Vec<String>>,

    /// CPU usage window in milliseconds (1-1000)
    #[arg(
        short,
        long = "measure",
        value_name = "MS",
        default_value_t = DEFAULT_CPU_PERIOD_MS,
        value_parser = clap::value_parser!(u64).range(1..=1000)
    )]
    pub measure: u64,

    /// Debug logging, keep parsed nodes and write debug dumps
    #[arg(short, long)]
    pub debug: bool,

    /// Number of CPU cores (default: possible CPUs of this host)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub cores: Option<u16>,

    /// Directory for debug dumps (default: next to the report)
    #[arg(long, value_name = "DIR", requires = "debug")]
    pub dump_dir: Option<PathBuf>,
}
