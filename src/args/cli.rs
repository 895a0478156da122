use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use super::defaults::{
    DEFAULT_INTERFACES, DEFAULT_METRICS_DIR, DEFAULT_PROBE_TIMEOUT, DEFAULT_RAW_DIR,
    DEFAULT_SPEEDTEST_BIN,
};
use super::parsers::{parse_bool_env, parse_duration_arg, parse_interface_list};
use super::types::InterfaceList;

#[derive(Debug, Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Probe every interface, then convert all raw results (default)
    Run,
    /// Probe every interface and keep the raw results only
    Probe,
    /// Convert the raw results already on disk into Prometheus files
    Convert,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Runs the speedtest CLI per network interface, keeps the raw JSON results and renders them as Prometheus textfile metrics."
)]
pub struct ExporterArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Network interfaces to probe, comma separated (e.g. eth0,wlan0)
    #[arg(
        long,
        short = 'i',
        env = "SPEEDTEST_INTERFACES",
        default_value = DEFAULT_INTERFACES,
        value_parser = parse_interface_list,
        global = true
    )]
    pub interfaces: InterfaceList,

    /// Directory for raw speedtest JSON results
    #[arg(long = "raw-dir", default_value = DEFAULT_RAW_DIR, global = true)]
    pub raw_dir: PathBuf,

    /// Directory for rendered Prometheus (.prom) files
    #[arg(long = "metrics-dir", default_value = DEFAULT_METRICS_DIR, global = true)]
    pub metrics_dir: PathBuf,

    /// Path to the speedtest executable
    #[arg(
        long = "speedtest-bin",
        env = "SPEEDTEST_BIN",
        default_value = DEFAULT_SPEEDTEST_BIN,
        global = true
    )]
    pub speedtest_bin: String,

    /// Do not pass --accept-gdpr to the speedtest executable
    #[arg(long = "no-accept-gdpr", global = true)]
    pub no_accept_gdpr: bool,

    /// Kill a probe that runs longer than this (supports ms/s/m/h)
    #[arg(
        long = "probe-timeout",
        default_value = DEFAULT_PROBE_TIMEOUT,
        value_parser = parse_duration_arg,
        global = true
    )]
    pub probe_timeout: Duration,

    /// Repeat the batch on this interval until interrupted (supports ms/s/m/h)
    #[arg(long = "every", value_parser = parse_duration_arg, global = true)]
    pub every: Option<Duration>,

    /// Exit with an error when any interface or file failed
    #[arg(long = "fail-on-error", global = true)]
    pub fail_on_error: bool,

    /// Also write logs to <DIR>/speedtest_<timestamp>.log
    #[arg(long = "log-dir", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Path to config file (TOML/JSON). Defaults to ./speedtest-exporter.toml or ./speedtest-exporter.json if present.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by SPEEDTEST_EXPORTER_LOG/RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env, global = true)]
    pub no_color: bool,
}

impl ExporterArgs {
    /// The subcommand to execute; a bare invocation runs the full batch.
    #[must_use]
    pub fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}
