use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::ExporterArgs;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// Values given explicitly on the command line win; environment variables and
/// clap defaults are overridden by the file.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut ExporterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "interfaces")
        && let Some(interfaces) = config.interfaces.clone()
    {
        args.interfaces = interfaces;
    }

    if !is_cli(matches, "raw_dir")
        && let Some(raw_dir) = config.raw_dir.clone()
    {
        args.raw_dir = raw_dir;
    }

    if !is_cli(matches, "metrics_dir")
        && let Some(metrics_dir) = config.metrics_dir.clone()
    {
        args.metrics_dir = metrics_dir;
    }

    if !is_cli(matches, "speedtest_bin")
        && let Some(bin) = config.speedtest_bin.clone()
    {
        args.speedtest_bin = bin;
    }

    if !is_cli(matches, "no_accept_gdpr")
        && let Some(accept) = config.accept_gdpr
    {
        args.no_accept_gdpr = !accept;
    }

    if !is_cli(matches, "probe_timeout")
        && let Some(value) = config.probe_timeout.as_ref()
    {
        args.probe_timeout = to_duration(value, "probe_timeout")?;
    }

    if !is_cli(matches, "every")
        && let Some(value) = config.every.as_ref()
    {
        args.every = Some(to_duration(value, "every")?);
    }

    if !is_cli(matches, "fail_on_error")
        && let Some(value) = config.fail_on_error
    {
        args.fail_on_error = value;
    }

    if !is_cli(matches, "log_dir")
        && let Some(log_dir) = config.log_dir.clone()
    {
        args.log_dir = Some(log_dir);
    }

    if !is_cli(matches, "verbose")
        && let Some(value) = config.verbose
    {
        args.verbose = value;
    }

    if !is_cli(matches, "no_color")
        && let Some(value) = config.no_color
    {
        args.no_color = value;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn to_duration(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value
        .to_duration()
        .map_err(|err| AppError::config(ConfigError::InvalidField { field, source: err }))
}
