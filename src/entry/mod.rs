mod dispatch;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::ExporterArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    // Config may set verbosity and the log directory, so it goes first.
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose, args.no_color, args.log_dir.as_deref());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(dispatch::execute(args))
}

fn parse_args() -> AppResult<(ExporterArgs, ArgMatches)> {
    let matches = ExporterArgs::command().get_matches_from(std::env::args_os());
    let args = ExporterArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}
