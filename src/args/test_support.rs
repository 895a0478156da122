use clap::Parser;

use crate::error::{AppError, AppResult};

use super::ExporterArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<ExporterArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    ExporterArgs::try_parse_from(args).map_err(AppError::from)
}
