//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::{Command, ExporterArgs};
pub use types::InterfaceList;

#[cfg(test)]
use defaults::{DEFAULT_INTERFACES, DEFAULT_METRICS_DIR, DEFAULT_RAW_DIR, DEFAULT_SPEEDTEST_BIN};
