//! Invocation of the external speedtest CLI.
mod command;
mod runner;

#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;

use crate::error::ProbeError;

pub use command::SpeedtestCommand;
pub use runner::ProbeRunner;

/// Runs one measurement bound to a network interface.
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    /// Returns the probe's complete standard output on success.
    async fn execute(&self, interface: &str) -> Result<Vec<u8>, ProbeError>;
}
