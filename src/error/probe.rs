use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to collect output of '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' exited with {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("'{command}' did not finish within {}s", timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },
    #[cfg(test)]
    #[error("Scripted probe failure for '{interface}': {stderr}")]
    Scripted { interface: String, stderr: String },
}
