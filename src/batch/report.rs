use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Probe,
    Convert,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Probe => write!(f, "probe"),
            FailureStage::Convert => write!(f, "convert"),
        }
    }
}

/// One interface or raw artifact that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub stage: FailureStage,
    /// Interface name for probe failures, raw artifact path for conversions.
    pub subject: String,
    pub message: String,
}

/// Outcome of one batch. `outputs` lists the rendered files in conversion
/// order; failed items only show up in `failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub probed: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failures_in(&self, stage: FailureStage) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.stage == stage)
            .count()
    }

    pub(super) fn record_failure(&mut self, stage: FailureStage, subject: String, message: String) {
        self.failures.push(BatchFailure {
            stage,
            subject,
            message,
        });
    }
}
