use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ProbeError;

use super::ProbeExecutor;

/// Probe double answering from a fixed table; unknown interfaces fail.
#[derive(Debug, Default)]
pub(crate) struct ScriptedProbe {
    responses: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn succeed(mut self, interface: &str, stdout: &str) -> Self {
        self.responses
            .insert(interface.to_owned(), Ok(stdout.to_owned()));
        self
    }

    pub(crate) fn fail(mut self, interface: &str, stderr: &str) -> Self {
        self.responses
            .insert(interface.to_owned(), Err(stderr.to_owned()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProbeExecutor for ScriptedProbe {
    async fn execute(&self, interface: &str) -> Result<Vec<u8>, ProbeError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(interface.to_owned());
        }
        match self.responses.get(interface) {
            Some(Ok(stdout)) => Ok(stdout.as_bytes().to_vec()),
            Some(Err(stderr)) => Err(ProbeError::Scripted {
                interface: interface.to_owned(),
                stderr: stderr.clone(),
            }),
            None => Err(ProbeError::Scripted {
                interface: interface.to_owned(),
                stderr: "unknown interface".to_owned(),
            }),
        }
    }
}
