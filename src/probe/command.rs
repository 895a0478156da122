use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ProbeError;

use super::ProbeExecutor;

/// The speedtest CLI, invoked once per interface with JSON output.
#[derive(Debug, Clone)]
pub struct SpeedtestCommand {
    program: String,
    accept_gdpr: bool,
    timeout: Duration,
}

impl SpeedtestCommand {
    #[must_use]
    pub fn new(program: impl Into<String>, accept_gdpr: bool, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            accept_gdpr,
            timeout,
        }
    }

    #[must_use]
    pub fn args(&self, interface: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(7);
        if self.accept_gdpr {
            args.push("--accept-gdpr".to_owned());
        }
        args.extend(
            ["-p", "no", "-f", "json-pretty", "-I", interface]
                .into_iter()
                .map(str::to_owned),
        );
        args
    }

    #[must_use]
    pub fn command_line(&self, interface: &str) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args(interface));
        parts.join(" ")
    }
}

#[async_trait]
impl ProbeExecutor for SpeedtestCommand {
    async fn execute(&self, interface: &str) -> Result<Vec<u8>, ProbeError> {
        let command_line = self.command_line(interface);
        tracing::info!("Running command: {}", command_line);

        let child = Command::new(&self.program)
            .args(self.args(interface))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| ProbeError::Spawn {
                command: command_line.clone(),
                source: err,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|err| ProbeError::Wait {
                command: command_line.clone(),
                source: err,
            })?,
            Err(_elapsed) => {
                return Err(ProbeError::TimedOut {
                    command: command_line,
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            if !stderr.is_empty() {
                tracing::error!("Error output: {}", stderr);
            }
            return Err(ProbeError::NonZeroExit {
                command: command_line,
                status: output.status,
                stderr,
            });
        }

        tracing::debug!(
            "{} produced {} bytes on stdout",
            command_line,
            output.stdout.len()
        );
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;

    fn run_async_test<F>(future: F) -> Result<(), String>
    where
        F: Future<Output = Result<(), String>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| format!("runtime build failed: {}", err))?;
        runtime.block_on(future)
    }

    #[test]
    fn args_bind_interface_and_request_json() -> Result<(), String> {
        let command = SpeedtestCommand::new("speedtest", true, Duration::from_secs(60));
        let expected = [
            "--accept-gdpr",
            "-p",
            "no",
            "-f",
            "json-pretty",
            "-I",
            "eth0",
        ];
        if command.args("eth0") != expected {
            return Err(format!("Unexpected args: {:?}", command.args("eth0")));
        }
        if command.command_line("eth0") != "speedtest --accept-gdpr -p no -f json-pretty -I eth0" {
            return Err(format!(
                "Unexpected command line: {}",
                command.command_line("eth0")
            ));
        }
        Ok(())
    }

    #[test]
    fn args_without_gdpr_acceptance() -> Result<(), String> {
        let command = SpeedtestCommand::new("speedtest", false, Duration::from_secs(60));
        let args = command.args("wlan0");
        if args.first().map(String::as_str) != Some("-p") {
            return Err(format!("Unexpected args: {:?}", args));
        }
        if args.last().map(String::as_str) != Some("wlan0") {
            return Err("Interface must be the last argument".to_owned());
        }
        Ok(())
    }

    #[test]
    fn missing_program_is_a_spawn_error() -> Result<(), String> {
        run_async_test(async {
            let command = SpeedtestCommand::new(
                "/nonexistent/speedtest-for-tests",
                true,
                Duration::from_secs(5),
            );
            match command.execute("eth0").await {
                Err(ProbeError::Spawn { command, .. }) if command.contains("-I eth0") => Ok(()),
                Err(err) => Err(format!("Unexpected error: {}", err)),
                Ok(_) => Err("Expected spawn failure".to_owned()),
            }
        })
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};
        use tempfile::tempdir;

        fn write_script(dir: &Path, body: &str) -> Result<PathBuf, String> {
            let path = dir.join("speedtest");
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body))
                .map_err(|err| format!("write failed: {}", err))?;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .map_err(|err| format!("chmod failed: {}", err))?;
            Ok(path)
        }

        #[test]
        fn captures_stdout_of_successful_probe() -> Result<(), String> {
            run_async_test(async {
                let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
                let script = write_script(
                    dir.path(),
                    r#"echo "{\"interface\":{\"name\":\"$7\"}}""#,
                )?;
                let command = SpeedtestCommand::new(
                    script.to_string_lossy(),
                    true,
                    Duration::from_secs(10),
                );

                let stdout = command
                    .execute("eth7")
                    .await
                    .map_err(|err| err.to_string())?;
                if stdout != b"{\"interface\":{\"name\":\"eth7\"}}\n" {
                    return Err(format!(
                        "Unexpected stdout: {}",
                        String::from_utf8_lossy(&stdout)
                    ));
                }
                Ok(())
            })
        }

        #[test]
        fn non_zero_exit_carries_stderr() -> Result<(), String> {
            run_async_test(async {
                let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
                let script = write_script(dir.path(), "echo 'no such interface' >&2\nexit 3")?;
                let command = SpeedtestCommand::new(
                    script.to_string_lossy(),
                    true,
                    Duration::from_secs(10),
                );

                match command.execute("bogus0").await {
                    Err(ProbeError::NonZeroExit { stderr, status, .. }) => {
                        if stderr != "no such interface" {
                            return Err(format!("Unexpected stderr: {}", stderr));
                        }
                        if status.code() != Some(3) {
                            return Err(format!("Unexpected status: {}", status));
                        }
                        Ok(())
                    }
                    Err(err) => Err(format!("Unexpected error: {}", err)),
                    Ok(_) => Err("Expected non-zero exit".to_owned()),
                }
            })
        }

        #[test]
        fn slow_probe_times_out() -> Result<(), String> {
            run_async_test(async {
                let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
                let script = write_script(dir.path(), "sleep 5")?;
                let command = SpeedtestCommand::new(
                    script.to_string_lossy(),
                    true,
                    Duration::from_millis(200),
                );

                match command.execute("eth0").await {
                    Err(ProbeError::TimedOut { timeout, .. })
                        if timeout == Duration::from_millis(200) =>
                    {
                        Ok(())
                    }
                    Err(err) => Err(format!("Unexpected error: {}", err)),
                    Ok(_) => Err("Expected timeout".to_owned()),
                }
            })
        }
    }
}
