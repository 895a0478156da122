use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILTER_ENV: &str = "SPEEDTEST_EXPORTER_LOG";

pub fn init_logging(verbose: bool, no_color: bool, log_dir: Option<&Path>) {
    let filter = std::env::var(LOG_FILTER_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let log_file = log_dir.and_then(|dir| match open_log_file(dir) {
        Ok(opened) => Some(opened),
        Err(err) => {
            eprintln!("Failed to open log file in {}: {}", dir.display(), err);
            None
        }
    });
    let log_path = log_file.as_ref().map(|(path, _)| path.clone());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color);
    let file_layer = log_file.map(|(_, file)| {
        fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer);

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
        return;
    }

    if let Some(path) = log_path {
        tracing::info!("Logging initialized. Log file: {}", path.display());
    }
}

fn open_log_file(dir: &Path) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "speedtest_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false, true, None);
        init_logging(true, true, None);
    }

    #[test]
    fn log_file_is_created_in_directory() -> Result<(), String> {
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let nested = dir.path().join("logs");
        let (path, _file) =
            open_log_file(&nested).map_err(|err| format!("open_log_file failed: {}", err))?;
        if path.parent() != Some(nested.as_path()) || !path.exists() {
            return Err(format!("Unexpected log file path: {}", path.display()));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !name.starts_with("speedtest_") || !name.ends_with(".log") {
            return Err(format!("Unexpected log file name: {}", name));
        }
        Ok(())
    }
}
