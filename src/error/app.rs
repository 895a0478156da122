use thiserror::Error;

use super::{
    ConfigError, ExtractError, ProbeError, RenderError, StoreError, ValidationError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Artifact store error: {0}")]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn probe<E>(error: E) -> Self
    where
        E: Into<ProbeError>,
    {
        error.into().into()
    }

    pub fn extract<E>(error: E) -> Self
    where
        E: Into<ExtractError>,
    {
        error.into().into()
    }

    pub fn render<E>(error: E) -> Self
    where
        E: Into<RenderError>,
    {
        error.into().into()
    }

    pub fn store<E>(error: E) -> Self
    where
        E: Into<StoreError>,
    {
        error.into().into()
    }
}
