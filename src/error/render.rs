use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write line: {source}")]
    WriteLine {
        #[source]
        source: std::fmt::Error,
    },
}
