use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Malformed measurement '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Malformed measurement '{path}': expected a JSON object, found {kind}")]
    UnexpectedRoot { path: PathBuf, kind: &'static str },
}
