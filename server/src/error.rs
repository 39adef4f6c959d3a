//! Error types for the Lead Panel static host.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing or running the host.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The frontend build directory is missing its entry page.
    #[error("No index.html in {}; build the frontend first (trunk build --release)", .0.display())]
    MissingDist(PathBuf),

    /// The listening socket could not be opened.
    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Encoding the injected configuration failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for host operations.
pub type ServerResult<T> = Result<T, ServerError>;
