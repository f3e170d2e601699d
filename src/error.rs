//! Startup errors
//!
//! Everything that can go wrong before the accept loop starts is fatal.
//! Per-request failures never reach this type; they become HTTP responses.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("cannot serve directory '{}': {source}", path.display())]
    DocumentRoot { path: PathBuf, source: io::Error },

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl ServeError {
    pub fn document_root(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DocumentRoot {
            path: path.into(),
            source,
        }
    }
}
