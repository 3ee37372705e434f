//! Server errors.

use thiserror::Error;

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be opened.
    #[error("Failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    /// A worker thread could not be started.
    #[error("Failed to start worker: {0}")]
    Io(#[from] std::io::Error),
}
