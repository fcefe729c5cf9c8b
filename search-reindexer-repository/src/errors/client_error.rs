//! Client construction error types.

use thiserror::Error;

/// Errors that can occur while constructing a search engine client.
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// Failed to set up the connection to the search engine.
    #[error("Connection error: {0}")]
    Connection(String),
}

impl ClientError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }
}
