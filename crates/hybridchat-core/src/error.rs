//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] hybridchat_storage::StorageError),

    #[error("Permission error: {0}")]
    Permission(#[from] hybridchat_permissions::PermissionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Device query failed: {0}")]
    Device(String),

    #[error("Content view error: {0}")]
    ContentView(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors the content runtime adaptor sees when it cannot route a call.
///
/// The five bridge operations themselves never fail; these only cover
/// calls that do not name one of them correctly.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Unknown bridge method: {0}")]
    UnknownMethod(String),

    #[error("{method} takes {expected} argument(s), got {got}")]
    Arity {
        method: String,
        expected: usize,
        got: usize,
    },

    #[error("Argument {index} of {method} must be a string")]
    InvalidArgument { method: String, index: usize },
}
