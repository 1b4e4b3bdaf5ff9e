//! Permission error types

use thiserror::Error;

use crate::capability::RequestToken;

#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("No outstanding request for token {0}")]
    UnknownToken(RequestToken),

    #[error("Request {0} was cancelled before the user answered")]
    Cancelled(RequestToken),

    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    #[error("Platform refused the request: {0}")]
    Platform(String),
}
