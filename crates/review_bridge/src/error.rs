use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{message}` message is missing `{field}`")]
    MissingField {
        message: &'static str,
        field: &'static str,
    },
    #[error("unknown bookmark status {0:?}")]
    UnknownStatus(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("host side disconnected")]
    Disconnected,
}
