use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Backend request to {endpoint} failed with status {status}: {body}")]
    BackendStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid upload file {path}: {reason}")]
    InvalidFile { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
