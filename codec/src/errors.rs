use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to download image. Status code: {status}")]
    Download { status: u16 },

    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
