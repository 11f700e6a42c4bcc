use crate::errors::{Error, Result};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

pub fn encode(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(BASE64_STANDARD.decode(text)?)
}

fn path_error(path: &Path, e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io(e),
    }
}

/// Writes `bytes` to `path`. A missing parent directory is reported as `NotFound`.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| path_error(path, e))
}

/// Reads `path` and returns its contents as standard padded base64.
pub fn encode_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| path_error(path, e))?;

    let encoded = encode(&bytes);
    info!("Image encoded into Base64 successfully.");
    Ok(encoded)
}

/// Decodes `text` and writes the bytes to `path`. Nothing is written if decoding fails.
pub fn decode_to_file(text: &str, path: &Path) -> Result<()> {
    let bytes = decode(text)?;
    write_file(path, &bytes)?;
    info!("Image successfully decoded and saved to {}.", path.display());
    Ok(())
}
