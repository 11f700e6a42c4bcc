use crate::codec::write_file;
use crate::errors::{Error, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Fetches `url` and writes the body to `path`. Nothing is written unless the status is 2xx.
pub fn download(url: &str, path: &Path) -> Result<usize> {
    info!("Downloading {}", url);

    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => return Err(Error::Download { status }),
        Err(e) => return Err(Error::Http(e.to_string())),
    };

    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(Error::Download { status });
    }

    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;
    debug!("Received {} bytes", body.len());

    write_file(path, &body)?;
    info!("Image downloaded successfully to: {}", path.display());
    Ok(body.len())
}
