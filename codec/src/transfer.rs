use crate::codec::{decode_to_file, encode_file};
use crate::download::download;
use crate::errors::Result;
use std::path::Path;
use tracing::info;

/// Sending stage of the simulated link. Passes the payload through unchanged.
pub fn transmit(data: String) -> String {
    info!("Data is being transmitted...");
    data
}

/// Receiving stage of the simulated link. Passes the payload through unchanged.
pub fn receive(data: String) -> String {
    info!("Data is being received...");
    data
}

/// Download, encode, transmit, receive, decode. Stops at the first error.
pub fn round_trip(url: &str, download_path: &Path, output_path: &Path) -> Result<()> {
    download(url, download_path)?;

    let encoded = encode_file(download_path)?;
    let transmitted = transmit(encoded);
    let received = receive(transmitted);
    decode_to_file(&received, output_path)?;

    info!(
        "Simulation complete. Image received and saved at: {}",
        output_path.display()
    );
    Ok(())
}
