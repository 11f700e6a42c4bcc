mod codec;
mod download;
mod errors;
mod transfer;

use clap::Parser;
use errors::Error;
use std::path::PathBuf;
use tracing::{error, info};

const IMAGE_URL: &str = "https://raw.githubusercontent.com/blessyjeba10c/ulog3/main/WhatsApp%20Image%202024-12-14%20at%2013.39.23_7287c42f.jpg";

/// Download an image, push it through a base64 transmit/receive round-trip and save the result.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Source image URL.
    #[arg(long, env = "IMAGE_URL", default_value = IMAGE_URL)]
    url: String,

    /// Where the downloaded image is stored before encoding.
    #[arg(long, env = "DOWNLOAD_PATH", default_value = "downloaded_image.jpg")]
    download_path: PathBuf,

    /// Where the decoded image is written.
    #[arg(long, env = "OUTPUT_PATH", default_value = "received_transmitted_image.jpg")]
    output_path: PathBuf,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting base64 round-trip");
    info!("Source: {}", args.url);

    match transfer::round_trip(&args.url, &args.download_path, &args.output_path) {
        Ok(()) => {}
        Err(Error::NotFound(path)) => {
            error!(
                "Error: Image file not found at {}. Please check the URL.",
                path.display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("An error occurred: {}", e);
            std::process::exit(1);
        }
    }
}
