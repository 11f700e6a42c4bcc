use clap::Parser;
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::time::Duration;

// Loop timing
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const TRANSMIT_EVERY: &str = "5";
pub const RECEIVE_EVERY: &str = "10";

// GPS serial configuration
pub const GPS_PORT: &str = "/dev/ttyAMA0";
pub const GPS_BAUDRATE: u32 = 9600;
pub const GPS_TIMEOUT_MS: u64 = 500;
pub const GGA_MARKER: &str = "$GNGGA";

// MQTT link
pub const MQTT_PORT: u16 = 1883;
pub const MQTT_KEEP_ALIVE_SECS: u64 = 30;
pub const MQTT_CHANNEL_CAPACITY: usize = 100;
pub const DEVICE_ID: &str = "lora-rig";

/// Periodic sensor sampler and simulated LoRa transmitter.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Length of one tick in milliseconds.
    #[arg(long, env = "INTERVAL_MS", default_value_t = TICK_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Transmit a sensor block every N ticks.
    #[arg(long, env = "TRANSMIT_EVERY", default_value = TRANSMIT_EVERY)]
    pub transmit_every: NonZeroU64,

    /// Emit the received placeholder every N ticks.
    #[arg(long, env = "RECEIVE_EVERY", default_value = RECEIVE_EVERY)]
    pub receive_every: NonZeroU64,

    /// Serial device of the GPS receiver.
    #[arg(long, env = "GPS_PORT", default_value = GPS_PORT)]
    pub gps_port: String,

    #[arg(long, env = "GPS_BAUDRATE", default_value_t = GPS_BAUDRATE)]
    pub gps_baud: u32,

    /// Skip the GPS receiver and always simulate positions.
    #[arg(long, env = "NO_GPS")]
    pub no_gps: bool,

    /// Directory for the timestamped log file.
    #[arg(long, env = "LOG_DIR", default_value = ".")]
    pub log_dir: PathBuf,

    /// Publish transmissions to this MQTT broker instead of only logging them.
    #[arg(long, env = "MQTT_BROKER")]
    pub mqtt_broker: Option<String>,

    #[arg(long, env = "MQTT_PORT", default_value_t = MQTT_PORT)]
    pub mqtt_port: u16,

    #[arg(long, env = "DEVICE_ID", default_value = DEVICE_ID)]
    pub device_id: String,
}

impl Args {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}
