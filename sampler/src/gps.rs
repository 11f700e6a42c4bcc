use crate::config::{GGA_MARKER, GPS_TIMEOUT_MS};
use crate::errors::Result;
use crate::nmea::parse_gga;
use crate::telemetry::Position;
use std::io::{BufRead, BufReader, ErrorKind};
use std::time::Duration;
use tracing::{debug, info};

/// Line-oriented GPS receiver. Dropping it closes the underlying device.
pub struct GpsReceiver {
    reader: Box<dyn BufRead + Send>,
    line: Vec<u8>,
}

impl GpsReceiver {
    pub fn open(port: &str, baud_rate: u32) -> Result<Self> {
        let serial = serialport::new(port, baud_rate)
            .timeout(Duration::from_millis(GPS_TIMEOUT_MS))
            .open()?;

        info!("GPS receiver opened on {} at {} baud", port, baud_rate);
        Ok(Self::from_reader(BufReader::new(serial)))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            line: Vec::with_capacity(128),
        }
    }

    /// Reads one sentence. Returns `Ok(None)` for anything other than a GGA fix sentence.
    pub fn read_fix(&mut self) -> Result<Option<Position>> {
        self.line.clear();
        match self.reader.read_until(b'\n', &mut self.line) {
            Ok(_) => {}
            // An idle receiver just times out; treat it like an empty line.
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                debug!("GPS read timed out");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        let sentence = decode_latin1(&self.line);
        if !sentence.starts_with(GGA_MARKER) {
            debug!("Skipping GPS sentence: {}", sentence.trim_end());
            return Ok(None);
        }

        let fix = parse_gga(&sentence)?;
        Ok(Some(Position {
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: fix.altitude,
        }))
    }
}

// ISO-8859-1 maps every byte to the code point with the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
