//! Minimal NMEA 0183 parser for GGA (fix data) sentences.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NmeaError {
    #[error("not a GGA sentence: {0}")]
    NotGga(String),

    #[error("checksum mismatch: expected {expected:02X}, computed {computed:02X}")]
    Checksum { expected: u8, computed: u8 },

    #[error("malformed field '{field}': {value:?}")]
    Field { field: &'static str, value: String },

    #[error("sentence has no position fix")]
    NoFix,
}

/// Position fix decoded from a GGA sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct GgaFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub fix_quality: u8,
    pub satellites: u8,
}

/// Parses a `$xxGGA` sentence, verifying the checksum when one is present.
pub fn parse_gga(line: &str) -> Result<GgaFix, NmeaError> {
    let line = line.trim();
    let body = line
        .strip_prefix('$')
        .ok_or_else(|| NmeaError::NotGga(line.to_string()))?;

    let body = match body.split_once('*') {
        Some((data, checksum)) => {
            verify_checksum(data, checksum)?;
            data
        }
        None => body,
    };

    let fields: Vec<&str> = body.split(',').collect();
    let kind = fields[0];
    if kind.len() != 5 || !kind.ends_with("GGA") {
        return Err(NmeaError::NotGga(line.to_string()));
    }

    let field = |idx: usize| fields.get(idx).copied().unwrap_or("");

    let fix_quality = parse_or_default::<u8>("fix quality", field(6))?;
    if fix_quality == 0 || field(2).is_empty() || field(4).is_empty() {
        return Err(NmeaError::NoFix);
    }

    let latitude = parse_coordinate("latitude", field(2), field(3), 2, 90.0, ('N', 'S'))?;
    let longitude = parse_coordinate("longitude", field(4), field(5), 3, 180.0, ('E', 'W'))?;
    let satellites = parse_or_default::<u8>("satellites", field(7))?;
    let altitude = parse_or_default::<f64>("altitude", field(9))?;

    Ok(GgaFix {
        latitude,
        longitude,
        altitude,
        fix_quality,
        satellites,
    })
}

fn verify_checksum(data: &str, checksum: &str) -> Result<(), NmeaError> {
    let expected = u8::from_str_radix(checksum.trim(), 16).map_err(|_| NmeaError::Field {
        field: "checksum",
        value: checksum.to_string(),
    })?;
    let computed = data.bytes().fold(0u8, |acc, b| acc ^ b);

    if expected != computed {
        return Err(NmeaError::Checksum { expected, computed });
    }
    Ok(())
}

/// Converts `ddmm.mmmm` (or `dddmm.mmmm`) plus a hemisphere letter into signed degrees.
fn parse_coordinate(
    name: &'static str,
    value: &str,
    hemisphere: &str,
    degree_digits: usize,
    max_degrees: f64,
    (positive, negative): (char, char),
) -> Result<f64, NmeaError> {
    let malformed = || NmeaError::Field {
        field: name,
        value: format!("{},{}", value, hemisphere),
    };

    // Unsigned digits only; the sign comes from the hemisphere.
    let unsigned = value.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if !unsigned || value.len() < degree_digits {
        return Err(malformed());
    }
    let (deg, min) = value.split_at(degree_digits);
    if deg.contains('.') {
        return Err(malformed());
    }
    let deg: f64 = deg.parse().map_err(|_| malformed())?;
    let min: f64 = min.parse().map_err(|_| malformed())?;
    if min >= 60.0 {
        return Err(malformed());
    }

    let magnitude = deg + min / 60.0;
    if magnitude > max_degrees {
        return Err(malformed());
    }
    match hemisphere.chars().next() {
        Some(c) if c == positive => Ok(magnitude),
        Some(c) if c == negative => Ok(-magnitude),
        _ => Err(malformed()),
    }
}

fn parse_or_default<T>(name: &'static str, value: &str) -> Result<T, NmeaError>
where
    T: std::str::FromStr + Default,
{
    if value.is_empty() {
        return Ok(T::default());
    }
    value.parse().map_err(|_| NmeaError::Field {
        field: name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "$GNGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*68";

    fn with_checksum(body: &str) -> String {
        let sum = body.bytes().fold(0u8, |acc, b| acc ^ b);
        format!("${}*{:02X}", body, sum)
    }

    #[test]
    fn test_parse_valid_gga() {
        let fix = parse_gga(SAMPLE).unwrap();

        assert!((fix.latitude - 53.361337).abs() < 1e-6);
        assert!((fix.longitude + 6.50562).abs() < 1e-6);
        assert!((fix.altitude - 61.7).abs() < 1e-9);
        assert_eq!(fix.fix_quality, 1);
        assert_eq!(fix.satellites, 8);
    }

    #[test]
    fn test_checksum_mismatch() {
        let broken = SAMPLE.replace("*68", "*00");
        assert!(matches!(
            parse_gga(&broken),
            Err(NmeaError::Checksum { expected: 0, .. })
        ));
    }

    #[test]
    fn test_no_checksum_accepted() {
        let line = "$GPGGA,120000,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
        let fix = parse_gga(line).unwrap();
        assert!((fix.latitude - 48.1173).abs() < 1e-6);
        assert!((fix.longitude - 11.516666).abs() < 1e-5);
    }

    #[test]
    fn test_no_fix() {
        let line = with_checksum("GNGGA,092750.000,,,,,0,0,,,M,,M,,");
        assert_eq!(parse_gga(&line), Err(NmeaError::NoFix));
    }

    #[test]
    fn test_not_gga() {
        let line = with_checksum("GNRMC,092750.000,A,5321.6802,N,00630.3372,W,0.02,31.66,280511,,,A");
        assert!(matches!(parse_gga(&line), Err(NmeaError::NotGga(_))));
        assert!(matches!(parse_gga("garbage"), Err(NmeaError::NotGga(_))));
    }

    #[test]
    fn test_bad_hemisphere() {
        let line = "$GNGGA,092750.000,5321.6802,X,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,";
        assert!(matches!(
            parse_gga(line),
            Err(NmeaError::Field { field: "latitude", .. })
        ));
    }

    #[test]
    fn test_latitude_out_of_range() {
        let line = with_checksum("GNGGA,092750.000,9530.0000,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,");
        assert!(matches!(
            parse_gga(&line),
            Err(NmeaError::Field { field: "latitude", .. })
        ));

        let line = with_checksum("GNGGA,092750.000,9000.5000,S,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,");
        assert!(matches!(
            parse_gga(&line),
            Err(NmeaError::Field { field: "latitude", .. })
        ));
    }

    #[test]
    fn test_longitude_out_of_range() {
        let line = with_checksum("GNGGA,092750.000,5321.6802,N,19930.0000,E,1,8,1.03,61.7,M,55.2,M,,");
        assert!(matches!(
            parse_gga(&line),
            Err(NmeaError::Field { field: "longitude", .. })
        ));
    }

    #[test]
    fn test_boundary_coordinates_accepted() {
        let line = with_checksum("GNGGA,092750.000,9000.0000,S,18000.0000,E,1,8,1.03,0.0,M,,M,,");
        let fix = parse_gga(&line).unwrap();
        assert_eq!(fix.latitude, -90.0);
        assert_eq!(fix.longitude, 180.0);
    }

    #[test]
    fn test_signed_minutes_rejected() {
        let line = with_checksum("GNGGA,092750.000,53-21.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,");
        assert!(matches!(
            parse_gga(&line),
            Err(NmeaError::Field { field: "latitude", .. })
        ));

        let line = with_checksum("GNGGA,092750.000,5321.6802,N,006+30.337,W,1,8,1.03,61.7,M,55.2,M,,");
        assert!(matches!(
            parse_gga(&line),
            Err(NmeaError::Field { field: "longitude", .. })
        ));
    }

    #[test]
    fn test_negative_degrees_rejected() {
        let line = with_checksum("GNGGA,092750.000,-521.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,");
        assert!(matches!(
            parse_gga(&line),
            Err(NmeaError::Field { field: "latitude", .. })
        ));
    }
}
