use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Closed interval a simulated field is drawn from, plus its rendering precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub decimals: usize,
}

impl FieldRange {
    const fn new(min: f64, max: f64, decimals: usize) -> Self {
        Self {
            min,
            max,
            decimals,
        }
    }

    #[cfg(test)]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const LATITUDE: FieldRange = FieldRange::new(-90.0, 90.0, 6);
pub const LONGITUDE: FieldRange = FieldRange::new(-180.0, 180.0, 6);
pub const ALTITUDE: FieldRange = FieldRange::new(0.0, 5000.0, 2);
pub const TEMPERATURE: FieldRange = FieldRange::new(-10.0, 40.0, 1);
pub const HUMIDITY: FieldRange = FieldRange::new(0.0, 100.0, 1);
pub const VOLTAGE: FieldRange = FieldRange::new(0.0, 26.0, 2);
pub const CURRENT: FieldRange = FieldRange::new(0.0, 3200.0, 2);
pub const GYRO: FieldRange = FieldRange::new(-250.0, 250.0, 2);
pub const ACCEL: FieldRange = FieldRange::new(-2.0, 2.0, 2);

pub fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Uniform draw from `range`, rounded to its precision.
pub fn draw(rng: &mut impl Rng, range: &FieldRange) -> f64 {
    let value = rng.gen_range(range.min..=range.max);
    round_to(value, range.decimals).clamp(range.min, range.max)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Position {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            latitude: draw(rng, &LATITUDE),
            longitude: draw(rng, &LONGITUDE),
            altitude: draw(rng, &ALTITUDE),
        }
    }

    #[cfg(test)]
    pub fn values(&self) -> [(FieldRange, f64); 3] {
        [
            (LATITUDE, self.latitude),
            (LONGITUDE, self.longitude),
            (ALTITUDE, self.altitude),
        ]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude: {:.*}, Longitude: {:.*}, Altitude: {:.*}m",
            LATITUDE.decimals,
            self.latitude,
            LONGITUDE.decimals,
            self.longitude,
            ALTITUDE.decimals,
            self.altitude
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Environment {
    pub temperature: f64,
    pub humidity: f64,
}

impl Environment {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            temperature: draw(rng, &TEMPERATURE),
            humidity: draw(rng, &HUMIDITY),
        }
    }

    #[cfg(test)]
    pub fn values(&self) -> [(FieldRange, f64); 2] {
        [(TEMPERATURE, self.temperature), (HUMIDITY, self.humidity)]
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temperature: {:.*}C, Humidity: {:.*}%",
            TEMPERATURE.decimals, self.temperature, HUMIDITY.decimals, self.humidity
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Power {
    pub voltage: f64,
    pub current: f64,
}

impl Power {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            voltage: draw(rng, &VOLTAGE),
            current: draw(rng, &CURRENT),
        }
    }

    #[cfg(test)]
    pub fn values(&self) -> [(FieldRange, f64); 2] {
        [(VOLTAGE, self.voltage), (CURRENT, self.current)]
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Voltage: {:.*}V, Current: {:.*}mA",
            VOLTAGE.decimals, self.voltage, CURRENT.decimals, self.current
        )
    }
}

/// Gyroscope (°/s) and accelerometer (g) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Motion {
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
}

impl Motion {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            gx: draw(rng, &GYRO),
            gy: draw(rng, &GYRO),
            gz: draw(rng, &GYRO),
            ax: draw(rng, &ACCEL),
            ay: draw(rng, &ACCEL),
            az: draw(rng, &ACCEL),
        }
    }

    #[cfg(test)]
    pub fn values(&self) -> [(FieldRange, f64); 6] {
        [
            (GYRO, self.gx),
            (GYRO, self.gy),
            (GYRO, self.gz),
            (ACCEL, self.ax),
            (ACCEL, self.ay),
            (ACCEL, self.az),
        ]
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = GYRO.decimals;
        let a = ACCEL.decimals;
        write!(
            f,
            "Gx: {:.*}°/s, Gy: {:.*}°/s, Gz: {:.*}°/s, Ax: {:.*}g, Ay: {:.*}g, Az: {:.*}g",
            g, self.gx, g, self.gy, g, self.gz, a, self.ax, a, self.ay, a, self.az
        )
    }
}

/// All readings gathered in one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transmission {
    pub position: Position,
    pub environment: Environment,
    pub power: Power,
    pub motion: Motion,
}

impl Transmission {
    /// Newline-joined text block handed to the link.
    pub fn record(&self) -> String {
        self.to_string()
    }

    #[cfg(test)]
    pub fn values(&self) -> Vec<(FieldRange, f64)> {
        let mut values = Vec::with_capacity(13);
        values.extend(self.position.values());
        values.extend(self.environment.values());
        values.extend(self.power.values());
        values.extend(self.motion.values());
        values
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}\n{}",
            self.position, self.environment, self.power, self.motion
        )
    }
}
