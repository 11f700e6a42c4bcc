use crate::gps::GpsReceiver;
use crate::telemetry::{Environment, Motion, Position, Power, Transmission};
use rand::Rng;
use tracing::{debug, error};

/// Gathers one reading per sensor category. Only the position can come from real hardware.
pub struct Sampler<R> {
    rng: R,
    gps: Option<GpsReceiver>,
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R, gps: Option<GpsReceiver>) -> Self {
        Self { rng, gps }
    }

    pub fn has_gps(&self) -> bool {
        self.gps.is_some()
    }

    pub fn read_position(&mut self) -> Position {
        if let Some(gps) = self.gps.as_mut() {
            match gps.read_fix() {
                Ok(Some(position)) => return position,
                Ok(None) => debug!("No GPS fix this tick, simulating position"),
                Err(e) => error!("GPS read error: {}", e),
            }
        }
        Position::random(&mut self.rng)
    }

    pub fn read_environment(&mut self) -> Environment {
        Environment::random(&mut self.rng)
    }

    pub fn read_power(&mut self) -> Power {
        Power::random(&mut self.rng)
    }

    pub fn read_motion(&mut self) -> Motion {
        Motion::random(&mut self.rng)
    }

    pub fn collect(&mut self) -> Transmission {
        Transmission {
            position: self.read_position(),
            environment: self.read_environment(),
            power: self.read_power(),
            motion: self.read_motion(),
        }
    }
}
