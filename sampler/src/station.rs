use crate::link::Link;
use crate::sampler::Sampler;
use crate::scheduler::{Action, Schedule, TickCounter, TickSource};
use rand::Rng;
use tracing::{debug, error, info};

pub const RECEIVED_PLACEHOLDER: &str = "Hello, LoRa!";

/// The sampler/transmitter loop: one schedule evaluation per tick.
pub struct Station<R, L> {
    sampler: Sampler<R>,
    link: L,
    schedule: Schedule<Action>,
    counter: TickCounter,
}

impl<R: Rng, L: Link> Station<R, L> {
    pub fn new(sampler: Sampler<R>, link: L, schedule: Schedule<Action>) -> Self {
        Self {
            sampler,
            link,
            schedule,
            counter: TickCounter::new(),
        }
    }

    pub fn counter(&self) -> u64 {
        self.counter.get()
    }

    /// Runs until the tick source is exhausted. With wall-clock ticks that is never.
    pub async fn run<T: TickSource>(&mut self, ticks: &mut T) {
        info!("Starting simulated LoRa handler");

        while ticks.next_tick().await {
            self.on_tick();
        }

        info!("Tick source exhausted after {} ticks", self.counter.get());
    }

    /// Performs the actions due at the current counter value, then advances it.
    pub fn on_tick(&mut self) -> Vec<Action> {
        let tick = self.counter.get();
        let fired: Vec<Action> = self.schedule.due(tick).collect();

        for action in &fired {
            match action {
                Action::Transmit => self.transmit(tick),
                Action::Receive => self.receive(),
            }
        }

        debug!("Tick {} fired {:?}", tick, fired);
        self.counter.advance();
        fired
    }

    fn transmit(&mut self, tick: u64) {
        let transmission = self.sampler.collect();
        if let Err(e) = self.link.transmit(tick, &transmission) {
            error!("Transmission failed at tick {}: {}", tick, e);
        }
    }

    fn receive(&mut self) {
        info!("Simulated data received: {}", RECEIVED_PLACEHOLDER);
    }
}
