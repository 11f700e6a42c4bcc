use std::num::NonZeroU64;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Periodic actions the station performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Transmit,
    Receive,
}

/// Monotonic loop counter. Starts at zero and is never reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickCounter(u64);

impl TickCounter {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

#[derive(Debug, Clone)]
struct Periodic<A> {
    every: NonZeroU64,
    action: A,
}

/// Table of actions keyed by the tick interval they fire on.
#[derive(Debug, Clone)]
pub struct Schedule<A> {
    entries: Vec<Periodic<A>>,
}

impl<A: Copy> Schedule<A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn every(mut self, every: NonZeroU64, action: A) -> Self {
        self.entries.push(Periodic { every, action });
        self
    }

    /// Actions due at `tick`, in table order.
    pub fn due(&self, tick: u64) -> impl Iterator<Item = A> + '_ {
        self.entries
            .iter()
            .filter(move |entry| tick % entry.every.get() == 0)
            .map(|entry| entry.action)
    }
}

impl<A: Copy> Default for Schedule<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule<Action> {
    pub fn station(transmit_every: NonZeroU64, receive_every: NonZeroU64) -> Self {
        Self::new()
            .every(transmit_every, Action::Transmit)
            .every(receive_every, Action::Receive)
    }
}

/// Source of loop ticks. Returns `false` once no more ticks will come.
pub trait TickSource {
    async fn next_tick(&mut self) -> bool;
}

/// Wall-clock ticks backed by a tokio interval. The first tick completes immediately.
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Fixed number of ticks with no waiting in between.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct CountedTicks {
    remaining: u64,
}

#[cfg(test)]
impl CountedTicks {
    pub fn new(count: u64) -> Self {
        Self { remaining: count }
    }
}

#[cfg(test)]
impl TickSource for CountedTicks {
    async fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
