//! Artificial delay around "apply" and assistant replies.

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;

/// Source of simulated latency.
pub trait Latency {
    /// Delay for the next suspended operation. Zero is valid.
    fn next_delay(&self) -> Duration;
}

/// The same delay every time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedLatency(pub Duration);

impl FixedLatency {
    /// No delay at all.
    pub const NONE: FixedLatency = FixedLatency(Duration::ZERO);

    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

impl Latency for FixedLatency {
    fn next_delay(&self) -> Duration {
        self.0
    }
}

/// A uniformly random delay in `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterLatency {
    min: Duration,
    max: Duration,
}

impl JitterLatency {
    /// Creates a jittered latency. Bounds given the wrong way round are swapped.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }
}

impl Latency for JitterLatency {
    fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

/// Plays back a fixed sequence of delays, then zero.
///
/// Lets tests choose which of several overlapping operations finishes first.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedLatency {
    delays: RefCell<VecDeque<Duration>>,
}

#[cfg(test)]
impl ScriptedLatency {
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            delays: RefCell::new(delays.into_iter().collect()),
        }
    }
}

#[cfg(test)]
impl Latency for ScriptedLatency {
    fn next_delay(&self) -> Duration {
        self.delays.borrow_mut().pop_front().unwrap_or_default()
    }
}
