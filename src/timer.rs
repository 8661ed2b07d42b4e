//! Reaction timer with round history and randomized waits

use crate::error::{GameError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

/// Unit label printed after every recorded duration
pub const UNIT_LABEL: &str = "milisecs";

/// Measures one reaction at a time and keeps the results of past rounds
pub struct Timer {
    /// Start of the measurement in flight
    start_time: Option<Instant>,
    /// Recorded reaction times in milliseconds, oldest first
    history: Vec<u64>,
    rng: StdRng,
}

impl Timer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Timer whose random waits are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            start_time: None,
            history: Vec::with_capacity(crate::config::ROUNDS),
            rng,
        }
    }

    /// Start a measurement, discarding any measurement already in flight
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Whether a measurement is in flight
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Stop the measurement in flight, record it and return it in whole milliseconds
    pub fn stop(&mut self) -> Result<u64> {
        let start = self.start_time.take().ok_or(GameError::TimerNotStarted)?;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        self.history.push(elapsed_ms);
        Ok(elapsed_ms)
    }

    /// Recorded durations in recording order
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Draw a wait uniformly from `[min, max]` (bounds in either order)
    pub fn draw_delay(&mut self, min: Duration, max: Duration) -> Duration {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        if low == high {
            return low;
        }
        let secs = self.rng.gen_range(low.as_secs_f64()..=high.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Block for a random time in `[min, max]` and return the time drawn
    pub fn random_delay(&mut self, min: Duration, max: Duration) -> Duration {
        let wait = self.draw_delay(min, max);
        log::debug!("wait time: {:.3}s", wait.as_secs_f64());
        thread::sleep(wait);
        wait
    }

    /// Block for a fixed time
    pub fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }

    /// Write every recorded duration on its own line
    pub fn show_history<W: Write>(&self, out: &mut W) -> Result<()> {
        for ms in &self.history {
            writeln!(out, "{} {}", ms, UNIT_LABEL)?;
        }
        Ok(())
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
