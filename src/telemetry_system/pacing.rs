use std::thread;
use std::time::Duration;

use log::warn;

/// Wall-clock pacing between ticks. Has no influence on simulated time.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Sleeps for the requested delay so the display follows simulated time.
#[derive(Debug, Clone, Copy)]
pub struct RealTimePacer {
    pub speedup: f64,
}

impl RealTimePacer {
    pub fn new(speedup: f64) -> Self {
        RealTimePacer { speedup }
    }
}

impl Default for RealTimePacer {
    fn default() -> Self {
        RealTimePacer::new(1.0)
    }
}

impl Pacer for RealTimePacer {
    fn pause(&mut self, delay: Duration) {
        if !(self.speedup > 0.0) {
            return;
        }
        match Duration::try_from_secs_f64(delay.as_secs_f64() / self.speedup) {
            Ok(scaled) => thread::sleep(scaled),
            Err(err) => warn!("Skipping pause of {:?} at speedup {}: {}", delay, self.speedup, err),
        }
    }
}

/// Headless runs: never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _delay: Duration) {}
}
