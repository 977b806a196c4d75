//! Clocks for the simulator.
//!
//! These use `std::time` which is not available in `no_std` environments, so
//! they live here rather than in the engine crate.

#![cfg_attr(not(feature = "window"), allow(dead_code))]

use std::thread;
use std::time::{Duration, Instant};

use emotion_engine::config::FRAME_TIME_MS;
use emotion_engine::{Clock, Delay};

/// Target frame time (~50 FPS). The window loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(FRAME_TIME_MS as u64);

/// Wall clock measured from process start. Delays really sleep.
pub struct WallTimer {
    start: Instant,
}

impl WallTimer {
    pub fn new() -> Self { Self { start: Instant::now() } }
}

impl Clock for WallTimer {
    fn now_ms(&self) -> u32 { self.start.elapsed().as_millis() as u32 }
}

impl Delay for WallTimer {
    fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Simulated clock for headless runs. Delays advance time instantly.
#[derive(Debug, Default)]
pub struct VirtualTimer {
    now: u32,
}

impl VirtualTimer {
    pub fn starting_at(now: u32) -> Self { Self { now } }
}

impl Clock for VirtualTimer {
    fn now_ms(&self) -> u32 { self.now }
}

impl Delay for VirtualTimer {
    fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        self.now = self.now.wrapping_add(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_timer_advances_on_delay() {
        let mut timer = VirtualTimer::starting_at(u32::MAX - 5);
        timer.delay_ms(10);
        assert_eq!(timer.now_ms(), 4, "wraps like the device clock");
    }

    #[test]
    fn test_frame_time_matches_engine() {
        assert_eq!(FRAME_TIME.as_millis(), 20);
    }
}
