use std::time::{Duration, Instant};

use crate::settings::TICKS_PER_SECOND;

pub type TickCallback = Box<dyn FnMut()>;

/// Scheduler seam. The host registers one repeating callback and drives it
/// on its own tick loop; the callback is never reentered, so a sweep can
/// never overlap another sweep or a reload.
pub trait Ticker {
    fn start(&mut self, interval_ticks: u64, callback: TickCallback);
    fn stop(&mut self);
}

/// Wall-clock driver for running standalone, pacing ticks off a start
/// instant rather than sleeping a fixed amount per iteration so the
/// schedule does not drift with callback runtime.
pub struct ClockTicker {
    interval_ticks: u64,
    callback: Option<TickCallback>,
}

impl ClockTicker {
    const TICK_MS: u64 = 1000 / TICKS_PER_SECOND;

    pub fn new() -> Self {
        Self {
            interval_ticks: 0,
            callback: None,
        }
    }

    /// Block the current thread, firing the callback every interval. Runs
    /// until the process is killed (or `stop` was called before `run`).
    pub fn run(&mut self) {
        let start = Instant::now();
        let mut due_ticks = self.interval_ticks;
        while let Some(callback) = self.callback.as_mut() {
            let due = Self::deadline(start, due_ticks);
            if let Some(wait) = due.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
            callback();
            due_ticks = due_ticks.saturating_add(self.interval_ticks);
        }
    }

    /// Tick counts stay in u64 all the way into the `Duration` so long
    /// uptimes cannot wrap the schedule.
    fn deadline(start: Instant, ticks: u64) -> Instant {
        start + Duration::from_millis(ticks.saturating_mul(Self::TICK_MS))
    }
}

impl Default for ClockTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for ClockTicker {
    fn start(&mut self, interval_ticks: u64, callback: TickCallback) {
        assert!(interval_ticks > 0, "interval must be at least one tick");
        self.interval_ticks = interval_ticks;
        self.callback = Some(callback);
    }

    fn stop(&mut self) {
        self.callback = None;
    }
}

/// Test driver: time passes only when `advance` is called.
pub struct ManualTicker {
    interval_ticks: u64,
    elapsed: u64,
    callback: Option<TickCallback>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self {
            interval_ticks: 0,
            elapsed: 0,
            callback: None,
        }
    }

    /// Advance the clock by `ticks`, firing the callback once per interval
    /// boundary crossed.
    pub fn advance(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.elapsed += 1;
            if let Some(callback) = self.callback.as_mut() {
                if self.elapsed % self.interval_ticks == 0 {
                    callback();
                }
            }
        }
    }
}

impl Default for ManualTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, interval_ticks: u64, callback: TickCallback) {
        assert!(interval_ticks > 0, "interval must be at least one tick");
        self.interval_ticks = interval_ticks;
        self.callback = Some(callback);
    }

    fn stop(&mut self) {
        self.callback = None;
    }
}
