/// Wall-clock rate limiting and the blink timer.
///
/// Callers pass the current time in milliseconds, so the cadence follows real
/// time rather than the frame count and tests can drive the clock directly.

/// Minimum-interval timer: `ready` once strictly more than `interval_ms` has
/// passed since the last time it fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Throttle {
    interval_ms: u64,
    last_ms: u64,
}

impl Throttle {
    /// A throttle that starts counting at `now_ms`.
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: now_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn ready(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_ms) > self.interval_ms
    }

    /// Restart the interval at `now_ms`.
    pub fn mark(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }

    /// `ready` + `mark` in one go.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if self.ready(now_ms) {
            self.mark(now_ms);
            true
        } else {
            false
        }
    }
}

/// Tick-driven square wave: stays in one state for `period + 1` calls, then
/// flips.  Used to blink the player while respawning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pulser {
    period: u32,
    tick: u32,
    state: bool,
}

impl Pulser {
    pub fn new(period: u32) -> Self {
        Self {
            period,
            tick: 0,
            state: false,
        }
    }

    pub fn next(&mut self) -> bool {
        if self.tick > self.period {
            self.tick = 0;
            self.state = !self.state;
        } else {
            self.tick += 1;
        }
        self.state
    }
}
