//! Frame pacing
//!
//! Every loop in the hub ends its tick with `FrameClock::tick(hz)`, which
//! sleeps off whatever is left of the frame budget. The time source is a
//! trait so tests can run the clock on simulated time.

use std::time::{Duration, Instant};

/// Monotonic time source used by [`FrameClock`]
pub trait Clock {
    /// Time since the clock was created
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time backed by `Instant` and `thread::sleep`
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Caps a loop at a fixed tick rate
pub struct FrameClock<C: Clock = SystemClock> {
    clock: C,
    last_tick: Option<Duration>,
    /// Length of the most recent frame, sleep included
    last_frame: Duration,
}

impl FrameClock<SystemClock> {
    pub fn new() -> Self {
        FrameClock::with_clock(SystemClock::new())
    }
}

impl Default for FrameClock<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FrameClock<C> {
    pub fn with_clock(clock: C) -> Self {
        FrameClock {
            clock,
            last_tick: None,
            last_frame: Duration::ZERO,
        }
    }

    /// Frame budget for a tick rate; a rate of 0 is treated as 1 Hz
    pub fn frame_duration(target_hz: u32) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(target_hz.max(1)))
    }

    /// Wait until at least one frame at `target_hz` has passed since the
    /// previous call. The first call returns immediately.
    pub fn tick(&mut self, target_hz: u32) {
        let now = self.clock.now();

        if let Some(last) = self.last_tick {
            let deadline = last + Self::frame_duration(target_hz);
            if now < deadline {
                self.clock.sleep(deadline - now);
            }
        }

        let after = self.clock.now();
        self.last_frame = self.last_tick.map_or(Duration::ZERO, |last| after - last);
        self.last_tick = Some(after);
    }

    /// Milliseconds since the clock was created
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.now().as_millis() as u64
    }

    /// Frames per second implied by the last frame length
    pub fn measured_fps(&self) -> u32 {
        let secs = self.last_frame.as_secs_f32();
        if secs > 0.0 { (1.0 / secs).round() as u32 } else { 0 }
    }
}

/// Simulated clock: time only moves when something sleeps or calls `advance`
#[cfg(test)]
pub struct ManualClock {
    now: std::cell::Cell<Duration>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: std::cell::Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
impl Clock for &ManualClock {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_does_not_wait() {
        let clock = ManualClock::new();
        let mut frames = FrameClock::with_clock(&clock);

        frames.tick(60);
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn test_ticks_are_spaced_by_frame_budget() {
        let clock = ManualClock::new();
        let mut frames = FrameClock::with_clock(&clock);

        for hz in [10, 30, 60] {
            frames.tick(hz);
            let before = clock.now();
            frames.tick(hz);
            let gap = clock.now() - before;
            assert!(gap >= FrameClock::<ManualClock>::frame_duration(hz));
            assert!(gap.as_millis() as u64 >= 1000 / u64::from(hz) - 1);
        }
    }

    #[test]
    fn test_slow_frame_is_not_padded() {
        let clock = ManualClock::new();
        let mut frames = FrameClock::with_clock(&clock);

        frames.tick(10);
        clock.advance(Duration::from_millis(250));
        frames.tick(10);

        assert_eq!(clock.now(), Duration::from_millis(250));
    }

    #[test]
    fn test_snake_rate_is_100ms() {
        assert_eq!(
            FrameClock::<ManualClock>::frame_duration(10),
            Duration::from_millis(100)
        );
        assert_eq!(
            FrameClock::<ManualClock>::frame_duration(0),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_measured_fps() {
        let clock = ManualClock::new();
        let mut frames = FrameClock::with_clock(&clock);

        assert_eq!(frames.measured_fps(), 0);
        frames.tick(30);
        frames.tick(30);
        assert_eq!(frames.measured_fps(), 30);
        assert_eq!(frames.elapsed_ms(), 33);
    }
}
