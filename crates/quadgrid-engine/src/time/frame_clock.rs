use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots from consecutive timestamps.
///
/// Delta time is clamped so that a debugger pause or a minimized window does
/// not turn into one enormous animation step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    /// Creates a new clock with default clamps.
    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline to now.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.last = now;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_time_between_ticks() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.reset_at(t0);

        let a = clock.tick_at(t0 + Duration::from_millis(16));
        let b = clock.tick_at(t0 + Duration::from_millis(48));

        assert!((a.dt - 0.016).abs() < 1e-6);
        assert!((b.dt - 0.032).abs() < 1e-6);
        assert_eq!((a.frame_index, b.frame_index), (0, 1));
    }

    #[test]
    fn delta_is_clamped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.reset_at(t0);

        // Same instant: minimum clamp.
        assert!((clock.tick_at(t0).dt - 0.0001).abs() < 1e-7);
        // Long stall: maximum clamp.
        assert_eq!(clock.tick_at(t0 + Duration::from_secs(5)).dt, 0.25);
    }

    #[test]
    fn backwards_timestamp_saturates() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::with_clamps(Duration::ZERO, Duration::from_secs(1));
        clock.reset_at(t0);
        assert_eq!(clock.tick_at(t0 - Duration::from_millis(10)).dt, 0.0);
    }
}
