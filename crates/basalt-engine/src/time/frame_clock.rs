use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Produces one `FrameTime` per presented frame.
///
/// Delta time is clamped so that a debugger pause or a minimized window does
/// not turn into a huge step for frame-rate dependent animation.
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

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline, e.g. after the window was restored.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
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
    fn frame_index_counts_ticks() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn dt_is_clamped_below() {
        let mut clock = FrameClock::new();
        let base = clock.last;

        let ft = clock.tick_at(base);

        assert_eq!(ft.dt, FrameClock::DEFAULT_DT_MIN.as_secs_f32());
    }

    #[test]
    fn dt_is_clamped_above() {
        let mut clock = FrameClock::new();
        let base = clock.last;

        let ft = clock.tick_at(base + Duration::from_secs(5));

        assert_eq!(ft.dt, FrameClock::DEFAULT_DT_MAX.as_secs_f32());
    }

    #[test]
    fn dt_in_range_is_kept() {
        let mut clock = FrameClock::new();
        let base = clock.last;

        let ft = clock.tick_at(base + Duration::from_millis(16));

        assert!((ft.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn custom_clamps() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(10), Duration::from_millis(20));
        let base = clock.last;

        assert_eq!(clock.tick_at(base).dt, 0.010);
        assert_eq!(clock.tick_at(base + Duration::from_secs(1)).dt, 0.020);
    }

    #[test]
    fn reset_moves_baseline_and_keeps_frame_index() {
        let mut clock = FrameClock::new();
        let stale = clock.last;
        clock.tick_at(stale);

        clock.reset();
        assert!(clock.last >= stale);

        let ft = clock.tick_at(clock.last + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert_eq!(ft.frame_index, 1);
    }
}
