//! Frame pacing: the rate limiter and the per-frame clock.
//!
//! The limiter blocks the whole process with a plain sleep until the next
//! frame deadline; the loop is single-threaded and cooperative, so that is
//! the only suspension point. The clock keeps the delta-time and
//! once-per-second FPS bookkeeping.

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps the loop to hold a target frame rate.
#[derive(Debug)]
pub struct FrameLimiter {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl FrameLimiter {
    /// Creates a limiter targeting `fps` frames per second.
    pub fn new(fps: f32) -> Self {
        Self {
            period: period_for(fps),
            next_deadline: None,
        }
    }

    /// Retargets the limiter; takes effect from the next tick.
    pub fn set_fps(&mut self, fps: f32) {
        self.period = period_for(fps);
    }

    /// Blocks until the next frame deadline and returns the wake-up time.
    ///
    /// The first tick returns immediately; every later tick is spaced at
    /// least one frame period after the previous one.
    pub fn tick(&mut self) -> Instant {
        if let Some(deadline) = self.next_deadline {
            let now = Instant::now();
            if now < deadline {
                thread::sleep(deadline - now);
            }
        }
        let woke = Instant::now();
        self.next_deadline = Some(woke + self.period);
        woke
    }
}

fn period_for(fps: f32) -> Duration {
    // A non-positive or absurd target would stall or spin the loop.
    let fps = fps.clamp(1.0, 1000.0);
    Duration::from_secs_f32(1.0 / fps)
}

/// Per-frame delta and FPS counter.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    frames_this_second: u32,
    current_fps: u32,
    last_fps_time: Instant,
}

impl FrameClock {
    /// Creates a clock starting now.
    pub fn new() -> Self {
        Self::anchored(Instant::now())
    }

    /// Creates a clock with an explicit start instant.
    pub fn anchored(start: Instant) -> Self {
        Self {
            start,
            last_frame: start,
            delta: Duration::ZERO,
            frames_this_second: 0,
            current_fps: 0,
            last_fps_time: start,
        }
    }

    /// Records a frame at `now`; returns the tick (time since the clock
    /// started) handed to the game hooks.
    pub fn frame(&mut self, now: Instant) -> Duration {
        self.delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        self.frames_this_second += 1;
        if now.duration_since(self.last_fps_time) >= Duration::from_secs(1) {
            self.current_fps = self.frames_this_second;
            self.frames_this_second = 0;
            self.last_fps_time = now;
        }

        now.duration_since(self.start)
    }

    /// Time between the two most recent frames.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Frames counted over the last full second.
    pub fn fps(&self) -> u32 {
        self.current_fps
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
    fn limiter_spaces_ticks_by_the_frame_period() {
        let mut limiter = FrameLimiter::new(100.0);
        let first = limiter.tick();
        let second = limiter.tick();
        let third = limiter.tick();
        // 10 ms period at 100 FPS, with a little float slack.
        assert!(second.duration_since(first) >= Duration::from_millis(9));
        assert!(third.duration_since(second) >= Duration::from_millis(9));
    }

    #[test]
    fn set_fps_retargets_the_period() {
        let mut limiter = FrameLimiter::new(1.0);
        limiter.set_fps(200.0);
        let first = limiter.tick();
        let second = limiter.tick();
        // 5 ms period after the retarget, nowhere near the old 1 s one.
        let spacing = second.duration_since(first);
        assert!(spacing >= Duration::from_millis(4));
        assert!(spacing < Duration::from_millis(500));
    }

    #[test]
    fn nonsense_fps_targets_are_clamped() {
        // Must not panic or stall forever.
        let mut limiter = FrameLimiter::new(0.0);
        limiter.set_fps(-60.0);
        limiter.tick();
    }

    #[test]
    fn clock_reports_tick_since_start_and_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::anchored(start);

        let tick = clock.frame(start + Duration::from_millis(20));
        assert_eq!(tick, Duration::from_millis(20));
        assert_eq!(clock.delta(), Duration::from_millis(20));

        let tick = clock.frame(start + Duration::from_millis(50));
        assert_eq!(tick, Duration::from_millis(50));
        assert_eq!(clock.delta(), Duration::from_millis(30));
    }

    #[test]
    fn fps_counter_updates_once_per_second() {
        let start = Instant::now();
        let mut clock = FrameClock::anchored(start);

        for i in 1..=30 {
            clock.frame(start + Duration::from_millis(i * 33));
        }
        assert_eq!(clock.fps(), 0); // first second not yet complete

        clock.frame(start + Duration::from_millis(1001));
        assert_eq!(clock.fps(), 31);
    }
}
