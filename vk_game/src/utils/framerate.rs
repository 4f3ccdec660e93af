use crate::errors::{Result, VkGameError};
use log::debug;
use std::time::{Duration, Instant};

/// Source of monotonic time for a [`FramePacer`].
///
/// Timestamps are expressed as the time elapsed since an origin chosen by the clock,
/// the only requirement is that they never go backward.
pub trait Clock {
    fn now(&self) -> Result<Duration>;

    /// Block the calling thread until `deadline` is reached.
    /// Returns immediately if the deadline is already in the past.
    fn sleep_until(&self, deadline: Duration) -> Result<()>;
}

/// The real clock, backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Result<Duration> {
        Ok(self.origin.elapsed())
    }

    fn sleep_until(&self, deadline: Duration) -> Result<()> {
        let target = self.origin.checked_add(deadline).ok_or_else(|| {
            VkGameError::Clock(format!("Deadline {:?} overflows the clock", deadline))
        })?;

        let now = Instant::now();
        if target > now {
            std::thread::sleep(target - now);
        }
        Ok(())
    }
}

/// Paces a render loop to a target number of frames per second.
///
/// Deadlines are laid on a fixed grid: each recorded draw advances the schedule from
/// the previous *scheduled* time rather than from the time the thread actually woke
/// up, so early or late wakeups never accumulate into drift.
pub struct FramePacer<C: Clock = MonotonicClock> {
    clock: C,
    expected_fps: i32,
    delta: Duration,
    last_draw: Duration,
    next_draw: Duration,
    frame_count: u64,
}

impl FramePacer<MonotonicClock> {
    pub fn with_monotonic_clock(expected_fps: i32) -> Result<Self> {
        Self::new(MonotonicClock::new(), expected_fps)
    }

    /// Check a target rate without starting a schedule.
    pub fn validate_expected_fps(expected_fps: i32) -> Result<()> {
        frame_interval(expected_fps).map(|_| ())
    }
}

impl<C: Clock> FramePacer<C> {
    pub fn new(clock: C, expected_fps: i32) -> Result<Self> {
        let interval = frame_interval(expected_fps)?;
        let last_draw = clock.now()?;

        debug!(
            "Pacing frames at {} FPS ({:?} per frame)",
            expected_fps, interval
        );

        Ok(Self {
            clock,
            expected_fps,
            delta: Duration::ZERO,
            last_draw,
            next_draw: last_draw + interval,
            frame_count: 0,
        })
    }

    /// Lay a fresh grid starting now. Nothing else changes, the frame count included.
    pub fn restart(&mut self) -> Result<()> {
        self.last_draw = self.clock.now()?;
        self.next_draw = self.last_draw + self.frame_interval();
        Ok(())
    }

    /// Block until the next scheduled draw. A frame that is already late returns
    /// immediately.
    pub fn sleep_until_next_frame(&self) -> Result<()> {
        let now = self.clock.now()?;
        if now < self.next_draw {
            self.clock.sleep_until(self.next_draw)?;
        }
        Ok(())
    }

    /// Mark the scheduled frame as drawn and schedule the following one.
    /// Must be called right after the frame has been presented.
    pub fn record_draw(&mut self) {
        let previous = self.last_draw;
        self.last_draw = self.next_draw;
        self.next_draw = self.last_draw + self.frame_interval();
        self.delta = self.last_draw - previous;
    }

    #[inline]
    pub fn increment_frame_count(&mut self) -> u64 {
        self.frame_count += 1;
        self.frame_count
    }

    #[inline]
    pub fn expected_fps(&self) -> i32 {
        self.expected_fps
    }

    /// Change the target rate. The frame already scheduled keeps its deadline, the
    /// new rate applies from the following one.
    pub fn set_expected_fps(&mut self, expected_fps: i32) -> Result<()> {
        frame_interval(expected_fps)?;
        debug!(
            "Target framerate changed from {} to {} FPS",
            self.expected_fps, expected_fps
        );
        self.expected_fps = expected_fps;
        Ok(())
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time between the two most recently recorded draws.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn last_draw(&self) -> Duration {
        self.last_draw
    }

    #[inline]
    pub fn next_draw(&self) -> Duration {
        self.next_draw
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        // expected_fps is validated by every path that writes it
        Duration::from_secs_f64(1.0 / self.expected_fps as f64)
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

fn frame_interval(expected_fps: i32) -> Result<Duration> {
    if expected_fps <= 0 {
        return Err(VkGameError::InvalidFramerate(expected_fps));
    }
    Ok(Duration::from_secs_f64(1.0 / expected_fps as f64))
}
