use log::info;
use std::time::Duration;

const REPORT_WINDOW: Duration = Duration::from_secs(1);

/// Measures the framerate actually achieved, one report per second.
pub struct FpsCounter {
    window_start: Duration,
    frames: u32,
    last_fps: Option<f64>,
}

impl FpsCounter {
    #[inline]
    pub fn new(now: Duration) -> Self {
        Self {
            window_start: now,
            frames: 0,
            last_fps: None,
        }
    }

    /// Count a presented frame. Returns the measured framerate when a report window
    /// has just been closed.
    pub fn frame(&mut self, now: Duration) -> Option<f64> {
        self.frames += 1;

        let elapsed = now.saturating_sub(self.window_start);
        if elapsed < REPORT_WINDOW {
            return None;
        }

        let fps = self.frames as f64 / elapsed.as_secs_f64();
        info!("FPS: {:.1}", fps);

        self.window_start = now;
        self.frames = 0;
        self.last_fps = Some(fps);
        self.last_fps
    }

    #[inline]
    pub fn last_fps(&self) -> Option<f64> {
        self.last_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let mut counter = FpsCounter::new(Duration::ZERO);
        let step = Duration::from_millis(10);

        let mut now = Duration::ZERO;
        for _ in 0..99 {
            now += step;
            assert_eq!(counter.frame(now), None);
        }
        assert_eq!(counter.last_fps(), None);

        now += step;
        let fps = counter.frame(now).unwrap();
        assert!((fps - 100.0).abs() < 1e-9);
        assert_eq!(counter.last_fps(), Some(fps));

        // New window starts empty.
        now += step;
        assert_eq!(counter.frame(now), None);
    }

    #[test]
    fn slow_frames_report_every_frame() {
        let mut counter = FpsCounter::new(Duration::ZERO);
        let fps = counter.frame(Duration::from_secs(2)).unwrap();
        assert!((fps - 0.5).abs() < 1e-9);
        let fps = counter.frame(Duration::from_secs(4)).unwrap();
        assert!((fps - 0.5).abs() < 1e-9);
    }
}
