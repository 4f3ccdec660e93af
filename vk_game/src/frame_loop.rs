//! The per-frame sequence of the application loop.
//!
//! Each iteration waits for the pacer, presents, then lets the pacer schedule the
//! following frame. Stopping is decided by the presentation target alone.

use crate::{
    errors::Result,
    utils::{Clock, FpsCounter, FramePacer},
};
use log::trace;

/// Where frames end up.
pub trait PresentationTarget {
    /// Hand the current frame to the display.
    fn present(&mut self) -> Result<()>;

    /// Polled once per iteration, before anything else happens.
    fn close_requested(&self) -> bool;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Continue,
    Exit,
}

pub struct FrameLoop<C: Clock, T: PresentationTarget> {
    pacer: FramePacer<C>,
    target: T,
    fps_counter: FpsCounter,
}

impl<C: Clock, T: PresentationTarget> FrameLoop<C, T> {
    /// The pacer's schedule restarts here, time spent before the loop exists
    /// doesn't count as missed frames.
    pub fn new(mut pacer: FramePacer<C>, target: T) -> Result<Self> {
        pacer.restart()?;
        let fps_counter = FpsCounter::new(pacer.last_draw());
        Ok(Self {
            pacer,
            target,
            fps_counter,
        })
    }

    /// Run a single iteration.
    pub fn step(&mut self) -> Result<LoopState> {
        if self.target.close_requested() {
            return Ok(LoopState::Exit);
        }

        self.pacer.sleep_until_next_frame()?;
        self.target.present()?;
        trace!("Frame {}", self.pacer.frame_count());
        self.pacer.record_draw();
        self.pacer.increment_frame_count();

        let now = self.pacer.clock().now()?;
        self.fps_counter.frame(now);

        Ok(LoopState::Continue)
    }

    /// Iterate until the target asks to close.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? == LoopState::Continue {}
        Ok(())
    }

    #[inline]
    pub fn pacer(&self) -> &FramePacer<C> {
        &self.pacer
    }

    #[inline]
    pub fn pacer_mut(&mut self) -> &mut FramePacer<C> {
        &mut self.pacer
    }

    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[inline]
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    #[inline]
    pub fn measured_fps(&self) -> Option<f64> {
        self.fps_counter.last_fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::VkGameError, utils::test_clock::SimulatedClock};
    use std::time::Duration;

    /// Records what the loop did and when, closes after a fixed number of frames.
    struct RecordingTarget {
        clock: SimulatedClock,
        presented_at: Vec<Duration>,
        close_after: usize,
        fail_on: Option<usize>,
    }

    impl RecordingTarget {
        fn closing_after(clock: &SimulatedClock, close_after: usize) -> Self {
            Self {
                clock: clock.clone(),
                presented_at: Vec::new(),
                close_after,
                fail_on: None,
            }
        }
    }

    impl PresentationTarget for RecordingTarget {
        fn present(&mut self) -> Result<()> {
            if self.fail_on == Some(self.presented_at.len()) {
                return Err(VkGameError::Vulkan(ash::vk::Result::ERROR_SURFACE_LOST_KHR));
            }
            self.presented_at.push(self.clock.now()?);
            Ok(())
        }

        fn close_requested(&self) -> bool {
            self.presented_at.len() >= self.close_after
        }
    }

    fn frame_loop(fps: i32, close_after: usize) -> FrameLoop<SimulatedClock, RecordingTarget> {
        let clock = SimulatedClock::starting_at(Duration::from_secs(1));
        let target = RecordingTarget::closing_after(&clock, close_after);
        FrameLoop::new(FramePacer::new(clock, fps).unwrap(), target).unwrap()
    }

    #[test]
    fn presents_on_the_grid_then_exits() {
        let mut frame_loop = frame_loop(60, 5);
        frame_loop.run().unwrap();

        let interval = frame_loop.pacer().frame_interval();
        let start = Duration::from_secs(1);
        let expected: Vec<_> = (1..=5u32).map(|n| start + interval * n).collect();

        assert_eq!(frame_loop.target().presented_at, expected);
        assert_eq!(frame_loop.pacer().frame_count(), 5);
        assert_eq!(frame_loop.pacer().last_draw(), start + interval * 5);
    }

    #[test]
    fn setup_time_is_not_caught_up() {
        let clock = SimulatedClock::starting_at(Duration::from_secs(1));
        let pacer = FramePacer::new(clock.clone(), 250).unwrap();
        // Window and surface creation happen here.
        clock.advance(Duration::from_millis(300));

        let target = RecordingTarget::closing_after(&clock, 80);
        let mut frame_loop = FrameLoop::new(pacer, target).unwrap();
        frame_loop.run().unwrap();

        assert_eq!(clock.sleeps(), 80);
        let interval = frame_loop.pacer().frame_interval();
        assert_eq!(
            frame_loop.target().presented_at[0],
            Duration::from_millis(1300) + interval
        );
    }

    #[test]
    fn close_is_checked_before_pacing() {
        let mut frame_loop = frame_loop(60, 0);
        let deadline = frame_loop.pacer().next_draw();

        assert_eq!(frame_loop.step().unwrap(), LoopState::Exit);
        assert!(frame_loop.target().presented_at.is_empty());
        assert_eq!(frame_loop.pacer().clock().sleeps(), 0);
        assert_eq!(frame_loop.pacer().next_draw(), deadline);
        assert_eq!(frame_loop.pacer().frame_count(), 0);
    }

    #[test]
    fn late_frames_are_presented_immediately() {
        let mut frame_loop = frame_loop(30, 3);
        let clock = frame_loop.pacer().clock().clone();

        clock.advance(Duration::from_secs(1));
        assert_eq!(frame_loop.step().unwrap(), LoopState::Continue);

        assert_eq!(clock.sleeps(), 0);
        assert_eq!(
            frame_loop.target().presented_at,
            vec![Duration::from_secs(2)]
        );
    }

    #[test]
    fn present_errors_stop_the_frame() {
        let mut frame_loop = frame_loop(60, 10);
        frame_loop.target_mut().fail_on = Some(2);

        assert!(matches!(
            frame_loop.run(),
            Err(VkGameError::Vulkan(ash::vk::Result::ERROR_SURFACE_LOST_KHR))
        ));
        // The failed frame was neither recorded nor counted.
        assert_eq!(frame_loop.pacer().frame_count(), 2);
    }

    #[test]
    fn rate_change_mid_run() {
        let mut frame_loop = frame_loop(30, 3);
        frame_loop.step().unwrap();

        frame_loop.pacer_mut().set_expected_fps(60).unwrap();
        frame_loop.run().unwrap();

        let presented = &frame_loop.target().presented_at;
        let slow = Duration::from_secs_f64(1.0 / 30.0);
        let fast = Duration::from_secs_f64(1.0 / 60.0);
        // The frame already scheduled keeps the old interval.
        assert_eq!(presented[1] - presented[0], slow);
        assert_eq!(presented[2] - presented[1], fast);
    }

    #[test]
    fn measures_the_achieved_rate() {
        let mut frame_loop = frame_loop(10, 10);
        frame_loop.run().unwrap();

        let fps = frame_loop.measured_fps().unwrap();
        assert!((fps - 10.0).abs() < 1e-6);
    }
}
