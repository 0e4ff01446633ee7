use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the frame source started
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Shared flag that ends a running frame iterator
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

enum Clock {
    Wall { start: Instant, last: Instant },
    Fixed { step: f32 },
}

/// Iterator that yields frame information until stopped or a frame limit is hit
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    clock: Clock,
    limit: Option<u64>,
    stop: StopHandle,
}

impl FrameIterator {
    /// Frames timed by the wall clock
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            clock: Clock::Wall { start: now, last: now },
            limit: None,
            stop: StopHandle::default(),
        }
    }

    /// Frames spaced exactly `step` seconds apart, starting at time zero
    pub fn from_fixed_step(step: f32) -> Self {
        Self {
            clock: Clock::Fixed { step },
            ..Self::new()
        }
    }

    /// Stop after `frames` frames
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.stop.is_stopped() {
            return None;
        }
        if self.limit.is_some_and(|limit| self.frame_number >= limit) {
            return None;
        }

        let (time, delta) = match &mut self.clock {
            Clock::Wall { start, last } => {
                let now = Instant::now();
                let delta = now.duration_since(*last).as_secs_f32();
                *last = now;
                (now.duration_since(*start).as_secs_f32(), delta)
            }
            Clock::Fixed { step } => {
                let delta = if self.frame_number == 0 { 0.0 } else { *step };
                (self.frame_number as f32 * *step, delta)
            }
        };

        let info = FrameInfo::new(self.frame_number, time, delta);
        self.frame_number += 1;

        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_timing() {
        let frames: Vec<FrameInfo> = FrameIterator::from_fixed_step(0.5).with_limit(3).collect();
        assert_eq!(
            frames,
            vec![
                FrameInfo::new(0, 0.0, 0.0),
                FrameInfo::new(1, 0.5, 0.5),
                FrameInfo::new(2, 1.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_zero_limit_yields_nothing() {
        assert_eq!(FrameIterator::new().with_limit(0).count(), 0);
    }

    #[test]
    fn test_stop_handle_ends_iteration() {
        let mut frames = FrameIterator::new();
        let stop = frames.stop_handle();

        assert!(frames.next().is_some());
        stop.stop();
        assert!(stop.is_stopped());
        assert!(frames.next().is_none());
        assert_eq!(frames.frame_number(), 1);
    }

    #[test]
    fn test_wall_clock_is_monotonic() {
        let mut frames = FrameIterator::new();
        let first = frames.next().unwrap();
        let second = frames.next().unwrap();
        assert_eq!(first.number, 0);
        assert_eq!(second.number, 1);
        assert!(second.time >= first.time);
        assert!(second.delta >= 0.0);
    }
}
