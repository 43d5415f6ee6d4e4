//! Frame observer trait for monitoring simulation progress.

use crate::ball::Ball;
use crate::float::Float;
use crate::pendulum::{Axis, BadgeMotion};

/// Trait for observing simulation frames.
///
/// Implement this trait to watch the simulation (e.g., for debugging,
/// recording, or profiling). All methods have default no-op implementations.
pub trait FrameObserver<F: Float> {
    /// Called after the ball field has advanced one frame.
    fn on_balls(&mut self, _balls: &[Ball<F>]) {}

    /// Called when the spring sees a velocity reversal on an axis.
    fn on_bounce(&mut self, _axis: Axis, _count: u32) {}

    /// Called after the pendulum integrates a free frame.
    fn on_pendulum(&mut self, _motion: &BadgeMotion<F>) {}

    /// Called when a scene frame is fully complete.
    fn on_frame_complete(&mut self, _now_ms: f64) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpFrameObserver;

impl<F: Float> FrameObserver<F> for NoOpFrameObserver {}

/// Observer that writes per-frame state to the `log` facade at trace level.
#[derive(Debug, Default)]
pub struct FrameLog {
    frames: u64,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<F: Float> FrameObserver<F> for FrameLog {
    fn on_balls(&mut self, balls: &[Ball<F>]) {
        if log::log_enabled!(log::Level::Trace) {
            let fastest = balls
                .iter()
                .map(|b| b.speed().to_f64())
                .fold(0.0f64, f64::max);
            log::trace!("balls: n={} fastest={fastest:.3}", balls.len());
        }
    }

    fn on_bounce(&mut self, axis: Axis, count: u32) {
        log::trace!("bounce on {axis:?}: {count}");
    }

    fn on_pendulum(&mut self, motion: &BadgeMotion<F>) {
        log::trace!(
            "badge: pos=({:.2}, {:.2}) rot={:.3} vel=({:.3}, {:.3})",
            motion.position.x.to_f64(),
            motion.position.y.to_f64(),
            motion.rotation.to_f64(),
            motion.velocity.x.to_f64(),
            motion.velocity.y.to_f64(),
        );
    }

    fn on_frame_complete(&mut self, now_ms: f64) {
        self.frames += 1;
        log::trace!("frame {} complete at {now_ms:.1}ms", self.frames);
    }
}
