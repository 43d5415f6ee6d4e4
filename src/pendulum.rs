//! Spring pendulum for the hanging badge.
//!
//! Each free frame pulls the badge toward its rest point with a linear spring,
//! then damps the velocity. Damping escalates with every velocity reversal
//! seen on an axis, so the swing dies out faster the longer it oscillates,
//! the way a real elastic band loses energy. Rotation is not simulated; it is
//! read off the horizontal offset from the anchor and the horizontal velocity.
//!
//! The motion has exactly one writer at a time. [`MotionPhase::Free`] lets the
//! spring integrate; [`MotionPhase::Dragging`] hands the position to the
//! pointer and parks the spring. Releasing carries the drag velocity back as
//! an explicit [`Release`] payload.

use crate::config::PendulumConfig;
use crate::drag::{DragSession, PointerSample, Release};
use crate::float::Float;
use crate::layout::{AnchorAndRest, Spawn};
use crate::observer::FrameObserver;
use crate::vec::{Vec, Vec2};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Velocity reversal counter for one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AxisBounce<F: Float> {
    count: u32,
    last_velocity: F,
}

impl<F: Float> AxisBounce<F> {
    /// Record this frame's velocity. Returns true if it reversed direction
    /// relative to the previous nonzero sample.
    pub fn observe(&mut self, velocity: F) -> bool {
        let reversed = self.last_velocity != F::zero()
            && velocity.sign() != self.last_velocity.sign();
        if reversed {
            self.count += 1;
        }
        self.last_velocity = velocity;
        reversed
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// `base ^ (1 + count * escalation)`.
    pub fn damping(&self, base: f64, escalation: f64) -> F {
        let exponent = F::one() + F::from_f64(f64::from(self.count) * escalation);
        F::from_f64(base).powf(exponent)
    }

    /// Forget the reversals but keep the last velocity, so a reversal right
    /// after a drag still counts.
    fn clear_count(&mut self) {
        self.count = 0;
    }
}

/// Position, rotation and velocity of the badge. Shared with the ball field
/// as read-only forcing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BadgeMotion<F: Float> {
    pub position: Vec2<F>,
    pub rotation: F,
    pub velocity: Vec2<F>,
}

impl<F: Float> BadgeMotion<F> {
    pub fn at(position: Vec2<F>) -> Self {
        BadgeMotion { position, rotation: F::zero(), velocity: Vec2::zero() }
    }
}

impl<F: Float> From<Spawn<F>> for BadgeMotion<F> {
    fn from(spawn: Spawn<F>) -> Self {
        BadgeMotion { position: spawn.position, rotation: spawn.rotation, velocity: spawn.velocity }
    }
}

/// Who currently writes the badge motion.
#[derive(Clone, Debug, PartialEq)]
pub enum MotionPhase<F: Float> {
    Free,
    Dragging(DragSession<F>),
}

/// What a call to [`Pendulum::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The badge is held by the pointer; nothing moved.
    Held,
    Integrated,
}

/// Damped spring pulling the badge toward its rest point.
#[derive(Clone, Debug)]
pub struct Pendulum<F: Float> {
    motion: BadgeMotion<F>,
    frame: AnchorAndRest<F>,
    phase: MotionPhase<F>,
    bounce_x: AxisBounce<F>,
    bounce_y: AxisBounce<F>,
    last_time_ms: Option<f64>,
    config: PendulumConfig,
}

impl<F: Float> Pendulum<F> {
    pub fn new(frame: AnchorAndRest<F>, motion: BadgeMotion<F>, config: PendulumConfig) -> Self {
        Pendulum {
            motion,
            frame,
            phase: MotionPhase::Free,
            bounce_x: AxisBounce::default(),
            bounce_y: AxisBounce::default(),
            last_time_ms: None,
            config,
        }
    }

    pub fn motion(&self) -> &BadgeMotion<F> {
        &self.motion
    }

    pub fn position(&self) -> Vec2<F> {
        self.motion.position
    }

    pub fn rotation(&self) -> F {
        self.motion.rotation
    }

    pub fn velocity(&self) -> Vec2<F> {
        self.motion.velocity
    }

    pub fn frame(&self) -> &AnchorAndRest<F> {
        &self.frame
    }

    pub fn phase(&self) -> &MotionPhase<F> {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, MotionPhase::Dragging(_))
    }

    pub fn bounce_count(&self, axis: Axis) -> u32 {
        self.bounce(axis).count()
    }

    /// Damping factor the next free frame will apply on `axis`.
    pub fn damping_factor(&self, axis: Axis) -> F {
        self.bounce(axis).damping(self.config.base_damping, self.config.bounce_escalation)
    }

    /// Move the anchor and rest point without touching the current motion.
    pub fn set_frame(&mut self, frame: AnchorAndRest<F>) {
        self.frame = frame;
    }

    /// Reset the clock so the first frame after (re)subscription is nominal.
    pub fn start_clock(&mut self, now_ms: f64) {
        self.last_time_ms = Some(now_ms);
    }

    /// Advance one animation frame.
    pub fn step<O: FrameObserver<F>>(&mut self, now_ms: f64, observer: &mut O) -> StepOutcome {
        let dt = self.frame_delta(now_ms);

        if let MotionPhase::Dragging(session) = &mut self.phase {
            session.hold();
            self.motion.velocity = Vec2::zero();
            self.bounce_x.clear_count();
            self.bounce_y.clear_count();
            return StepOutcome::Held;
        }

        let current = self.motion.position;
        let spring = (self.frame.rest - current)
            .scale(F::from_f64(self.config.spring_stiffness) * dt);
        let mut velocity = self.motion.velocity + spring;

        if self.bounce_x.observe(velocity.x) {
            observer.on_bounce(Axis::X, self.bounce_x.count());
        }
        if self.bounce_y.observe(velocity.y) {
            observer.on_bounce(Axis::Y, self.bounce_y.count());
        }

        velocity.x = velocity.x * self.damping_factor(Axis::X);
        velocity.y = velocity.y * self.damping_factor(Axis::Y);

        self.motion.velocity = velocity;
        self.motion.position = current + velocity;
        self.motion.rotation = (current.x - self.frame.anchor.x)
            / F::from_f64(self.config.rotation_offset_divisor)
            + velocity.x / F::from_f64(self.config.rotation_velocity_divisor);

        observer.on_pendulum(&self.motion);
        StepOutcome::Integrated
    }

    /// Free -> Dragging. Returns false if a drag is already in progress.
    pub fn begin_drag(&mut self, pointer: PointerSample) -> bool {
        if self.is_dragging() {
            return false;
        }
        log::debug!(
            "drag start at ({:.1}, {:.1})",
            self.motion.position.x.to_f64(),
            self.motion.position.y.to_f64()
        );
        self.phase = MotionPhase::Dragging(DragSession::begin(pointer, self.motion.position));
        true
    }

    /// Write the pointer-driven position. Ignored unless dragging.
    pub fn drag_to(&mut self, pointer: PointerSample) -> Option<Vec2<F>> {
        let frame_ms = self.config.drag_velocity_frame_ms;
        match &mut self.phase {
            MotionPhase::Dragging(session) => {
                let position = session.track(pointer, frame_ms);
                self.motion.position = position;
                Some(position)
            }
            MotionPhase::Free => None,
        }
    }

    /// Dragging -> Free, handing the drag velocity to the spring.
    pub fn release(&mut self) -> Option<Release<F>> {
        let session = match core::mem::replace(&mut self.phase, MotionPhase::Free) {
            MotionPhase::Dragging(session) => session,
            MotionPhase::Free => return None,
        };
        let release = session.finish(self.config.release_velocity_scale);
        self.motion.velocity = release.velocity;
        self.bounce_x.clear_count();
        self.bounce_y.clear_count();
        log::debug!(
            "drag released with velocity ({:.2}, {:.2})",
            release.velocity.x.to_f64(),
            release.velocity.y.to_f64()
        );
        Some(release)
    }

    fn bounce(&self, axis: Axis) -> &AxisBounce<F> {
        match axis {
            Axis::X => &self.bounce_x,
            Axis::Y => &self.bounce_y,
        }
    }

    fn frame_delta(&mut self, now_ms: f64) -> F {
        let dt = match self.last_time_ms {
            Some(last) => {
                let normalized = (now_ms - last) / self.config.nominal_frame_ms;
                normalized.min(self.config.max_catch_up).max(0.0)
            }
            None => 1.0,
        };
        self.last_time_ms = Some(now_ms);
        F::from_f64(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_counts_only_after_nonzero_sample() {
        let mut b = AxisBounce::<f32>::default();
        assert!(!b.observe(-1.0));
        assert!(!b.observe(-0.5));
        assert!(b.observe(0.25));
        assert!(b.observe(0.0));
        assert!(!b.observe(-1.0));
        assert_eq!(b.count(), 2);
    }

    #[test]
    fn clearing_keeps_last_velocity() {
        let mut b = AxisBounce::<f64>::default();
        b.observe(-2.0);
        b.observe(1.0);
        b.clear_count();
        assert_eq!(b.count(), 0);
        assert!(b.observe(-1.0));
        assert_eq!(b.count(), 1);
    }

    #[test]
    fn damping_escalates_with_bounces() {
        let mut b = AxisBounce::<f64>::default();
        let fresh = b.damping(0.96, 0.3);
        assert!((fresh - 0.96).abs() < 1e-12);
        b.observe(1.0);
        b.observe(-1.0);
        assert!(b.damping(0.96, 0.3) < fresh);
    }
}
