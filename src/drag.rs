//! Pointer dragging of the badge.
//!
//! A drag writes the badge position directly (no spring) and keeps a running
//! velocity estimate so that letting go throws the badge instead of dropping it.

use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// Pointer position in client px with its event timestamp in ms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub time_ms: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, time_ms: f64) -> Self {
        PointerSample { x, y, time_ms }
    }

    fn position<F: Float>(&self) -> Vec2<F> {
        Vec2::new(F::from_f64(self.x), F::from_f64(self.y))
    }
}

/// State carried while the pointer holds the badge.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<F: Float> {
    initial_pointer: Vec2<F>,
    initial_badge: Vec2<F>,
    prev_position: Vec2<F>,
    last_sample_ms: f64,
    velocity: Vec2<F>,
}

/// Hand-off from a finished drag to the free spring.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Release<F: Float> {
    pub velocity: Vec2<F>,
}

impl<F: Float> DragSession<F> {
    /// Grab the badge at `badge` with the pointer at `pointer`.
    pub fn begin(pointer: PointerSample, badge: Vec2<F>) -> Self {
        DragSession {
            initial_pointer: pointer.position(),
            initial_badge: badge,
            prev_position: badge,
            last_sample_ms: pointer.time_ms,
            velocity: Vec2::zero(),
        }
    }

    /// Follow the pointer. Returns the new badge position.
    ///
    /// The velocity estimate is `dpos / dt * frame_ms`, in px per
    /// nominal frame. Samples with no elapsed time move the badge but leave
    /// the estimate and its reference sample untouched.
    pub fn track(&mut self, pointer: PointerSample, frame_ms: f64) -> Vec2<F> {
        let new_position = self.initial_badge + (pointer.position() - self.initial_pointer);
        let dt = pointer.time_ms - self.last_sample_ms;
        if dt > 0.0 {
            let per_frame = F::from_f64(frame_ms / dt);
            self.velocity = (new_position - self.prev_position).scale(per_frame);
            self.prev_position = new_position;
            self.last_sample_ms = pointer.time_ms;
        }
        new_position
    }

    pub fn velocity(&self) -> Vec2<F> {
        self.velocity
    }

    /// A frame passed with the badge held: forget any throw velocity.
    pub(crate) fn hold(&mut self) {
        self.velocity = Vec2::zero();
    }

    /// End the drag, scaling the last velocity into the release payload.
    pub fn finish(self, velocity_scale: f64) -> Release<F> {
        Release { velocity: self.velocity.scale(F::from_f64(velocity_scale)) }
    }
}
