//! Glass balls floating inside the badge.

use serde::Serialize;

use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// A soft circular body in badge-local coordinates (origin top-left, px).
///
/// Velocity is in px per frame. The radius is fixed at creation and has no
/// setter.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Ball<F: Float> {
    pub pos: Vec2<F>,
    pub vel: Vec2<F>,
    radius: F,
    deformation: F,
}

impl<F: Float> Ball<F> {
    pub fn new(pos: Vec2<F>, vel: Vec2<F>, radius: F) -> Self {
        Ball { pos, vel, radius, deformation: F::zero() }
    }

    pub fn at_rest(pos: Vec2<F>, radius: F) -> Self {
        Self::new(pos, Vec2::zero(), radius)
    }

    pub fn radius(&self) -> F {
        self.radius
    }

    /// Squash/stretch magnitude derived from the last frame's speed.
    pub fn deformation(&self) -> F {
        self.deformation
    }

    /// Horizontal and vertical render scale, `(1 + d, 1 - d)`.
    pub fn render_scale(&self) -> (F, F) {
        (F::one() + self.deformation, F::one() - self.deformation)
    }

    pub fn speed(&self) -> F {
        self.vel.length()
    }

    /// Wall clearance: the centre never gets closer than this to an edge.
    pub fn margin(&self, margin_factor: F) -> F {
        self.radius * margin_factor
    }

    pub(crate) fn set_deformation(&mut self, deformation: F) {
        self.deformation = deformation;
    }
}
