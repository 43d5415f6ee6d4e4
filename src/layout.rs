//! Anchor, rest and spawn placement of the badge.
//!
//! On desktop the badge hangs 300px right of centre, its spring rests a
//! quarter of the way down the container, and it enters flying in from past
//! the right edge of the viewport. On mobile it sits still at a fixed spot.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::float::Float;
use crate::mode::ViewportMode;
use crate::vec::Vec2;

/// Measured size of a laid-out element, in px.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// A zero or negative extent means the element is not laid out yet.
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// What the host reports about the page.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    /// The badge's container; `None` until it has been laid out.
    pub container: Option<Size>,
}

impl Viewport {
    pub fn new(width: f64, container: Option<Size>) -> Self {
        Viewport { width, container }
    }

    fn measured(&self) -> Option<Size> {
        self.container.filter(Size::is_laid_out)
    }
}

/// Fixed pivot of the lanyard and the spring's equilibrium point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchorAndRest<F: Float> {
    pub anchor: Vec2<F>,
    pub rest: Vec2<F>,
}

/// Initial motion state for the desktop entrance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spawn<F: Float> {
    pub position: Vec2<F>,
    pub rotation: F,
    pub velocity: Vec2<F>,
}

/// Result of a successful measurement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Placement<F: Float> {
    Desktop { frame: AnchorAndRest<F>, spawn: Spawn<F> },
    Mobile { position: Vec2<F> },
}

impl<F: Float> Placement<F> {
    pub fn mode(&self) -> ViewportMode {
        match self {
            Placement::Desktop { .. } => ViewportMode::Desktop,
            Placement::Mobile { .. } => ViewportMode::Mobile,
        }
    }
}

/// Compute the placement for a measured container.
pub fn place<F: Float>(
    mode: ViewportMode,
    viewport_width: f64,
    container: Size,
    config: &LayoutConfig,
) -> Placement<F> {
    let f = F::from_f64;
    match mode {
        ViewportMode::Mobile => Placement::Mobile {
            position: Vec2::new(
                f(container.width * config.mobile_x_ratio),
                f(container.height * config.mobile_y_ratio),
            ),
        },
        ViewportMode::Desktop => {
            let badge_x = container.width * 0.5 + config.badge_offset_x;
            let rest_y = container.height * config.rest_height_ratio;
            Placement::Desktop {
                frame: AnchorAndRest {
                    anchor: Vec2::new(f(badge_x), f(config.anchor_y)),
                    rest: Vec2::new(f(badge_x), f(rest_y)),
                },
                spawn: Spawn {
                    position: Vec2::new(f(viewport_width + config.spawn_offset_x), f(rest_y)),
                    rotation: f(config.spawn_rotation),
                    velocity: Vec2::new(f(config.spawn_velocity_x), F::zero()),
                },
            }
        }
    }
}

/// What the caller should do after an initialization attempt.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InitOutcome<F: Float> {
    /// Measurement succeeded; apply the placement.
    Positioned(Placement<F>),
    /// Container not ready; call [`PositionInitializer::retry`] after this many ms.
    RetryAfter(f64),
    /// The retry failed too. The badge stays inert until the next mode change.
    Inert,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum InitState {
    Unmeasured,
    RetryPending,
    GaveUp,
    Positioned,
}

/// Drives first placement (with one delayed retry) and resize updates.
#[derive(Debug, Clone)]
pub struct PositionInitializer {
    config: LayoutConfig,
    mode: ViewportMode,
    state: InitState,
}

impl PositionInitializer {
    pub fn new(config: LayoutConfig, mode: ViewportMode) -> Self {
        PositionInitializer { config, mode, state: InitState::Unmeasured }
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn is_positioned(&self) -> bool {
        self.state == InitState::Positioned
    }

    pub fn retry_pending(&self) -> bool {
        self.state == InitState::RetryPending
    }

    /// First attempt after mount or after a mode change.
    pub fn initialize<F: Float>(&mut self, viewport: &Viewport) -> InitOutcome<F> {
        match viewport.measured() {
            Some(size) => self.positioned(viewport.width, size),
            None => {
                log::debug!(
                    "container not measured; retrying in {}ms",
                    self.config.retry_delay_ms
                );
                self.state = InitState::RetryPending;
                InitOutcome::RetryAfter(self.config.retry_delay_ms)
            }
        }
    }

    /// The single delayed retry. Any further failure leaves the badge inert.
    pub fn retry<F: Float>(&mut self, viewport: &Viewport) -> InitOutcome<F> {
        if self.state != InitState::RetryPending {
            return InitOutcome::Inert;
        }
        match viewport.measured() {
            Some(size) => self.positioned(viewport.width, size),
            None => {
                log::warn!("badge container still not laid out; simulation stays inert");
                self.state = InitState::GaveUp;
                InitOutcome::Inert
            }
        }
    }

    /// Recompute placement after a resize in the same mode.
    ///
    /// Returns `None` when not yet positioned or the container has no size.
    /// The caller must keep the badge's current position on desktop so an
    /// in-flight swing is not interrupted.
    pub fn resize<F: Float>(&mut self, viewport: &Viewport) -> Option<Placement<F>> {
        if !self.is_positioned() {
            return None;
        }
        let size = viewport.measured()?;
        Some(place(self.mode, viewport.width, size, &self.config))
    }

    /// Switch mode; the next [`initialize`](Self::initialize) starts over.
    pub fn reset(&mut self, mode: ViewportMode) {
        self.mode = mode;
        self.state = InitState::Unmeasured;
    }

    fn positioned<F: Float>(&mut self, viewport_width: f64, size: Size) -> InitOutcome<F> {
        self.state = InitState::Positioned;
        let placement = place(self.mode, viewport_width, size, &self.config);
        log::debug!("badge positioned for {:?} in {}x{}", self.mode, size.width, size.height);
        InitOutcome::Positioned(placement)
    }
}
