//! Tuning parameters for the badge simulation.
//!
//! Every field has a default matching the shipped feel, so a config file only
//! needs to list what it changes.
//!
//! # Builder Pattern
//! ```
//! use lanyard::config::{PhysicsConfig, PendulumConfig};
//!
//! let config = PhysicsConfig::default()
//!     .with_pendulum(PendulumConfig::default().with_spring_stiffness(0.05));
//! assert_eq!(config.pendulum.spring_stiffness, 0.05);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LanyardError, Result};

/// Spring, damping and rotation constants for the hanging badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumConfig {
    /// Frame length the per-frame constants are tuned for, in ms.
    pub nominal_frame_ms: f64,
    /// Upper bound on the normalized frame delta after a stall.
    pub max_catch_up: f64,
    /// Fraction of the offset from rest added to velocity each nominal frame.
    pub spring_stiffness: f64,
    /// Per-frame velocity retention before any bounce escalation.
    pub base_damping: f64,
    /// Extra damping exponent added per observed velocity reversal.
    pub bounce_escalation: f64,
    /// Pixels of horizontal offset from the anchor per unit of rotation.
    pub rotation_offset_divisor: f64,
    /// Horizontal velocity per unit of rotation.
    pub rotation_velocity_divisor: f64,
    /// Frame length used to convert drag px/ms into px/frame.
    pub drag_velocity_frame_ms: f64,
    /// Multiplier applied to the drag velocity handed to the spring on release.
    pub release_velocity_scale: f64,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            nominal_frame_ms: 16.0,
            max_catch_up: 2.0,
            spring_stiffness: 0.04,
            base_damping: 0.96,
            bounce_escalation: 0.3,
            rotation_offset_divisor: 30.0,
            rotation_velocity_divisor: 8.0,
            drag_velocity_frame_ms: 16.0,
            release_velocity_scale: 1.0,
        }
    }
}

impl PendulumConfig {
    /// Set the spring stiffness (how hard the band pulls back).
    pub fn with_spring_stiffness(mut self, stiffness: f64) -> Self {
        self.spring_stiffness = stiffness;
        self
    }
}

/// Forces, collision response and seeding for the glass balls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallFieldConfig {
    /// Container area (px^2) per seeded ball.
    pub area_per_ball: f64,
    pub radius_min: f64,
    pub radius_span: f64,
    /// Width of the uniform range for initial velocity on each axis.
    pub initial_speed_span: f64,
    pub initial_upward_bias: f64,
    /// Sideways push per unit of badge rotation change.
    pub tilt_coupling: f64,
    pub gravity: f64,
    pub buoyancy_chance: f64,
    pub buoyancy_min: f64,
    pub buoyancy_span: f64,
    /// Fraction of the badge's scaled velocity transferred to each ball.
    pub motion_coupling: f64,
    /// Scale from badge px/s to the forcing velocity.
    pub badge_velocity_scale: f64,
    pub deformation_speed_cap: f64,
    pub deformation_scale: f64,
    pub velocity_damping: f64,
    /// Wall margin as a multiple of the radius.
    pub margin_factor: f64,
    /// Minimum gap between the floor and the container's bottom edge.
    pub floor_inset: f64,
    pub restitution: f64,
    pub wall_jitter: f64,
    pub collision_correction: f64,
    pub energy_boost: f64,
    pub collision_jitter: f64,
    pub impulse_chance: f64,
    pub impulse_strength: f64,
    pub impulse_upward_bias: f64,
}

impl Default for BallFieldConfig {
    fn default() -> Self {
        Self {
            area_per_ball: 12_000.0,
            radius_min: 10.0,
            radius_span: 10.0,
            initial_speed_span: 1.5,
            initial_upward_bias: 0.5,
            tilt_coupling: 0.3,
            gravity: 0.03,
            buoyancy_chance: 0.10,
            buoyancy_min: 0.05,
            buoyancy_span: 0.10,
            motion_coupling: 0.15,
            badge_velocity_scale: 0.08,
            deformation_speed_cap: 5.0,
            deformation_scale: 0.002,
            velocity_damping: 0.995,
            margin_factor: 1.05,
            floor_inset: 10.0,
            restitution: 0.92,
            wall_jitter: 0.5,
            collision_correction: 0.08,
            energy_boost: 1.15,
            collision_jitter: 0.2,
            impulse_chance: 0.02,
            impulse_strength: 1.0,
            impulse_upward_bias: 0.2,
        }
    }
}

impl BallFieldConfig {
    /// Set the container area per ball (smaller = denser field).
    pub fn with_area_per_ball(mut self, area: f64) -> Self {
        self.area_per_ball = area;
        self
    }

    /// Set the per-frame downward pull.
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }
}

/// Width and height pair used for badge dimensions in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Placement of the badge relative to its container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Viewports narrower than this run in mobile mode.
    pub mobile_breakpoint: f64,
    /// Horizontal offset of the badge from the container centre on desktop.
    pub badge_offset_x: f64,
    pub anchor_y: f64,
    pub rest_height_ratio: f64,
    /// Distance past the right viewport edge the badge spawns at.
    pub spawn_offset_x: f64,
    pub spawn_rotation: f64,
    pub spawn_velocity_x: f64,
    pub mobile_x_ratio: f64,
    pub mobile_y_ratio: f64,
    /// Delay before the single measurement retry.
    pub retry_delay_ms: f64,
    pub desktop_badge: Dimensions,
    pub mobile_badge: Dimensions,
    /// Distance from the badge origin up to the lanyard hole.
    pub hole_offset_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 1000.0,
            badge_offset_x: 300.0,
            anchor_y: -100.0,
            rest_height_ratio: 0.25,
            spawn_offset_x: 200.0,
            spawn_rotation: 15.0,
            spawn_velocity_x: -15.0,
            mobile_x_ratio: 0.5,
            mobile_y_ratio: 0.35,
            retry_delay_ms: 10.0,
            desktop_badge: Dimensions { width: 380.0, height: 500.0 },
            mobile_badge: Dimensions { width: 320.0, height: 440.0 },
            hole_offset_y: 40.0,
        }
    }
}

/// Page-scroll coupling used in mobile mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll deltas at or below this many px do not move the balls.
    pub threshold: f64,
    pub velocity_scale: f64,
    pub jitter_scale: f64,
    /// Idle time after which the scroll velocity resets to zero.
    pub reset_delay_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            velocity_scale: 0.2,
            jitter_scale: 0.5,
            reset_delay_ms: 100.0,
        }
    }
}

/// Colour stop on the lanyard tension gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub tension: f64,
    pub rgb: [u8; 3],
}

/// How the band between anchor and badge is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanyardStyle {
    pub color_stops: Vec<ColorStop>,
    pub width_slack: f64,
    pub width_taut: f64,
    /// Tension at which the band reaches `width_taut`.
    pub width_taut_tension: f64,
}

impl Default for LanyardStyle {
    fn default() -> Self {
        Self {
            color_stops: vec![
                ColorStop { tension: 0.0, rgb: [0xff, 0x6b, 0x6b] },
                ColorStop { tension: 300.0, rgb: [0xff, 0x00, 0x00] },
                ColorStop { tension: 600.0, rgb: [0x99, 0x00, 0x00] },
            ],
            width_slack: 9.0,
            width_taut: 8.0,
            width_taut_tension: 600.0,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub pendulum: PendulumConfig,
    pub balls: BallFieldConfig,
    pub layout: LayoutConfig,
    pub scroll: ScrollConfig,
    pub lanyard: LanyardStyle,
}

impl PhysicsConfig {
    /// Replace the pendulum section.
    pub fn with_pendulum(mut self, pendulum: PendulumConfig) -> Self {
        self.pendulum = pendulum;
        self
    }

    /// Replace the ball field section.
    pub fn with_balls(mut self, balls: BallFieldConfig) -> Self {
        self.balls = balls;
        self
    }

    /// Replace the layout section.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the scroll coupling section.
    pub fn with_scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    /// Parse a RON document. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LanyardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    /// Load a file, falling back to defaults. The error is returned for the
    /// caller to report; the simulation keeps running either way.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<LanyardError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => {
                log::warn!("using default physics config: {e}");
                (Self::default(), Some(e))
            }
        }
    }

    /// Merge several RON files, later files overriding keys of earlier ones.
    ///
    /// Unreadable or unparsable layers are skipped and reported. Returns the
    /// merged config and the list of per-layer errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<LanyardError>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;

        fn merge(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(base_map), Value::Map(overlay_map)) => {
                    for (key, value) in overlay_map.into_iter() {
                        let mut incoming = Some(value);
                        for (existing_key, existing) in base_map.iter_mut() {
                            if *existing_key == key {
                                if let Some(value) = incoming.take() {
                                    merge(existing, value);
                                }
                                break;
                            }
                        }
                        if let Some(value) = incoming {
                            base_map.insert(key, value);
                        }
                    }
                }
                (base, overlay) => *base = overlay,
            }
        }

        let mut merged: Option<Value> = None;
        let mut errors = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(source) => {
                    errors.push(LanyardError::Io { path: path.to_path_buf(), source });
                    continue;
                }
            };
            match ron::from_str::<Value>(&text) {
                Ok(layer) => match merged.as_mut() {
                    Some(current) => merge(current, layer),
                    None => merged = Some(layer),
                },
                Err(e) => errors.push(e.into()),
            }
        }

        let config = match merged {
            Some(value) => match value.into_rust::<PhysicsConfig>() {
                Ok(cfg) => cfg,
                Err(e) => {
                    errors.push(e.into());
                    PhysicsConfig::default()
                }
            },
            None => PhysicsConfig::default(),
        };

        for e in &errors {
            log::warn!("physics config layer skipped: {e}");
        }
        (config, errors)
    }

    /// Non-fatal warnings for values that will look wrong or diverge.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        fn unit_interval(w: &mut Vec<String>, label: &str, v: f64) {
            if !(0.0..=1.0).contains(&v) {
                w.push(format!("{label} should be within [0, 1], got {v}"));
            }
        }

        fn positive(w: &mut Vec<String>, label: &str, v: f64) {
            if !(v > 0.0) {
                w.push(format!("{label} should be > 0, got {v}"));
            }
        }

        let p = &self.pendulum;
        positive(&mut warnings, "pendulum.nominal_frame_ms", p.nominal_frame_ms);
        positive(&mut warnings, "pendulum.max_catch_up", p.max_catch_up);
        positive(&mut warnings, "pendulum.rotation_offset_divisor", p.rotation_offset_divisor);
        positive(&mut warnings, "pendulum.rotation_velocity_divisor", p.rotation_velocity_divisor);
        positive(&mut warnings, "pendulum.drag_velocity_frame_ms", p.drag_velocity_frame_ms);
        unit_interval(&mut warnings, "pendulum.base_damping", p.base_damping);
        if p.spring_stiffness < 0.0 {
            warnings.push(format!(
                "pendulum.spring_stiffness is negative ({}); the badge will fly away",
                p.spring_stiffness
            ));
        }
        if p.bounce_escalation < 0.0 {
            warnings.push(format!(
                "pendulum.bounce_escalation is negative ({}); damping would weaken with each bounce",
                p.bounce_escalation
            ));
        }

        let b = &self.balls;
        positive(&mut warnings, "balls.area_per_ball", b.area_per_ball);
        positive(&mut warnings, "balls.radius_min", b.radius_min);
        unit_interval(&mut warnings, "balls.buoyancy_chance", b.buoyancy_chance);
        unit_interval(&mut warnings, "balls.impulse_chance", b.impulse_chance);
        unit_interval(&mut warnings, "balls.velocity_damping", b.velocity_damping);
        unit_interval(&mut warnings, "balls.restitution", b.restitution);
        if b.margin_factor < 1.0 {
            warnings.push(format!(
                "balls.margin_factor {} lets balls overlap the badge edge",
                b.margin_factor
            ));
        }
        if b.radius_span < 0.0 {
            warnings.push(format!("balls.radius_span is negative ({})", b.radius_span));
        }

        let l = &self.layout;
        positive(&mut warnings, "layout.mobile_breakpoint", l.mobile_breakpoint);
        positive(&mut warnings, "layout.desktop_badge.width", l.desktop_badge.width);
        positive(&mut warnings, "layout.desktop_badge.height", l.desktop_badge.height);
        positive(&mut warnings, "layout.mobile_badge.width", l.mobile_badge.width);
        positive(&mut warnings, "layout.mobile_badge.height", l.mobile_badge.height);
        if l.retry_delay_ms < 0.0 {
            warnings.push(format!("layout.retry_delay_ms is negative ({})", l.retry_delay_ms));
        }
        let widest_ball = 2.0 * (b.radius_min + b.radius_span.max(0.0)) * b.margin_factor;
        for (label, dims) in [("desktop", l.desktop_badge), ("mobile", l.mobile_badge)] {
            if dims.width < widest_ball || dims.height < widest_ball {
                warnings.push(format!(
                    "layout.{label}_badge {}x{} is smaller than the largest ball ({widest_ball})",
                    dims.width, dims.height
                ));
            }
        }

        let s = &self.scroll;
        if s.threshold < 0.0 {
            warnings.push(format!("scroll.threshold is negative ({})", s.threshold));
        }
        if s.reset_delay_ms < 0.0 {
            warnings.push(format!("scroll.reset_delay_ms is negative ({})", s.reset_delay_ms));
        }

        let stops = &self.lanyard.color_stops;
        if stops.is_empty() {
            warnings.push("lanyard.color_stops is empty".to_string());
        }
        if stops.windows(2).any(|w| w[1].tension <= w[0].tension) {
            warnings.push("lanyard.color_stops must have strictly increasing tension".to_string());
        }
        positive(&mut warnings, "lanyard.width_taut_tension", self.lanyard.width_taut_tension);

        warnings
    }

    /// Like [`validate`](Self::validate), but rejects values that would make
    /// the simulation divide by zero or blow up.
    pub fn validate_strict(&self) -> Result<()> {
        let checks: [(&'static str, f64); 5] = [
            ("pendulum.nominal_frame_ms", self.pendulum.nominal_frame_ms),
            ("pendulum.rotation_offset_divisor", self.pendulum.rotation_offset_divisor),
            ("pendulum.rotation_velocity_divisor", self.pendulum.rotation_velocity_divisor),
            ("pendulum.drag_velocity_frame_ms", self.pendulum.drag_velocity_frame_ms),
            ("balls.area_per_ball", self.balls.area_per_ball),
        ];
        for (field, value) in checks {
            if !(value > 0.0) || !value.is_finite() {
                return Err(LanyardError::InvalidConfig {
                    field,
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.pendulum.base_damping) {
            return Err(LanyardError::InvalidConfig {
                field: "pendulum.base_damping",
                reason: format!("must be within [0, 1], got {}", self.pendulum.base_damping),
            });
        }
        Ok(())
    }
}
