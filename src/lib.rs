//! Hanging conference badge with a springy lanyard and floating glass balls.
//!
//! `lanyard` simulates an interactive badge widget. On desktop the badge
//! hangs from an elastic band and swings on a damped spring; the user can
//! grab it and throw it. On narrow viewports it sits still and page scroll
//! stirs the balls instead. Inside the badge a handful of soft glass balls
//! float, collide and wobble in response to the badge's motion.
//!
//! # Features
//!
//! - **Pendulum**: Frame-rate independent spring with bounce-escalating damping
//! - **Drag and throw**: Pointer velocity carried into the spring on release
//! - **Ball field**: Gravity, buoyancy, tilt coupling, walls and pairwise collisions
//! - **Host agnostic**: Loops run on a pluggable `TickScheduler`; randomness
//!   comes from a pluggable `RandomSource`
//! - **Observable**: Monitor frames via the `FrameObserver` trait
//!
//! # Example
//! ```
//! use lanyard::{BadgeScene, FixedRandom, FrameScheduler, NoOpFrameObserver, PhysicsConfig};
//! use lanyard::layout::{Size, Viewport};
//!
//! let mut scene: BadgeScene<f32, _> =
//!     BadgeScene::new(PhysicsConfig::default(), FixedRandom::disabled(), FrameScheduler::new());
//! scene.mount(0.0, Viewport::new(1440.0, Some(Size::new(1440.0, 900.0))));
//! for i in 1..=60 {
//!     scene.frame(i as f64 * 16.0, &mut NoOpFrameObserver);
//! }
//! assert!(scene.snapshot().motion.is_some());
//! ```

pub mod float;
pub mod vec;
pub mod mode;
pub mod layout;
pub mod drag;
pub mod pendulum;
pub mod ball;
pub mod field;
pub mod scroll;
pub mod schedule;
pub mod random;
pub mod lanyard;
pub mod badge_config;
pub mod observer;
pub mod config;
pub mod error;
pub mod scene;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2};
pub use mode::{ModeDetector, ViewportMode};
pub use drag::{DragSession, PointerSample, Release};
pub use pendulum::{Axis, BadgeMotion, MotionPhase, Pendulum, StepOutcome};
pub use ball::Ball;
pub use field::{BallField, BallForcing, MotionSampler};
pub use scroll::ScrollCoupler;
pub use schedule::{EventKind, FrameScheduler, ListenerSet, TickHandle, TickScheduler, TimerHandle};
pub use random::{FixedRandom, RandomSource, RngSource};
pub use lanyard::Lanyard;
pub use badge_config::{BadgeConfig, BadgeConfigOverrides};
pub use config::PhysicsConfig;
pub use observer::{FrameLog, FrameObserver, NoOpFrameObserver};
pub use error::{LanyardError, Result};
pub use scene::{BadgeFrame, BadgeScene};
