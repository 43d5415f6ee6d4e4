//! One badge on one page: wiring between layout, pendulum, drag, balls and scroll.
//!
//! The host forwards its events (`mount`, `resize`, pointer, `scroll`,
//! `unmount`) and calls [`BadgeScene::frame`] once per repaint. Everything
//! else happens in here:
//!
//! - mode detection decides between the hanging pendulum (desktop) and a
//!   static badge with scroll coupling (mobile);
//! - placement waits for the container to be measured, retrying once;
//! - two independent loops run on the scheduler, the ball field first so it
//!   reads the badge motion from the previous frame, then the pendulum;
//! - drag listeners exist only between pointer-down and release.
//!
//! After [`unmount`](BadgeScene::unmount) nothing is subscribed, no timer is
//! pending and no listener is registered, so a late `frame` does nothing.

use rand::rngs::StdRng;

use crate::ball::Ball;
use crate::config::{Dimensions, PhysicsConfig};
use crate::drag::{PointerSample, Release};
use crate::field::{BallField, BallForcing, MotionSampler};
use crate::float::Float;
use crate::lanyard::Lanyard;
use crate::layout::{InitOutcome, Placement, PositionInitializer, Size, Viewport};
use crate::mode::{ModeDetector, ViewportMode};
use crate::observer::FrameObserver;
use crate::pendulum::{BadgeMotion, Pendulum};
use crate::random::{self, RandomSource, RngSource};
use crate::schedule::{EventKind, FrameScheduler, ListenerSet, TickHandle, TickScheduler, TimerHandle};
use crate::scroll::ScrollCoupler;

const DRAG_EVENTS: [EventKind; 3] =
    [EventKind::PointerMove, EventKind::PointerUp, EventKind::PointerLeave];

#[derive(Clone, Debug)]
enum Body<F: Float> {
    Hanging(Pendulum<F>),
    Static(BadgeMotion<F>),
}

impl<F: Float> Body<F> {
    fn motion(&self) -> BadgeMotion<F> {
        match self {
            Body::Hanging(p) => *p.motion(),
            Body::Static(m) => *m,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeFrame<F: Float> {
    pub mode: Option<ViewportMode>,
    /// `None` until the badge has been placed; render nothing in that case.
    pub motion: Option<BadgeMotion<F>>,
    pub dragging: bool,
    /// Desktop only.
    pub lanyard: Option<Lanyard<F>>,
    pub balls: Vec<Ball<F>>,
}

/// A mounted (or mountable) badge.
pub struct BadgeScene<F: Float, R: RandomSource, S: TickScheduler = FrameScheduler> {
    config: PhysicsConfig,
    rng: R,
    scheduler: S,
    listeners: ListenerSet,
    modes: ModeDetector,
    initializer: Option<PositionInitializer>,
    viewport: Option<Viewport>,
    body: Option<Body<F>>,
    field: Option<BallField<F>>,
    sampler: MotionSampler<F>,
    scroll: Option<ScrollCoupler>,
    pendulum_tick: Option<TickHandle>,
    ball_tick: Option<TickHandle>,
    retry_timer: Option<TimerHandle>,
}

impl<F: Float> BadgeScene<F, RngSource<StdRng>, FrameScheduler> {
    /// Scene with OS-seeded randomness and the in-memory scheduler.
    pub fn from_entropy(config: PhysicsConfig) -> Self {
        Self::new(config, random::from_entropy(), FrameScheduler::new())
    }
}

impl<F: Float, R: RandomSource, S: TickScheduler> BadgeScene<F, R, S> {
    pub fn new(config: PhysicsConfig, rng: R, scheduler: S) -> Self {
        for warning in config.validate() {
            log::warn!("physics config: {warning}");
        }
        let modes = ModeDetector::new(config.layout.mobile_breakpoint);
        let sampler = MotionSampler::new(config.balls.badge_velocity_scale);
        BadgeScene {
            config,
            rng,
            scheduler,
            listeners: ListenerSet::new(),
            modes,
            initializer: None,
            viewport: None,
            body: None,
            field: None,
            sampler,
            scroll: None,
            pendulum_tick: None,
            ball_tick: None,
            retry_timer: None,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    pub fn is_mounted(&self) -> bool {
        self.initializer.is_some()
    }

    pub fn mode(&self) -> Option<ViewportMode> {
        self.modes.current()
    }

    pub fn is_positioned(&self) -> bool {
        self.initializer.as_ref().is_some_and(PositionInitializer::is_positioned)
    }

    /// Current badge motion, once placed.
    pub fn motion(&self) -> Option<BadgeMotion<F>> {
        self.body.as_ref().map(Body::motion)
    }

    /// The spring, when the badge is hanging (desktop and placed).
    pub fn pendulum(&self) -> Option<&Pendulum<F>> {
        match &self.body {
            Some(Body::Hanging(p)) => Some(p),
            _ => None,
        }
    }

    pub fn field(&self) -> Option<&BallField<F>> {
        self.field.as_ref()
    }

    pub fn scroll_velocity(&self) -> f64 {
        self.scroll.as_ref().map_or(0.0, ScrollCoupler::velocity)
    }

    pub fn mount(&mut self, now_ms: f64, viewport: Viewport) {
        if self.is_mounted() {
            return;
        }
        self.viewport = Some(viewport);
        self.listeners.add(EventKind::Resize);
        let mode = self
            .modes
            .update(viewport.width)
            .unwrap_or_else(|| crate::mode::detect_mode(viewport.width, self.config.layout.mobile_breakpoint));
        log::debug!("mounting badge in {mode:?} mode");
        self.initializer = Some(PositionInitializer::new(self.config.layout.clone(), mode));
        self.enter_mode(now_ms, mode);
    }

    pub fn resize(&mut self, now_ms: f64, viewport: Viewport) {
        if !self.listeners.contains(EventKind::Resize) {
            return;
        }
        self.viewport = Some(viewport);
        if let Some(mode) = self.modes.update(viewport.width) {
            self.change_mode(now_ms, mode);
            return;
        }
        let placement = match self.initializer.as_mut() {
            Some(init) => init.resize::<F>(&viewport),
            None => None,
        };
        match (placement, self.body.as_mut()) {
            (Some(Placement::Desktop { frame, .. }), Some(Body::Hanging(pendulum))) => {
                pendulum.set_frame(frame);
            }
            (Some(Placement::Mobile { position }), Some(Body::Static(motion))) => {
                motion.position = position;
            }
            _ => {}
        }
    }

    /// Grab the badge. Desktop only, after placement.
    pub fn pointer_down(&mut self, sample: PointerSample) -> bool {
        let grabbed = match self.body.as_mut() {
            Some(Body::Hanging(pendulum)) => pendulum.begin_drag(sample),
            _ => false,
        };
        if grabbed {
            for kind in DRAG_EVENTS {
                self.listeners.add(kind);
            }
        }
        grabbed
    }

    pub fn pointer_move(&mut self, sample: PointerSample) {
        if !self.listeners.contains(EventKind::PointerMove) {
            return;
        }
        if let Some(Body::Hanging(pendulum)) = self.body.as_mut() {
            pendulum.drag_to(sample);
        }
    }

    pub fn pointer_up(&mut self, _sample: PointerSample) -> Option<Release<F>> {
        if !self.listeners.contains(EventKind::PointerUp) {
            return None;
        }
        self.end_drag()
    }

    /// The pointer left the window mid-drag; treated as a release.
    pub fn pointer_leave(&mut self, _sample: PointerSample) -> Option<Release<F>> {
        if !self.listeners.contains(EventKind::PointerLeave) {
            return None;
        }
        self.end_drag()
    }

    /// Page scroll (mobile). Returns true if the balls were kicked.
    pub fn scroll(&mut self, now_ms: f64, scroll_y: f64) -> bool {
        if !self.listeners.contains(EventKind::Scroll) {
            return false;
        }
        match self.scroll.as_mut() {
            Some(coupler) => coupler.on_scroll(
                now_ms,
                scroll_y,
                self.field.as_mut(),
                &mut self.rng,
                &mut self.scheduler,
            ),
            None => false,
        }
    }

    /// Run everything due at `now_ms`: timers, then the ball loop, then the
    /// pendulum loop. Loops whose handle is no longer subscribed are skipped.
    pub fn frame<O: FrameObserver<F>>(&mut self, now_ms: f64, observer: &mut O) {
        for timer in self.scheduler.take_expired(now_ms) {
            if self.retry_timer == Some(timer) {
                self.retry_timer = None;
                self.retry_placement(now_ms);
            } else if let Some(coupler) = self.scroll.as_mut() {
                coupler.on_timer(timer);
            }
        }

        if self.is_live(self.ball_tick) {
            let forcing = match self.body.as_ref() {
                Some(body) => self.sampler.sample(&body.motion(), now_ms),
                None => BallForcing::none(),
            };
            if let Some(field) = self.field.as_mut() {
                field.step(&forcing, &mut self.rng, observer);
            }
        }

        if self.is_live(self.pendulum_tick) {
            if let Some(Body::Hanging(pendulum)) = self.body.as_mut() {
                pendulum.step(now_ms, observer);
            }
        }

        observer.on_frame_complete(now_ms);
    }

    /// Tear down: cancel both loops, pending timers and every listener.
    pub fn unmount(&mut self) {
        log::debug!("unmounting badge");
        self.cancel_tick(TickSlot::Pendulum);
        self.cancel_tick(TickSlot::Balls);
        if let Some(timer) = self.retry_timer.take() {
            self.scheduler.clear_timeout(timer);
        }
        if let Some(mut coupler) = self.scroll.take() {
            coupler.detach(&mut self.scheduler);
        }
        self.listeners.clear();
        self.body = None;
        self.field = None;
        self.sampler = MotionSampler::new(self.config.balls.badge_velocity_scale);
        self.initializer = None;
        self.viewport = None;
    }

    /// Copy of the state a renderer needs. Each call returns fresh data.
    pub fn snapshot(&self) -> BadgeFrame<F> {
        let motion = self.motion();
        let lanyard = match (&self.body, motion) {
            (Some(Body::Hanging(pendulum)), Some(m)) => Some(Lanyard::new(
                pendulum.frame().anchor,
                m.position,
                self.config.layout.hole_offset_y,
                &self.config.lanyard,
            )),
            _ => None,
        };
        BadgeFrame {
            mode: self.mode(),
            motion,
            dragging: self.pendulum().is_some_and(Pendulum::is_dragging),
            lanyard,
            balls: self.field.as_ref().map(BallField::snapshot).unwrap_or_default(),
        }
    }

    fn is_live(&self, handle: Option<TickHandle>) -> bool {
        handle.is_some_and(|h| self.scheduler.is_subscribed(h))
    }

    fn enter_mode(&mut self, now_ms: f64, mode: ViewportMode) {
        let viewport = match self.viewport {
            Some(v) => v,
            None => return,
        };
        let outcome = match self.initializer.as_mut() {
            Some(init) => init.initialize::<F>(&viewport),
            None => return,
        };
        self.apply_outcome(now_ms, outcome);

        if mode.is_mobile() {
            self.scroll = Some(ScrollCoupler::new(self.config.scroll.clone(), 0.0));
            self.listeners.add(EventKind::Scroll);
        }
    }

    fn change_mode(&mut self, now_ms: f64, mode: ViewportMode) {
        log::debug!("switching to {mode:?} mode");
        self.end_drag();
        self.cancel_tick(TickSlot::Pendulum);
        if let Some(timer) = self.retry_timer.take() {
            self.scheduler.clear_timeout(timer);
        }
        if let Some(mut coupler) = self.scroll.take() {
            coupler.detach(&mut self.scheduler);
        }
        self.listeners.remove(EventKind::Scroll);
        self.body = None;
        self.sampler = MotionSampler::new(self.config.balls.badge_velocity_scale);
        if let Some(init) = self.initializer.as_mut() {
            init.reset(mode);
        }
        self.enter_mode(now_ms, mode);
    }

    fn retry_placement(&mut self, now_ms: f64) {
        let viewport = match self.viewport {
            Some(v) => v,
            None => return,
        };
        let outcome = match self.initializer.as_mut() {
            Some(init) => init.retry::<F>(&viewport),
            None => return,
        };
        self.apply_outcome(now_ms, outcome);
    }

    fn apply_outcome(&mut self, now_ms: f64, outcome: InitOutcome<F>) {
        match outcome {
            InitOutcome::Positioned(placement) => self.apply_placement(now_ms, placement),
            InitOutcome::RetryAfter(delay_ms) => {
                self.retry_timer = Some(self.scheduler.set_timeout(now_ms, delay_ms));
            }
            InitOutcome::Inert => {}
        }
    }

    fn apply_placement(&mut self, now_ms: f64, placement: Placement<F>) {
        let mode = placement.mode();
        match placement {
            Placement::Desktop { frame, spawn } => {
                let mut pendulum = Pendulum::new(frame, spawn.into(), self.config.pendulum.clone());
                pendulum.start_clock(now_ms);
                self.body = Some(Body::Hanging(pendulum));
                if self.pendulum_tick.is_none() {
                    self.pendulum_tick = Some(self.scheduler.subscribe());
                    log::debug!("pendulum loop subscribed");
                }
            }
            Placement::Mobile { position } => {
                self.cancel_tick(TickSlot::Pendulum);
                self.body = Some(Body::Static(BadgeMotion::at(position)));
            }
        }

        if self.field.is_none() {
            let Dimensions { width, height } = match mode {
                ViewportMode::Desktop => self.config.layout.desktop_badge,
                ViewportMode::Mobile => self.config.layout.mobile_badge,
            };
            self.field = Some(BallField::seed(
                Size::new(width, height),
                self.config.balls.clone(),
                &mut self.rng,
            ));
        }
        if self.ball_tick.is_none() {
            self.ball_tick = Some(self.scheduler.subscribe());
            log::debug!("ball loop subscribed");
        }
    }

    fn end_drag(&mut self) -> Option<Release<F>> {
        for kind in DRAG_EVENTS {
            self.listeners.remove(kind);
        }
        match self.body.as_mut() {
            Some(Body::Hanging(pendulum)) => pendulum.release(),
            _ => None,
        }
    }

    fn cancel_tick(&mut self, slot: TickSlot) {
        let handle = match slot {
            TickSlot::Pendulum => self.pendulum_tick.take(),
            TickSlot::Balls => self.ball_tick.take(),
        };
        if let Some(handle) = handle {
            self.scheduler.unsubscribe(handle);
            log::debug!("{slot:?} loop cancelled");
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum TickSlot {
    Pendulum,
    Balls,
}
