//! Page scroll as an impulse on the ball field (mobile only).

use crate::config::ScrollConfig;
use crate::field::BallField;
use crate::float::Float;
use crate::random::RandomSource;
use crate::schedule::{TickScheduler, TimerHandle};

/// Converts scroll deltas into ball velocity.
///
/// Owns a debounce timer that zeroes the scroll velocity once scrolling stops.
#[derive(Debug)]
pub struct ScrollCoupler {
    config: ScrollConfig,
    last_scroll_y: f64,
    velocity: f64,
    reset_timer: Option<TimerHandle>,
}

impl ScrollCoupler {
    pub fn new(config: ScrollConfig, initial_scroll_y: f64) -> Self {
        ScrollCoupler { config, last_scroll_y: initial_scroll_y, velocity: 0.0, reset_timer: None }
    }

    /// Current scroll velocity in px per frame of ball motion.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Handle one scroll event. Returns true if the balls were kicked.
    pub fn on_scroll<F, R, S>(
        &mut self,
        now_ms: f64,
        scroll_y: f64,
        field: Option<&mut BallField<F>>,
        rng: &mut R,
        scheduler: &mut S,
    ) -> bool
    where
        F: Float,
        R: RandomSource,
        S: TickScheduler,
    {
        let delta = scroll_y - self.last_scroll_y;
        self.velocity = delta * self.config.velocity_scale;

        let mut kicked = false;
        if let Some(field) = field {
            if !field.is_empty() && delta.abs() > self.config.threshold {
                log::debug!("scroll delta={delta:.2}, kicking balls by {:.2}", self.velocity);
                let vy = F::from_f64(self.velocity);
                let spread = self.velocity.abs() * self.config.jitter_scale;
                field.for_each_ball(|ball| {
                    ball.vel.y = ball.vel.y + vy;
                    ball.vel.x = ball.vel.x + F::from_f64(rng.centered(spread));
                });
                kicked = true;
            }
        }

        self.last_scroll_y = scroll_y;

        if let Some(timer) = self.reset_timer.take() {
            scheduler.clear_timeout(timer);
        }
        self.reset_timer = Some(scheduler.set_timeout(now_ms, self.config.reset_delay_ms));
        kicked
    }

    /// Called by the owner when a timer fires. Returns true if it was ours.
    pub fn on_timer(&mut self, timer: TimerHandle) -> bool {
        if self.reset_timer != Some(timer) {
            return false;
        }
        self.reset_timer = None;
        self.velocity = 0.0;
        true
    }

    /// Drop any pending reset timer.
    pub fn detach<S: TickScheduler>(&mut self, scheduler: &mut S) {
        if let Some(timer) = self.reset_timer.take() {
            scheduler.clear_timeout(timer);
        }
        self.velocity = 0.0;
    }
}
