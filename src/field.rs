//! The ball field: per-frame forces, integration, walls and ball contacts.
//!
//! This is a look-driven simulation, not an accurate one. Pairwise contacts
//! push both balls apart with the same boosted impulse regardless of size and
//! add jitter, so momentum is not conserved and the field never settles.
//!
//! Per ball, per frame, in this order:
//! 1. tilt coupling, `vx += rotation_delta * 0.3`
//! 2. gravity, `vy += 0.03`
//! 3. buoyancy, 10% of frames `vy -= 0.05 + r * 0.10`
//! 4. badge motion coupling, `v += badge_velocity * 0.15`
//! 5. integrate position
//! 6. deformation from speed, capped
//! 7. damping, `v *= 0.995`
//! 8. walls (floor, ceiling, left, right)
//! 9. contacts against every later ball
//! 10. random kick, 2% of frames

use crate::ball::Ball;
use crate::config::BallFieldConfig;
use crate::float::Float;
use crate::layout::Size;
use crate::observer::FrameObserver;
use crate::pendulum::BadgeMotion;
use crate::random::RandomSource;
use crate::vec::{Vec, Vec2};

use std::vec::Vec as StdVec;

/// Badge motion as seen by the balls for one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BallForcing<F: Float> {
    /// Rotation change since the previous ball frame.
    pub rotation_delta: F,
    /// Badge velocity, already scaled for the field.
    pub velocity: Vec2<F>,
}

impl<F: Float> BallForcing<F> {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Number of balls for a container: one per `area_per_ball` px^2, rounded down.
pub fn ball_count(size: Size, area_per_ball: f64) -> usize {
    if !size.is_laid_out() || !(area_per_ball > 0.0) {
        return 0;
    }
    libm::floor(size.width * size.height / area_per_ball) as usize
}

/// Scatter balls over the container with a small random drift.
pub fn seed_balls<F: Float, R: RandomSource>(
    size: Size,
    config: &BallFieldConfig,
    rng: &mut R,
) -> StdVec<Ball<F>> {
    let count = ball_count(size, config.area_per_ball);
    let mut balls = StdVec::with_capacity(count);
    for _ in 0..count {
        let x = rng.next_unit() * size.width;
        let y = rng.next_unit() * size.height;
        let vx = rng.centered(config.initial_speed_span);
        let vy = rng.centered(config.initial_speed_span) - config.initial_upward_bias;
        let radius = config.radius_min + rng.next_unit() * config.radius_span;
        balls.push(Ball::new(
            Vec2::new(F::from_f64(x), F::from_f64(y)),
            Vec2::new(F::from_f64(vx), F::from_f64(vy)),
            F::from_f64(radius),
        ));
    }
    balls
}

/// Advance `balls` one frame in place.
pub fn step_balls<F: Float, R: RandomSource>(
    balls: &mut [Ball<F>],
    forcing: &BallForcing<F>,
    size: Size,
    config: &BallFieldConfig,
    rng: &mut R,
) {
    let c = F::from_f64;
    let width = c(size.width);
    let height = c(size.height);

    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let ball = &mut head[i];

        ball.vel.x = ball.vel.x + forcing.rotation_delta * c(config.tilt_coupling);
        ball.vel.y = ball.vel.y + c(config.gravity);

        if rng.chance(config.buoyancy_chance) {
            let lift = config.buoyancy_min + rng.next_unit() * config.buoyancy_span;
            ball.vel.y = ball.vel.y - c(lift);
        }

        ball.vel = ball.vel + forcing.velocity.scale(c(config.motion_coupling));
        ball.pos = ball.pos + ball.vel;

        let speed = ball.vel.manhattan().min(c(config.deformation_speed_cap));
        ball.set_deformation(speed * c(config.deformation_scale));

        ball.vel = ball.vel.scale(c(config.velocity_damping));

        let margin = ball.margin(c(config.margin_factor));
        let floor = height - margin.max(c(config.floor_inset));
        let restitution = c(config.restitution);
        let mut wall_jitter = || c(rng.centered(config.wall_jitter));

        if ball.pos.y > floor {
            ball.pos.y = floor;
            ball.vel.y = -ball.vel.y.abs() * restitution;
            ball.vel.x = ball.vel.x + wall_jitter();
        }
        if ball.pos.y < margin {
            ball.pos.y = margin;
            ball.vel.y = -ball.vel.y * restitution;
            ball.vel.x = ball.vel.x + wall_jitter();
        }
        if ball.pos.x < margin {
            ball.pos.x = margin;
            ball.vel.x = -ball.vel.x * restitution;
            ball.vel.y = ball.vel.y + wall_jitter();
        }
        if ball.pos.x > width - margin {
            ball.pos.x = width - margin;
            ball.vel.x = -ball.vel.x * restitution;
            ball.vel.y = ball.vel.y + wall_jitter();
        }

        let push = c(config.collision_correction);
        let boost = c(config.energy_boost);
        for other in tail.iter_mut() {
            let d = other.pos - ball.pos;
            let distance = d.length();
            let min_distance = ball.radius() + other.radius();
            if distance < min_distance {
                let angle = F::atan2(d.y, d.x);
                let target = ball.pos + Vec2::new(angle.cos(), angle.sin()).scale(min_distance);
                let impulse = (target - other.pos).scale(push * boost);

                ball.vel = ball.vel - impulse;
                other.vel = other.vel + impulse;

                let mut jitter = || c(rng.centered(config.collision_jitter));
                ball.vel.x = ball.vel.x + jitter();
                ball.vel.y = ball.vel.y + jitter();
                other.vel.x = other.vel.x + jitter();
                other.vel.y = other.vel.y + jitter();
            }
        }

        if rng.chance(config.impulse_chance) {
            let kick_x = rng.centered(config.impulse_strength);
            let kick_y = rng.centered(config.impulse_strength) - config.impulse_upward_bias;
            ball.vel = ball.vel + Vec2::new(c(kick_x), c(kick_y));
        }
    }
}

/// Pure form of [`step_balls`]: returns the next frame as a new array.
pub fn advance<F: Float, R: RandomSource>(
    balls: &[Ball<F>],
    forcing: &BallForcing<F>,
    size: Size,
    config: &BallFieldConfig,
    rng: &mut R,
) -> StdVec<Ball<F>> {
    let mut next = balls.to_vec();
    step_balls(&mut next, forcing, size, config, rng);
    next
}

/// Owns the balls of one badge for its whole lifetime.
///
/// The set is seeded once from the measured container and never grows,
/// shrinks or reseeds.
#[derive(Clone, Debug)]
pub struct BallField<F: Float> {
    balls: StdVec<Ball<F>>,
    size: Size,
    config: BallFieldConfig,
}

impl<F: Float> BallField<F> {
    pub fn seed<R: RandomSource>(size: Size, config: BallFieldConfig, rng: &mut R) -> Self {
        let balls = seed_balls(size, &config, rng);
        log::debug!("seeded {} balls in {}x{}", balls.len(), size.width, size.height);
        BallField { balls, size, config }
    }

    pub fn step<R: RandomSource, O: FrameObserver<F>>(
        &mut self,
        forcing: &BallForcing<F>,
        rng: &mut R,
        observer: &mut O,
    ) {
        step_balls(&mut self.balls, forcing, self.size, &self.config, rng);
        observer.on_balls(&self.balls);
    }

    pub fn balls(&self) -> &[Ball<F>] {
        &self.balls
    }

    /// Copy of the current frame. Each call yields a fresh array, so a
    /// consumer may keep it while the field moves on.
    pub fn snapshot(&self) -> StdVec<Ball<F>> {
        self.balls.clone()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Kick every ball, e.g. from page scroll.
    pub(crate) fn for_each_ball(&mut self, mut kick: impl FnMut(&mut Ball<F>)) {
        for ball in self.balls.iter_mut() {
            kick(ball);
        }
    }
}

/// Turns the badge motion into per-frame forcing for the ball field.
///
/// Rotation delta and velocity are measured between consecutive ball frames,
/// so the field always sees the motion as of the previous pendulum frame.
#[derive(Clone, Debug)]
pub struct MotionSampler<F: Float> {
    last_rotation: F,
    last_position: Option<(Vec2<F>, f64)>,
    velocity_scale: f64,
}

impl<F: Float> MotionSampler<F> {
    pub fn new(velocity_scale: f64) -> Self {
        MotionSampler { last_rotation: F::zero(), last_position: None, velocity_scale }
    }

    pub fn sample(&mut self, motion: &BadgeMotion<F>, now_ms: f64) -> BallForcing<F> {
        let rotation_delta = motion.rotation - self.last_rotation;
        self.last_rotation = motion.rotation;

        // px/s between samples; zero until two samples exist or if no time passed.
        let velocity = match self.last_position {
            Some((previous, at)) if now_ms > at => {
                (motion.position - previous).scale(F::from_f64(1000.0 / (now_ms - at)))
            }
            _ => Vec2::zero(),
        };
        self.last_position = Some((motion.position, now_ms));

        BallForcing {
            rotation_delta,
            velocity: velocity.scale(F::from_f64(self.velocity_scale)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRandom;

    #[test]
    fn count_rounds_down() {
        assert_eq!(ball_count(Size::new(380.0, 500.0), 12_000.0), 15);
        assert_eq!(ball_count(Size::new(320.0, 440.0), 12_000.0), 11);
        assert_eq!(ball_count(Size::new(0.0, 500.0), 12_000.0), 0);
    }

    #[test]
    fn sampler_measures_rotation_delta_and_velocity() {
        let mut s = MotionSampler::<f64>::new(0.08);
        let mut m = BadgeMotion::at(Vec2::new(0.0, 0.0));
        m.rotation = 2.0;
        let first = s.sample(&m, 0.0);
        assert_eq!(first.rotation_delta, 2.0);
        assert_eq!(first.velocity, Vec2::zero());

        m.position = Vec2::new(10.0, 0.0);
        m.rotation = 3.0;
        let second = s.sample(&m, 20.0);
        assert_eq!(second.rotation_delta, 1.0);
        assert!((second.velocity.x - 500.0 * 0.08).abs() < 1e-9);
    }

    #[test]
    fn seed_applies_upward_bias() {
        let balls: StdVec<Ball<f32>> =
            seed_balls(Size::new(380.0, 500.0), &BallFieldConfig::default(), &mut FixedRandom(0.5));
        assert_eq!(balls.len(), 15);
        for b in &balls {
            assert_eq!(b.pos, Vec2::new(190.0, 250.0));
            assert_eq!(b.vel, Vec2::new(0.0, -0.5));
            assert_eq!(b.radius(), 15.0);
        }
    }
}
