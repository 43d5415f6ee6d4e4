//! Benchmarks for the badge simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use lanyard::config::{BallFieldConfig, PendulumConfig, PhysicsConfig};
use lanyard::layout::{AnchorAndRest, Size, Viewport};
use lanyard::random::{self, FixedRandom};
use lanyard::*;

fn bench_pendulum(c: &mut Criterion) {
    c.bench_function("pendulum_1000_frames", |b| {
        b.iter(|| {
            let frame = AnchorAndRest {
                anchor: Vec2::new(1020.0f32, -100.0),
                rest: Vec2::new(1020.0, 225.0),
            };
            let motion = BadgeMotion { position: Vec2::new(1640.0, 225.0), rotation: 15.0, velocity: Vec2::new(-15.0, 0.0) };
            let mut pendulum = Pendulum::new(frame, motion, PendulumConfig::default());
            pendulum.start_clock(0.0);
            for i in 1..=1000 {
                pendulum.step(f64::from(i) * 16.0, &mut NoOpFrameObserver);
            }
            pendulum.position()
        });
    });
}

fn bench_ball_field(c: &mut Criterion) {
    let forcing = BallForcing { rotation_delta: 0.4, velocity: Vec2::new(1.5f32, -0.5) };

    c.bench_function("ball_field_15_balls_60_frames", |b| {
        b.iter(|| {
            let mut rng = random::seeded(7);
            let mut field: BallField<f32> =
                BallField::seed(Size::new(380.0, 500.0), BallFieldConfig::default(), &mut rng);
            for _ in 0..60 {
                field.step(&forcing, &mut rng, &mut NoOpFrameObserver);
            }
            field.snapshot()
        });
    });

    c.bench_function("ball_field_dense_60_frames", |b| {
        let config = BallFieldConfig::default().with_area_per_ball(1_200.0);
        b.iter(|| {
            let mut rng = random::seeded(7);
            let mut field: BallField<f32> = BallField::seed(Size::new(380.0, 500.0), config.clone(), &mut rng);
            for _ in 0..60 {
                field.step(&forcing, &mut rng, &mut NoOpFrameObserver);
            }
            field.snapshot()
        });
    });
}

fn bench_scene(c: &mut Criterion) {
    c.bench_function("scene_desktop_120_frames", |b| {
        b.iter(|| {
            let mut scene: BadgeScene<f32, FixedRandom> =
                BadgeScene::new(PhysicsConfig::default(), FixedRandom::disabled(), FrameScheduler::new());
            scene.mount(0.0, Viewport::new(1440.0, Some(Size::new(1440.0, 900.0))));
            for i in 1..=120 {
                scene.frame(f64::from(i) * 16.0, &mut NoOpFrameObserver);
            }
            scene.snapshot()
        });
    });
}

criterion_group!(benches, bench_pendulum, bench_ball_field, bench_scene);
criterion_main!(benches);
