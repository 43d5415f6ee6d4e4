use lanyard::config::PendulumConfig;
use lanyard::layout::AnchorAndRest;
use lanyard::{Axis, BadgeMotion, NoOpFrameObserver, Pendulum, StepOutcome, Vec2};

const FRAME_MS: f64 = 16.0;

fn hanging_at(rest: Vec2<f64>, start: Vec2<f64>) -> Pendulum<f64> {
    let frame = AnchorAndRest { anchor: Vec2::new(rest.x, -100.0), rest };
    let mut p = Pendulum::new(frame, BadgeMotion::at(start), PendulumConfig::default());
    p.start_clock(0.0);
    p
}

fn run(p: &mut Pendulum<f64>, from_frame: u32, frames: u32) {
    for i in from_frame..from_frame + frames {
        p.step(f64::from(i) * FRAME_MS, &mut NoOpFrameObserver);
    }
}

#[test]
fn first_frame_matches_hand_computed_values() {
    let frame = AnchorAndRest { anchor: Vec2::new(0.0, 0.0), rest: Vec2::new(0.0, 100.0) };
    let mut p = Pendulum::new(frame, BadgeMotion::at(Vec2::new(30.0f64, 100.0)), PendulumConfig::default());
    p.start_clock(0.0);

    assert_eq!(p.step(16.0, &mut NoOpFrameObserver), StepOutcome::Integrated);

    let k = 0.04;
    let d = 0.96;
    let vx = -30.0 * k * d;
    assert!((p.velocity().x - vx).abs() < 1e-9);
    assert_eq!(p.velocity().y, 0.0);
    assert!((p.position().x - (30.0 + vx)).abs() < 1e-9);
    // Rotation reads the offset before this frame's move.
    let rotation = 30.0 / 30.0 + vx / 8.0;
    assert!((p.rotation() - rotation).abs() < 1e-9);
}

#[test]
fn settles_at_rest() {
    let rest = Vec2::new(400.0, 225.0);
    let mut p = hanging_at(rest, Vec2::new(600.0, 225.0));
    run(&mut p, 1, 900);
    assert!((p.position().x - rest.x).abs() < 0.01, "x = {}", p.position().x);
    assert!((p.position().y - rest.y).abs() < 0.01, "y = {}", p.position().y);
    assert!(p.velocity().x.abs() < 0.01);
}

#[test]
fn bounce_count_and_damping_are_monotonic() {
    let mut p = hanging_at(Vec2::new(0.0, 0.0), Vec2::new(250.0, -80.0));
    let mut last_count = [0u32; 2];
    let mut last_damping = [1.0f64; 2];
    for i in 1..=600 {
        p.step(f64::from(i) * FRAME_MS, &mut NoOpFrameObserver);
        for (slot, axis) in [Axis::X, Axis::Y].into_iter().enumerate() {
            let count = p.bounce_count(axis);
            let damping = p.damping_factor(axis);
            assert!(count >= last_count[slot], "{axis:?} count went {} -> {count}", last_count[slot]);
            assert!(damping <= last_damping[slot], "{axis:?} damping rose at frame {i}");
            last_count[slot] = count;
            last_damping[slot] = damping;
        }
    }
    assert!(p.bounce_count(Axis::X) > 0);
}

#[test]
fn long_stall_is_capped() {
    let rest = Vec2::new(0.0, 0.0);
    let mut capped = hanging_at(rest, Vec2::new(120.0, 40.0));
    let mut nominal = hanging_at(rest, Vec2::new(120.0, 40.0));

    capped.step(16.0, &mut NoOpFrameObserver);
    nominal.step(16.0, &mut NoOpFrameObserver);

    // A two second stall integrates like two nominal frames' worth of spring.
    capped.step(2016.0, &mut NoOpFrameObserver);
    nominal.step(48.0, &mut NoOpFrameObserver);

    assert_eq!(capped.position(), nominal.position());
    assert_eq!(capped.velocity(), nominal.velocity());
}

#[test]
fn clock_going_backwards_adds_no_spring() {
    let mut p = hanging_at(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0));
    p.step(100.0, &mut NoOpFrameObserver);
    let v = p.velocity();
    p.step(50.0, &mut NoOpFrameObserver);
    let d = 0.96;
    assert!((p.velocity().x - v.x * d).abs() < 1e-9);
}

#[test]
fn set_frame_keeps_motion() {
    let mut p = hanging_at(Vec2::new(0.0, 0.0), Vec2::new(50.0, 10.0));
    run(&mut p, 1, 5);
    let before = *p.motion();
    p.set_frame(AnchorAndRest { anchor: Vec2::new(900.0, -100.0), rest: Vec2::new(900.0, 300.0) });
    assert_eq!(*p.motion(), before);
    assert_eq!(p.frame().rest, Vec2::new(900.0, 300.0));
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn damping_never_weakens(dx in -600.0f64..600.0, dy in -400.0f64..400.0, vx in -40.0f64..40.0) {
            let frame = AnchorAndRest { anchor: Vec2::new(0.0, -100.0), rest: Vec2::new(0.0, 0.0) };
            let motion = BadgeMotion { position: Vec2::new(dx, dy), rotation: 0.0, velocity: Vec2::new(vx, 0.0) };
            let mut p = Pendulum::new(frame, motion, PendulumConfig::default());
            p.start_clock(0.0);
            let mut last = (0u32, 1.0f64);
            for i in 1..=300 {
                p.step(f64::from(i) * FRAME_MS, &mut NoOpFrameObserver);
                let now = (p.bounce_count(Axis::X), p.damping_factor(Axis::X));
                prop_assert!(now.0 >= last.0);
                prop_assert!(now.1 <= last.1);
                last = now;
            }
        }
    }
}
