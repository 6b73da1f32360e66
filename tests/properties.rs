use glam::Vec2;
use proptest::prelude::*;

use pianew_tiles::sim::{GamePhase, HitTier, ParticleField, Session, classify, ramp};
use pianew_tiles::tuning::{HitWindows, ParticleTuning};
use pianew_tiles::Tuning;

#[derive(Debug, Clone)]
enum Action {
    Advance(f32),
    Tap(usize),
    Pause,
    Resume,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => (0.0f32..0.1).prop_map(Action::Advance),
        3 => (0usize..5).prop_map(Action::Tap),
        1 => Just(Action::Pause),
        1 => Just(Action::Resume),
    ]
}

fn windows() -> impl Strategy<Value = HitWindows> {
    (0.0f32..50.0, 0.0f32..50.0, 1.0f32..50.0).prop_map(|(a, b, c)| HitWindows {
        perfect: a,
        great: a + b,
        good: a + b + c,
    })
}

proptest! {
    #[test]
    fn ramp_stays_in_bounds(score in any::<u64>(), growth in 0.0f32..10.0) {
        let tuning = Tuning { speed_growth: growth, ..Tuning::classic() };
        let speed = ramp::fall_speed(&tuning, score);
        prop_assert!(speed >= tuning.initial_speed);
        prop_assert!(speed <= tuning.max_speed);
    }

    #[test]
    fn ramp_is_monotonic(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let tuning = Tuning::classic();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ramp::fall_speed(&tuning, lo) <= ramp::fall_speed(&tuning, hi));
    }

    #[test]
    fn classification_is_ordered_by_distance(w in windows(), d1 in 0.0f32..200.0, d2 in 0.0f32..200.0) {
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        prop_assert!(classify(near, &w) <= classify(far, &w));
        prop_assert_eq!(classify(near, &w), classify(near, &w));
        prop_assert_eq!(classify(w.good, &w), HitTier::Miss);
        prop_assert_eq!(classify(w.good + far, &w), HitTier::Miss);
    }

    #[test]
    fn perfect_bursts_are_never_smaller(x in 0.0f32..400.0, y in 0.0f32..800.0) {
        let tuning = ParticleTuning::default();
        let origin = Vec2::new(x, y);
        let perfect = ParticleField::new().emit(HitTier::Perfect, origin, true, &tuning);
        let good = ParticleField::new().emit(HitTier::Good, origin, true, &tuning);
        prop_assert!(perfect >= good);
        prop_assert_eq!(ParticleField::new().emit(HitTier::Perfect, origin, false, &tuning), 0);
    }

    #[test]
    fn score_and_combo_rules_hold(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..300)) {
        let mut session = Session::new(Tuning::classic(), seed).unwrap();
        for action in actions {
            let before = session.state().clone();
            match action {
                Action::Advance(dt) => session.advance(dt),
                Action::Tap(lane) => { session.tap(lane, 0.0); }
                Action::Pause => session.pause(),
                Action::Resume => session.resume(),
            }
            let after = session.state();

            prop_assert!(after.score >= before.score);
            if after.combo < before.combo {
                prop_assert_eq!(after.combo, 0);
                prop_assert_eq!(after.phase, GamePhase::Over);
            }
            if before.phase == GamePhase::Over {
                prop_assert_eq!(after, &before);
            }
            if after.phase == GamePhase::Over && before.phase != GamePhase::Over {
                prop_assert_eq!(after.combo, 0);
            }
            let tuning = session.tuning();
            prop_assert!(after.fall_speed >= tuning.initial_speed && after.fall_speed <= tuning.max_speed);
        }
    }
}
