use engine::core::random::seeded;
use engine::core::{Bounds, Bounds2D};
use engine::tasks::tracking::{
    Generator1D, Generator2D, GeneratorConfig1D, GeneratorConfig2D, GeneratorKind1D,
    GeneratorKind2D,
};

/// Irregular frame times, including a stall and a couple of bogus values.
fn frame_times() -> impl Iterator<Item = f64> {
    (0..3000).map(|i| match i % 97 {
        0 => 0.5,
        13 => 0.0,
        29 => -0.016,
        _ if i % 3 == 0 => 1.0 / 30.0,
        _ => 1.0 / 60.0,
    })
}

fn difficulties() -> impl Iterator<Item = f64> {
    (0..=10).map(|i| i as f64 / 10.0)
}

#[test]
fn one_dimensional_targets_stay_in_bounds() {
    let bounds = Bounds::new(-0.8, 0.6);
    for kind in GeneratorKind1D::ALL {
        for difficulty in difficulties() {
            let config = GeneratorConfig1D::new(kind, bounds, difficulty);
            let mut generator = Generator1D::create(config, seeded(difficulty.to_bits()));
            assert!(bounds.contains(generator.position()));
            for dt in frame_times() {
                let x = generator.update(dt);
                assert!(
                    bounds.contains(x),
                    "{kind:?} at {difficulty} left bounds: {x}"
                );
            }
        }
    }
}

#[test]
fn two_dimensional_targets_stay_in_bounds() {
    let bounds = Bounds2D {
        x: Bounds::new(0.0, 2.0),
        y: Bounds::new(-0.5, 0.5),
    };
    for kind in GeneratorKind2D::ALL {
        for difficulty in difficulties() {
            let config = GeneratorConfig2D::new(kind, bounds, difficulty);
            let mut generator = Generator2D::create(config, seeded(difficulty.to_bits() ^ 7));
            for dt in frame_times() {
                let p = generator.update(dt);
                assert!(bounds.contains(p), "{kind:?} at {difficulty} left bounds: {p:?}");
            }
        }
    }
}

#[test]
fn replay_with_same_seed_is_identical() {
    for kind in GeneratorKind1D::ALL {
        let config = GeneratorConfig1D::new(kind, Bounds::UNIT, 0.7);
        let mut a = Generator1D::create(config, seeded(99));
        let mut b = Generator1D::create(config, seeded(99));
        let left: Vec<f64> = frame_times().map(|dt| a.update(dt)).collect();
        let right: Vec<f64> = frame_times().map(|dt| b.update(dt)).collect();
        assert_eq!(left, right, "{kind:?}");
    }
    for kind in GeneratorKind2D::ALL {
        let config = GeneratorConfig2D::new(kind, Bounds2D::UNIT, 0.3);
        let mut a = Generator2D::create(config, seeded(5));
        let mut b = Generator2D::create(config, seeded(5));
        for dt in frame_times() {
            assert_eq!(a.update(dt), b.update(dt), "{kind:?}");
        }
    }
}

#[test]
fn different_seeds_diverge() {
    let config = GeneratorConfig1D::new(GeneratorKind1D::OrnsteinUhlenbeck, Bounds::UNIT, 0.5);
    let mut a = Generator1D::create(config, seeded(1));
    let mut b = Generator1D::create(config, seeded(2));
    let differs = frame_times().any(|dt| a.update(dt) != b.update(dt));
    assert!(differs);
}

#[test]
fn position_is_idempotent_between_updates() {
    let config = GeneratorConfig2D::new(GeneratorKind2D::Curvilinear, Bounds2D::UNIT, 0.5);
    let mut generator = Generator2D::create(config, seeded(12));
    let p = generator.update(1.0 / 60.0);
    assert_eq!(generator.position(), p);
    assert_eq!(generator.position(), p);
    assert_eq!(generator.update(0.0), p);
}

#[test]
fn reversed_bounds_from_json_are_normalized() {
    let config: GeneratorConfig1D = serde_json::from_str(
        r#"{"kind":"ornstein_uhlenbeck","bounds":{"min":1.0,"max":-1.0},"difficulty":0.5}"#,
    )
    .unwrap();
    assert_eq!(config.bounds, Bounds::UNIT);

    let mut generator = Generator1D::create(config, seeded(17));
    for dt in frame_times().take(600) {
        assert!(Bounds::UNIT.contains(generator.update(dt)));
    }

    let bad = r#"{"kind":"sum_of_sines","bounds":{"min":-1.0,"max":1e999},"difficulty":0.5}"#;
    assert!(serde_json::from_str::<GeneratorConfig1D>(bad).is_err());
}
