use engine::core::config::EngineConfig;
use engine::core::random::{fork, seeded};
use engine::core::storage::TrialSummary;
use engine::core::{Bounds, TrialRecorder};
use engine::tasks::tracking::{Generator1D, GeneratorConfig1D, GeneratorKind1D, Sample};
use engine::tasks::TrackingMetrics;
use engine::{MetricsRecord, ModuleRun, TaskModule, Verdict};
use rand::Rng;

const DT: f64 = 1.0 / 60.0;

#[derive(Clone, Copy)]
struct Follower {
    gain: f64,
    noise: f64,
    start: f64,
}

const LAGGING: Follower = Follower {
    gain: 0.4,
    noise: 0.01,
    start: 0.0,
};

/// Run `trials` tracking trials with a lagging, noisy follower and return the
/// per-trial summaries.
fn run_tracking(seed: u64, trials: usize, follower: Follower) -> Vec<TrialSummary> {
    let config = EngineConfig::default();
    let mut rng = seeded(seed);
    let mut run = ModuleRun::new(TaskModule::Tracking1D, &config.controller, 0.5);

    for _ in 0..trials {
        let generator_config =
            GeneratorConfig1D::new(GeneratorKind1D::choose(&mut rng), Bounds::UNIT, run.difficulty());
        let mut generator = Generator1D::create(generator_config, fork(&mut rng));
        let mut recorder = TrialRecorder::new(config.recorder.min_samples);
        let mut cursor = follower.start;

        for tick in 0..600 {
            let target = generator.update(DT);
            let input = follower.gain * (target - cursor) + follower.noise * rng.gen_range(-1.0..1.0);
            cursor += input;
            let sample = Sample::new(tick as f64 * DT * 1000.0, target, cursor, input);
            recorder.push(sample).expect("ordered, finite samples");
        }

        let (samples, qc) = recorder.finalize().into_parts();
        let metrics = TrackingMetrics::from_samples_with(&samples, config.tracking.threshold_1d);
        run.complete_trial(MetricsRecord::Tracking(metrics), qc);
    }

    run.finish()
}

fn comparable(summaries: &[TrialSummary]) -> Vec<(f64, f64, Verdict, MetricsRecord)> {
    summaries
        .iter()
        .map(|s| (s.difficulty, s.next_difficulty, s.verdict, s.metrics.clone()))
        .collect()
}

#[test]
fn closed_loop_is_deterministic_for_a_seed() {
    let a = run_tracking(2024, 8, LAGGING);
    let b = run_tracking(2024, 8, LAGGING);
    assert_eq!(comparable(&a), comparable(&b));
}

#[test]
fn difficulty_feeds_forward_and_stays_bounded() {
    let summaries = run_tracking(7, 20, LAGGING);
    assert_eq!(summaries.len(), 20);
    for pair in summaries.windows(2) {
        assert_eq!(pair[1].difficulty, pair[0].next_difficulty);
    }
    for s in &summaries {
        assert!((0.1..=1.0).contains(&s.next_difficulty));
        assert!(s.qc.is_clean());
        assert_eq!(s.qc.sample_count, 600);
    }
}

#[test]
fn a_parked_cursor_is_eased_down() {
    // The cursor never moves from outside the target range, so every trial's
    // RMSE is at least 0.5.
    let parked = Follower {
        gain: 0.0,
        noise: 0.0,
        start: 1.5,
    };
    let summaries = run_tracking(11, 12, parked);
    assert!(summaries.iter().all(|s| s.verdict == Verdict::Struggling));
    assert_eq!(summaries.last().map(|s| s.next_difficulty), Some(0.1));
}

#[test]
fn summaries_round_trip_through_json_lines() {
    let summaries = run_tracking(3, 3, LAGGING);
    let lines: Vec<String> = summaries
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
    for (line, original) in lines.iter().zip(&summaries) {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["module"], "tracking_1d");
        assert_eq!(value["metrics"]["family"], "tracking");
        let back: TrialSummary = serde_json::from_str(line).unwrap();
        assert_eq!(back.id, original.id);
        assert_eq!(back.verdict, original.verdict);
        assert_eq!(back.qc, original.qc);
    }
}
