//! Trial drivers. Each module's trial plays the participant against fresh
//! generators or schedules, records what happened, reduces it and hands the
//! metrics to the module run's controller.

use anyhow::Context;
use engine::core::format::format_difficulty;
use engine::core::qc::QualityFlags;
use engine::core::random::{fork, seeded};
use engine::core::storage::TrialSummary;
use engine::core::{Bounds, Bounds2D, FinishedTrial, TrialRecorder};
use engine::tasks::auditory::{self, AuditoryConfig, TargetSet};
use engine::tasks::events::Response;
use engine::tasks::interrupt::{self, InterruptResponse, InterruptTaskConfig};
use engine::tasks::multitask::MultitaskMetrics;
use engine::tasks::spatial::{self, SpatialTrial};
use engine::tasks::tracking::{
    Generator1D, Generator2D, GeneratorConfig1D, GeneratorConfig2D, Sample, Sample2D,
};
use engine::tasks::triple::{TripleBaseline, TripleTaskMetrics, TripleTaskTrial};
use engine::tasks::{
    AttentionMetrics, InterruptMetrics, SpatialMetrics, Tracking2DMetrics, TrackingMetrics,
};
use engine::{MetricsRecord, ModuleRun, TaskModule};
use rand::rngs::StdRng;
use tracing::{info, info_span};

use crate::config::SimConfig;
use crate::participant::Participant;

/// How long one mental rotation item takes on average, used to size a trial.
const ROTATION_ITEM_MS: f64 = 2500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub trials: usize,
    pub seed: u64,
    pub initial_difficulty: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            trials: 10,
            seed: 0,
            initial_difficulty: 0.5,
        }
    }
}

/// Play `options.trials` trials of `module` and return their summaries.
pub fn run_module(module: TaskModule, options: &RunOptions, config: &SimConfig) -> anyhow::Result<Vec<TrialSummary>> {
    config.validate()?;
    let span = info_span!("run", module = module.id(), seed = options.seed);
    let _enter = span.enter();

    let mut rng = seeded(options.seed);
    let participant = Participant::new(config.participant.clone(), fork(&mut rng));
    let mut driver = Driver {
        config,
        rng,
        participant,
    };
    let mut run = ModuleRun::new(module, &config.engine.controller, options.initial_difficulty);

    for trial in 0..options.trials {
        let difficulty = run.difficulty();
        let (metrics, qc) = driver
            .play(module, difficulty)
            .with_context(|| format!("{} trial {trial} failed", module.id()))?;
        let summary = run.complete_trial(metrics, qc);
        info!(
            trial,
            difficulty = %format_difficulty(summary.difficulty),
            next = %format_difficulty(summary.next_difficulty),
            verdict = ?summary.verdict,
            metrics = %summary.metrics.headline(),
            "trial complete"
        );
    }

    Ok(run.finish())
}

struct Driver<'a> {
    config: &'a SimConfig,
    rng: StdRng,
    participant: Participant,
}

/// Cursor load per frame: 1 for a single task, more while other tasks compete.
type Load<'l> = &'l dyn Fn(f64) -> f64;

impl Driver<'_> {
    fn play(&mut self, module: TaskModule, difficulty: f64) -> anyhow::Result<(MetricsRecord, QualityFlags)> {
        match module {
            TaskModule::Tracking1D => {
                let trial = self.track_1d(difficulty, &|_| 1.0)?;
                let metrics =
                    TrackingMetrics::from_samples_with(trial.samples(), self.config.engine.tracking.threshold_1d);
                Ok((MetricsRecord::Tracking(metrics), trial.qc().clone()))
            }
            TaskModule::Tracking2D => {
                let trial = self.track_2d(difficulty, &|_| 1.0)?;
                let metrics =
                    Tracking2DMetrics::from_samples_with(trial.samples(), self.config.engine.tracking.threshold_2d);
                Ok((MetricsRecord::Tracking2D(metrics), trial.qc().clone()))
            }
            TaskModule::AuditoryGoNoGo => {
                let responses = self.listen(difficulty, 1.0);
                let metrics = AttentionMetrics::from_responses_with(&responses, &self.config.engine.attention);
                Ok((MetricsRecord::Attention(metrics), event_qc(responses.len())))
            }
            TaskModule::MentalRotation => {
                let trials = self.rotate(difficulty);
                Ok((MetricsRecord::Spatial(SpatialMetrics::from_trials(&trials)), event_qc(trials.len())))
            }
            TaskModule::DualTask => self.dual_task(difficulty),
            TaskModule::TripleTask => self.triple_task(difficulty),
            TaskModule::InterruptHandling => self.interrupt_task(difficulty),
        }
    }

    fn track_1d(&mut self, difficulty: f64, load: Load<'_>) -> anyhow::Result<FinishedTrial<Sample>> {
        let generator_config = GeneratorConfig1D::random(difficulty, &mut self.rng);
        let mut generator = Generator1D::create(generator_config, fork(&mut self.rng));
        let frames = self.config.frames();
        let frame_ms = self.config.frame_ms();
        let dt = frame_ms / 1000.0;
        let mut recorder = TrialRecorder::with_capacity(self.config.engine.recorder.min_samples, frames);
        let mut cursor = Bounds::UNIT.midpoint();

        for frame in 0..frames {
            let t = frame as f64 * frame_ms;
            let target = generator.position();
            let input = self.participant.follow_1d(cursor, target, dt, load(t));
            cursor = Bounds::UNIT.clamp(cursor + input);
            recorder.push(Sample::new(t, target, cursor, input))?;
            generator.update(dt);
        }
        Ok(recorder.finalize())
    }

    fn track_2d(&mut self, difficulty: f64, load: Load<'_>) -> anyhow::Result<FinishedTrial<Sample2D>> {
        let generator_config = GeneratorConfig2D::random(difficulty, &mut self.rng);
        let mut generator = Generator2D::create(generator_config, fork(&mut self.rng));
        let frames = self.config.frames();
        let frame_ms = self.config.frame_ms();
        let dt = frame_ms / 1000.0;
        let mut recorder = TrialRecorder::with_capacity(self.config.engine.recorder.min_samples, frames);
        let mut cursor = Bounds2D::UNIT.center();

        for frame in 0..frames {
            let t = frame as f64 * frame_ms;
            let target = generator.position();
            let input = self.participant.follow_2d(cursor, target, dt, load(t));
            cursor = Bounds2D::UNIT.clamp(cursor + input);
            recorder.push(Sample2D::new(t, target, cursor, input))?;
            generator.update(dt);
        }
        Ok(recorder.finalize())
    }

    fn listen(&mut self, difficulty: f64, load: f64) -> Vec<Response> {
        let config = AuditoryConfig::new(difficulty, TargetSet::default());
        let window = config.response_window();
        let events = auditory::generate(&config, self.config.trial_duration_ms, &mut self.rng);
        let presses: Vec<f64> = events
            .iter()
            .filter_map(|event| self.participant.react_to_tone(event, window, load))
            .collect();
        auditory::score_responses(&events, &presses, window)
    }

    fn rotate(&mut self, difficulty: f64) -> Vec<SpatialTrial> {
        let count = ((self.config.trial_duration_ms / ROTATION_ITEM_MS).floor() as usize).max(1);
        spatial::generate(difficulty, count, &mut self.rng)
            .iter()
            .map(|item| {
                let (answered_same, rt) = self.participant.answer_rotation(item);
                item.score(answered_same, rt)
            })
            .collect()
    }

    /// Single-task baselines for both tracking tasks, then both at once.
    fn dual_task(&mut self, difficulty: f64) -> anyhow::Result<(MetricsRecord, QualityFlags)> {
        let tracking = self.config.engine.tracking;
        let base_1d = self.track_1d(difficulty, &|_| 1.0)?;
        let base_2d = self.track_2d(difficulty, &|_| 1.0)?;
        let dual_1d = self.track_1d(difficulty, &|_| 2.0)?;
        let dual_2d = self.track_2d(difficulty, &|_| 2.0)?;

        let metrics = MultitaskMetrics::from_tracking(
            &TrackingMetrics::from_samples_with(base_1d.samples(), tracking.threshold_1d),
            &Tracking2DMetrics::from_samples_with(base_2d.samples(), tracking.threshold_2d),
            &TrackingMetrics::from_samples_with(dual_1d.samples(), tracking.threshold_1d),
            &Tracking2DMetrics::from_samples_with(dual_2d.samples(), tracking.threshold_2d),
        );
        Ok((MetricsRecord::Multitask(metrics), merge_qc(dual_1d.qc(), dual_2d.qc())))
    }

    /// Three single-task baselines, then 1D and 2D tracking under a tone
    /// stream.
    fn triple_task(&mut self, difficulty: f64) -> anyhow::Result<(MetricsRecord, QualityFlags)> {
        let attention = self.config.engine.attention;
        let baseline_1d = self.track_1d(difficulty, &|_| 1.0)?;
        let baseline_2d = self.track_2d(difficulty, &|_| 1.0)?;
        let baseline_tones = self.listen(difficulty, 1.0);
        let baseline = TripleBaseline {
            rmse_1d: TrackingMetrics::from_samples(baseline_1d.samples()).rmse,
            rmse_2d: Tracking2DMetrics::from_samples(baseline_2d.samples()).tracking.rmse,
            d_prime: AttentionMetrics::from_responses_with(&baseline_tones, &attention).d_prime,
        };

        let responses = self.listen(difficulty, 3.0);
        let triple_1d = self.track_1d(difficulty, &|_| 3.0)?;
        let triple_2d = self.track_2d(difficulty, &|_| 3.0)?;
        let trial = TripleTaskTrial {
            samples_1d: triple_1d.samples(),
            samples_2d: triple_2d.samples(),
            responses: &responses,
        };
        let metrics =
            TripleTaskMetrics::compute_with(&trial, &baseline, &attention, &self.config.engine.interference);
        Ok((MetricsRecord::TripleTask(metrics), merge_qc(triple_1d.qc(), triple_2d.qc())))
    }

    /// 2D tracking with coloured interrupts. Tracking suffers from each
    /// interrupt's onset until shortly after the key press.
    fn interrupt_task(&mut self, difficulty: f64) -> anyhow::Result<(MetricsRecord, QualityFlags)> {
        let task = InterruptTaskConfig::new(difficulty);
        let window_ms = task.response_window_ms();
        let events = interrupt::generate(&task, self.config.trial_duration_ms, &mut self.rng);
        let presses: Vec<_> = events
            .iter()
            .filter_map(|event| self.participant.react_to_interrupt(event, window_ms))
            .collect();
        let responses = interrupt::score_presses(&events, &presses, window_ms);

        let busy: Vec<(f64, f64)> = responses.iter().map(busy_span).collect();
        let load = move |t: f64| {
            if busy.iter().any(|(from, to)| t >= *from && t <= *to) {
                3.0
            } else {
                1.0
            }
        };
        let trial = self.track_2d(difficulty, &load)?;
        let metrics = InterruptMetrics::compute_with(trial.samples(), &responses, &self.config.engine.interrupt);
        Ok((MetricsRecord::Interrupt(metrics), trial.qc().clone()))
    }
}

/// While the participant is handling an interrupt.
fn busy_span(response: &InterruptResponse) -> (f64, f64) {
    let handled = response.reaction_time_ms.unwrap_or(1000.0);
    (response.appeared_at_ms, response.appeared_at_ms + handled + 300.0)
}

/// QC for event-based trials: every scheduled event counts as a sample.
fn event_qc(count: usize) -> QualityFlags {
    let mut qc = QualityFlags::pristine();
    qc.mark_sample_count(count, 1);
    qc
}

fn merge_qc(a: &QualityFlags, b: &QualityFlags) -> QualityFlags {
    QualityFlags {
        sample_count: a.sample_count + b.sample_count,
        min_samples_met: a.min_samples_met && b.min_samples_met,
        truncated: a.truncated || b.truncated,
        rejected_samples: a.rejected_samples.saturating_add(b.rejected_samples),
    }
}
