//! One run of one task module: the difficulty carried from trial to trial and
//! the summaries produced along the way.

use tracing::{debug, trace};
use uuid::Uuid;

use crate::adaptive::{DifficultyController, DifficultyState};
use crate::core::config::ControllerConfig;
use crate::core::qc::QualityFlags;
use crate::core::storage::TrialSummary;
use crate::tasks::{MetricsRecord, TaskModule};

#[derive(Debug)]
pub struct ModuleRun {
    id: String,
    module: TaskModule,
    state: DifficultyState,
    controller: Box<dyn DifficultyController>,
    summaries: Vec<TrialSummary>,
}

impl ModuleRun {
    /// Start a run with the module's default controller.
    pub fn new(module: TaskModule, config: &ControllerConfig, initial_difficulty: f64) -> Self {
        let controller = module.default_controller().build(config);
        Self::with_controller(module, config, initial_difficulty, controller)
    }

    pub fn with_controller(
        module: TaskModule,
        config: &ControllerConfig,
        initial_difficulty: f64,
        controller: Box<dyn DifficultyController>,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        let state = DifficultyState::new(initial_difficulty, config);
        debug!(run = %id, module = module.id(), difficulty = state.value(), "module run started");
        Self {
            id,
            module,
            state,
            controller,
            summaries: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn module(&self) -> TaskModule {
        self.module
    }

    /// Difficulty the next trial should run at.
    pub fn difficulty(&self) -> f64 {
        self.state.value()
    }

    pub fn state(&self) -> &DifficultyState {
        &self.state
    }

    pub fn summaries(&self) -> &[TrialSummary] {
        &self.summaries
    }

    /// Feed the finished trial's metrics to the controller, once, and record
    /// the outcome.
    pub fn complete_trial(&mut self, metrics: MetricsRecord, qc: QualityFlags) -> &TrialSummary {
        let difficulty = self.state.value();
        let adjustment = self.controller.adjust(difficulty, &metrics);
        self.state.apply(&adjustment);
        trace!(run = %self.id, qc = %qc.summary(), "trial quality");

        let summary = TrialSummary::new(
            &self.id,
            self.module,
            difficulty,
            self.state.value(),
            adjustment.verdict,
            metrics,
            qc,
        );
        self.summaries.push(summary);
        &self.summaries[self.summaries.len() - 1]
    }

    /// End the run and hand back its summaries. Difficulty state is dropped.
    pub fn finish(self) -> Vec<TrialSummary> {
        debug!(
            run = %self.id,
            module = self.module.id(),
            trials = self.summaries.len(),
            final_difficulty = self.state.value(),
            "module run finished"
        );
        self.summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::{ControllerKind, Verdict};
    use crate::tasks::{SpatialMetrics, TrackingMetrics};

    fn tracking(rmse: f64) -> MetricsRecord {
        MetricsRecord::Tracking(TrackingMetrics {
            rmse,
            ..TrackingMetrics::default()
        })
    }

    #[test]
    fn difficulty_threads_through_trials() {
        let mut run = ModuleRun::new(TaskModule::Tracking1D, &ControllerConfig::default(), 0.5);
        let first = run.complete_trial(tracking(0.01), QualityFlags::pristine()).clone();
        assert_eq!(first.difficulty, 0.5);
        assert!((first.next_difficulty - 0.55).abs() < 1e-12);
        assert_eq!(first.verdict, Verdict::Success);
        assert_eq!(first.run_id, run.id());

        let second = run.complete_trial(tracking(1.0), QualityFlags::pristine()).clone();
        assert_eq!(second.difficulty, first.next_difficulty);
        assert!((run.difficulty() - 0.5).abs() < 1e-12);
        assert_eq!(run.state().history().len(), 2);

        let summaries = run.finish();
        assert_eq!(summaries.len(), 2);
        assert_ne!(summaries[0].id, summaries[1].id);
    }

    #[test]
    fn accuracy_modules_use_band_controller() {
        let run = ModuleRun::new(TaskModule::MentalRotation, &ControllerConfig::default(), 0.5);
        assert_eq!(run.controller.kind(), ControllerKind::Band);
    }

    #[test]
    fn wrong_family_keeps_difficulty() {
        let mut run = ModuleRun::new(TaskModule::Tracking2D, &ControllerConfig::default(), 0.3);
        let summary = run
            .complete_trial(MetricsRecord::Spatial(SpatialMetrics::default()), QualityFlags::pristine())
            .clone();
        assert_eq!(summary.verdict, Verdict::Unsupported);
        assert_eq!(summary.next_difficulty, 0.3);
        assert_eq!(run.difficulty(), 0.3);
    }
}
