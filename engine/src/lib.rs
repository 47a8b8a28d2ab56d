//! Shared engine crate for Trackwise. Target generation, stimulus scheduling,
//! metric reduction and adaptive difficulty live here; rendering, input capture
//! and persistence belong to the surrounding app layers.

pub mod adaptive;
pub mod core;
pub mod session;
pub mod tasks;

pub use adaptive::{
    Adjustment, BandController, ControllerKind, DifficultyController, DifficultyState,
    ThresholdController, Verdict,
};
pub use session::ModuleRun;
pub use tasks::{MetricsRecord, TaskModule};
