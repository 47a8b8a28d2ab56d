//! Headless driving loop for the Trackwise engine.
//!
//! A synthetic participant plays every task module against real generators,
//! sequencers, reducers and the adaptive controller, one trial at a time.

pub mod config;
pub mod driver;
pub mod logging;
pub mod participant;

pub use config::SimConfig;
pub use driver::{run_module, RunOptions};
pub use participant::{Participant, ParticipantConfig};
