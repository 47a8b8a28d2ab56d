//! Interrupt handling: coloured shapes that pop up during 2D tracking and
//! demand the key matching their colour.

pub mod engine;
pub mod metrics;

pub use engine::{
    classify, generate, score_presses, Color, InterruptEvent, InterruptOutcome, InterruptResponse,
    InterruptStimulus, InterruptTaskConfig, KeyPress, ResponseKey, Shape,
};
pub use metrics::InterruptMetrics;
