use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use engine::core::format::format_difficulty;
use engine::TaskModule;
use sim::{logging, run_module, RunOptions, SimConfig};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "trackwise-sim",
    version,
    about = "Play Trackwise task modules with a synthetic participant and print trial summaries as JSON lines"
)]
struct Cli {
    /// Module id to run (e.g. `tracking_1d`, `interrupt_handling`). Runs every module when omitted.
    #[arg(long)]
    module: Option<String>,

    /// Trials per module
    #[arg(long, default_value_t = 10)]
    trials: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON file with simulator and engine settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the configured trial length
    #[arg(long, value_name = "MS")]
    duration_ms: Option<f64>,

    /// Starting difficulty, clamped into the controller's range
    #[arg(long, default_value_t = 0.5)]
    difficulty: f64,
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(ms) = cli.duration_ms {
        config.trial_duration_ms = ms;
    }
    config.validate().context("invalid settings after applying CLI overrides")?;

    let modules = match cli.module.as_deref() {
        Some(id) => match TaskModule::from_id(id) {
            Some(module) => vec![module],
            None => {
                let known: Vec<&str> = TaskModule::ALL.iter().map(TaskModule::id).collect();
                bail!("unknown module `{id}`; expected one of: {}", known.join(", "));
            }
        },
        None => TaskModule::ALL.to_vec(),
    };

    let options = RunOptions {
        trials: cli.trials,
        seed: cli.seed,
        initial_difficulty: cli.difficulty,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for module in modules {
        let summaries = run_module(module, &options, &config)?;
        if let Some(last) = summaries.last() {
            info!(
                module = module.label(),
                final_difficulty = %format_difficulty(last.next_difficulty),
                "module done"
            );
        }
        for summary in &summaries {
            serde_json::to_writer(&mut out, summary)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
