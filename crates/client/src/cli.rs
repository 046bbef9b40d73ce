//! Command-line flags layered over environment configuration.
use anyhow::{Context, Result};
use clap::Parser;

use battle_core::TurnDelay;
use battle_runtime::RuntimeConfig;

/// Round-robin scheduling, fought out turn by turn
#[derive(Debug, Parser)]
#[command(name = "battle")]
#[command(about = "Simulate a round-robin thread battle", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Delay between turns in milliseconds (100-2000, step 100)
    #[arg(long, value_name = "MS")]
    pub speed: Option<u64>,

    /// Seed for a reproducible battle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the final snapshot as JSON instead of streaming the log
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Overrides environment values with any flags given on the command line.
    ///
    /// Unlike `BATTLE_SPEED_MS`, an explicit `--speed` is validated strictly.
    pub fn apply(&self, mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Some(millis) = self.speed {
            config.turn_delay =
                TurnDelay::try_from_millis(millis).context("invalid --speed value")?;
        }

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        Ok(config)
    }
}
