//! High-level runtime orchestrator.
//!
//! The runtime owns the battle worker, wires up command/snapshot/event
//! channels, and exposes a builder-based API for clients to drive a battle.

use std::env;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use battle_core::{BattleRng, ContestantTemplate, PcgRng, Roster, TurnDelay};

use crate::api::{BattleHandle, Result, RuntimeError};
use crate::events::EventBus;
use crate::rng::EntropyRng;
use crate::workers::BattleWorker;

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub turn_delay: TurnDelay,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for a reproducible battle; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            turn_delay: TurnDelay::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SPEED_MS` - Delay between turns, clamped to [100, 2000] (default: 800)
    /// - `BATTLE_SEED` - Seed for a reproducible battle (default: random)
    /// - `BATTLE_COMMAND_BUFFER` - Control command queue size (default: 32)
    /// - `BATTLE_EVENT_BUFFER` - Per-topic event buffer size (default: 256)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("BATTLE_SPEED_MS") {
            config.turn_delay = TurnDelay::clamped(millis);
        }

        config.seed = read_env::<u64>("BATTLE_SEED");

        if let Some(capacity) = read_env::<usize>("BATTLE_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("BATTLE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that hosts one battle.
///
/// Design: Runtime owns the worker task.
/// [`BattleHandle`] provides a cloneable façade for clients.
pub struct BattleRuntime {
    handle: BattleHandle,
    worker_handle: JoinHandle<()>,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding handle has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct BattleRuntimeBuilder {
    config: RuntimeConfig,
    roster: Roster,
    templates: Option<Vec<ContestantTemplate>>,
    rng: Option<Box<dyn BattleRng>>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: Roster::standard(),
            templates: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Battle with a custom roster instead of the standard six
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self.templates = None;
        self
    }

    /// Battle with contestants built from raw templates
    ///
    /// Templates are validated by [`build`](Self::build).
    pub fn contestants(mut self, templates: impl IntoIterator<Item = ContestantTemplate>) -> Self {
        self.templates = Some(templates.into_iter().collect());
        self
    }

    /// Initial delay between turns
    pub fn turn_delay(mut self, turn_delay: TurnDelay) -> Self {
        self.config.turn_delay = turn_delay;
        self
    }

    /// Reproducible battle driven by [`PcgRng`]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Inject a random source; takes precedence over any seed
    pub fn rng(mut self, rng: impl BattleRng + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Build the runtime and spawn its worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<BattleRuntime> {
        let roster = match self.templates {
            Some(templates) => Roster::from_templates(templates)?,
            None => self.roster,
        };

        let rng = match (self.rng, self.config.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Box::new(PcgRng::seeded(seed)) as Box<dyn BattleRng>,
            (None, None) => Box::new(EntropyRng::new()),
        };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(BattleWorker::initial_snapshot(
            &roster,
            self.config.turn_delay,
        ));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = BattleHandle::new(command_tx, snapshot_rx, event_bus.clone());

        let worker = BattleWorker::new(
            roster,
            self.config.turn_delay,
            rng,
            command_rx,
            snapshot_tx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(BattleRuntime {
            handle,
            worker_handle,
        })
    }
}
