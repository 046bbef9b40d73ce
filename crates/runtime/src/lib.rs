//! Runtime orchestration for the round-robin battle.
//!
//! This crate hosts the loop controller: a worker task that owns the battle
//! state, runs one turn per quantum, and honors start/pause/resume/reset and
//! speed changes while it runs. Consumers embed [`BattleRuntime`] and interact
//! with the battle through [`BattleHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`rng`] supplies the default entropy-seeded random source
//! - `workers` keeps the battle loop internal to the crate
pub mod api;
pub mod events;
pub mod rng;
pub mod runtime;

mod workers;

pub use api::{BattleHandle, BattleSnapshot, ControlOutcome, Phase, Result, RuntimeError};
pub use events::{ControlEvent, Event, EventBus, Topic, TurnEvent};
pub use rng::EntropyRng;
pub use runtime::{BattleRuntime, BattleRuntimeBuilder, RuntimeConfig};
