//! Round-robin battle rules shared by the runtime and headless tools.
//!
//! `battle-core` models OS round-robin scheduling as a turn-based fight:
//! every contestant is a thread, every attack is one quantum. The crate is
//! pure and synchronous; all state mutation flows through
//! [`engine::BattleEngine`], and every random decision goes through an
//! injected [`BattleRng`].
pub mod config;
pub mod engine;
pub mod rng;
pub mod roster;
pub mod state;

pub use config::{BattleConfig, TurnDelay, TurnDelayError};
pub use engine::{
    AttackResult, BattleEngine, TurnError, TurnOutcome, TurnReport, apply_damage, base_damage,
    check_winner, choose_defender, next_attacker, ready_queue, resolve,
};
pub use rng::{BattleRng, PcgRng, ScriptedRng};
pub use roster::{ContestantTemplate, Roster, RosterError};
pub use state::{
    BattleLog, BattleState, Contestant, ContestantStats, LogEntry, LogKind, ResourceMeter,
    ThreadId,
};
