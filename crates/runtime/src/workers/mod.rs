//! Worker tasks that back the runtime orchestration.
//!
//! The battle worker owns the battle state and is the only place turns are
//! executed.

mod battle;

pub use battle::{BattleWorker, Command};
