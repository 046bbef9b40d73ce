//! Battle state data types.
//!
//! [`BattleState`] is the aggregate owned by whoever drives the battle. It is
//! only mutated through [`crate::engine::BattleEngine`] and is cheap to clone
//! into snapshots.

mod battle;
mod common;
mod contestant;
mod log;

pub use battle::BattleState;
pub use common::{ResourceMeter, ThreadId};
pub use contestant::{Contestant, ContestantStats};
pub use log::{BattleLog, LogEntry, LogKind};
