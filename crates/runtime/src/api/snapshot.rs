//! Read-only views published by the battle worker.

use serde::{Deserialize, Serialize};

use battle_core::{BattleState, Contestant, LogEntry, TurnDelay, ready_queue};

/// Loop controller state.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Fresh battle, not started yet.
    #[default]
    Idle,
    Running,
    Paused,
    /// A winner was found (or no turn could be scheduled).
    Finished,
}

impl Phase {
    /// True while a loop is active (running or paused).
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }
}

/// Whether a control request changed the loop state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOutcome {
    Applied,
    /// The request made no sense in the current phase and was dropped.
    Ignored,
}

impl ControlOutcome {
    pub fn is_applied(self) -> bool {
        self == ControlOutcome::Applied
    }
}

/// Consistent view of the battle after a turn or control operation.
///
/// Snapshots are owned copies; observers can keep them as long as they like.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub contestants: Vec<Contestant>,
    pub log: Vec<LogEntry>,
    pub turn: u64,
    pub phase: Phase,
    pub winner: Option<Contestant>,
    pub current_attacker: Option<usize>,
    pub current_defender: Option<usize>,
    /// Alive contestant indices in upcoming scheduling order.
    pub ready_queue: Vec<usize>,
    pub turn_delay: TurnDelay,
}

impl BattleSnapshot {
    pub(crate) fn capture(state: &BattleState, phase: Phase, turn_delay: TurnDelay) -> Self {
        Self {
            contestants: state.contestants.clone(),
            log: state.log.entries().to_vec(),
            turn: state.turn,
            phase,
            winner: state.winner.clone(),
            current_attacker: state.current_attacker,
            current_defender: state.current_defender,
            ready_queue: ready_queue(&state.contestants, state.last_attacker),
            turn_delay,
        }
    }

    pub fn running(&self) -> bool {
        self.phase.is_active()
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn alive(&self) -> impl Iterator<Item = &Contestant> {
        self.contestants.iter().filter(|c| c.is_alive())
    }

    /// Attacker index, or -1 before the first turn.
    pub fn attacker_index(&self) -> i64 {
        self.current_attacker.map_or(-1, |index| index as i64)
    }

    /// Defender index, or -1 before the first turn.
    pub fn defender_index(&self) -> i64 {
        self.current_defender.map_or(-1, |index| index as i64)
    }
}
