use super::{BattleLog, Contestant};
use crate::roster::Roster;

/// Aggregate battle state.
///
/// `contestants` keeps registration order for the whole battle; that order
/// is the round-robin ring.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub contestants: Vec<Contestant>,
    pub log: BattleLog,
    /// Completed turn count, starting at zero.
    pub turn: u64,
    /// Index of the contestant that acted last (`None` before the first turn).
    pub last_attacker: Option<usize>,
    pub current_attacker: Option<usize>,
    pub current_defender: Option<usize>,
    pub winner: Option<Contestant>,
}

impl BattleState {
    /// Creates a fresh battle from a roster, with empty log and counters.
    pub fn new(roster: &Roster) -> Self {
        Self {
            contestants: roster.contestants(),
            log: BattleLog::new(),
            turn: 0,
            last_attacker: None,
            current_attacker: None,
            current_defender: None,
            winner: None,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.contestants.iter().filter(|c| c.is_alive()).count()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn contestant(&self, index: usize) -> Option<&Contestant> {
        self.contestants.get(index)
    }
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new(&Roster::standard())
    }
}
