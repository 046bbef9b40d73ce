//! Event types for different topics.

use battle_core::{Contestant, ThreadId, TurnDelay, TurnReport};
use serde::{Deserialize, Serialize};

use crate::api::Phase;

/// Events related to turn processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A turn finished and its effects are visible in the latest snapshot.
    Completed {
        turn: u64,
        attacker: ThreadId,
        defender: ThreadId,
        damage: u32,
        dodged: bool,
        critical: bool,
        eliminated: bool,
    },

    /// The battle ended. `winner` is `None` only if the loop halted without a
    /// sole survivor.
    Finished {
        turns: u64,
        winner: Option<Contestant>,
    },
}

impl TurnEvent {
    pub(crate) fn completed(report: &TurnReport) -> Self {
        TurnEvent::Completed {
            turn: report.turn,
            attacker: report.result.attacker.thread_id,
            defender: report.result.defender.thread_id,
            damage: report.result.damage,
            dodged: report.result.dodged,
            critical: report.result.critical,
            eliminated: report.eliminated,
        }
    }
}

/// Events related to loop control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    PhaseChanged { from: Phase, to: Phase },
    SpeedChanged { delay: TurnDelay },
    /// The battle was torn down and rebuilt from its roster.
    Reset,
}
