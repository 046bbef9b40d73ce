//! Turn engine.
//!
//! [`BattleEngine`] borrows a [`BattleState`] and runs one quantum at a time:
//! schedule, pick a defender, resolve, mutate, narrate, check for a winner.
//! It performs no I/O and never waits; pacing belongs to whoever drives it.

mod combat;
mod damage;
pub mod narration;
mod scheduler;

pub use combat::{AttackResult, base_damage, resolve};
pub use damage::{apply_damage, check_winner};
pub use scheduler::{choose_defender, next_attacker, ready_queue};

use crate::rng::BattleRng;
use crate::state::{BattleState, Contestant, LogKind};

/// Errors surfaced by headless simulation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("battle did not finish within {limit} turns")]
    TurnLimitExceeded { limit: u64 },

    #[error("no attacker or defender available at turn {turn}")]
    Halted { turn: u64 },
}

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u64,
    pub attacker: usize,
    pub defender: usize,
    pub result: AttackResult,
    /// True when the defender died this turn.
    pub eliminated: bool,
}

/// Result of [`BattleEngine::execute_turn`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The battle goes on.
    Continued(TurnReport),
    /// This turn left a single survivor.
    Decided {
        report: TurnReport,
        winner: Contestant,
    },
    /// No attacker or no defender could be scheduled; the battle is over.
    Halted,
}

impl TurnOutcome {
    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            TurnOutcome::Continued(report) | TurnOutcome::Decided { report, .. } => Some(report),
            TurnOutcome::Halted => None,
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, TurnOutcome::Continued(_))
    }
}

/// Drives battle state transitions.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn announce_start(&mut self) {
        self.state.log.append(narration::BATTLE_STARTED, LogKind::Info);
        self.state.log.append(narration::TURN_ORDER, LogKind::Info);
    }

    pub fn announce_pause(&mut self) {
        self.state.log.append(narration::BATTLE_PAUSED, LogKind::Info);
    }

    pub fn announce_resume(&mut self) {
        self.state.log.append(narration::BATTLE_RESUMED, LogKind::Info);
    }

    /// Runs a single turn.
    pub fn execute_turn(&mut self, rng: &mut (impl BattleRng + ?Sized)) -> TurnOutcome {
        self.state.turn += 1;
        let turn = self.state.turn;

        let Some(attacker) = next_attacker(&self.state.contestants, self.state.last_attacker)
        else {
            return TurnOutcome::Halted;
        };
        let Some(defender) = choose_defender(&self.state.contestants, attacker, rng) else {
            return TurnOutcome::Halted;
        };

        let result = resolve(
            &self.state.contestants[attacker],
            &self.state.contestants[defender],
            rng,
        );

        let mut eliminated = false;
        if result.dodged {
            self.state.log.append(narration::dodge(&result), LogKind::Dodge);
        } else {
            let updated = apply_damage(&result.defender, result.damage);
            self.state
                .log
                .append(narration::attack(&result, &updated), LogKind::Attack);
            if !updated.is_alive() {
                eliminated = true;
                self.state.log.append(narration::death(&updated), LogKind::Death);
            }
            self.state.contestants[defender] = updated;
        }

        self.state.current_attacker = Some(attacker);
        self.state.current_defender = Some(defender);

        let report = TurnReport {
            turn,
            attacker,
            defender,
            result,
            eliminated,
        };

        if let Some(winner) = check_winner(&self.state.contestants).cloned() {
            self.state
                .log
                .append(narration::winner(&winner), LogKind::Winner);
            self.state.winner = Some(winner.clone());
            return TurnOutcome::Decided { report, winner };
        }

        self.state.last_attacker = Some(attacker);
        TurnOutcome::Continued(report)
    }

    /// Runs turns back to back until a winner emerges.
    pub fn run_to_completion(
        &mut self,
        rng: &mut (impl BattleRng + ?Sized),
        max_turns: u64,
    ) -> Result<Contestant, TurnError> {
        if let Some(winner) = &self.state.winner {
            return Ok(winner.clone());
        }
        if self.state.turn == 0 && self.state.log.is_empty() {
            self.announce_start();
        }

        for _ in 0..max_turns {
            match self.execute_turn(rng) {
                TurnOutcome::Continued(_) => {}
                TurnOutcome::Decided { winner, .. } => return Ok(winner),
                TurnOutcome::Halted => {
                    return Err(TurnError::Halted {
                        turn: self.state.turn,
                    });
                }
            }
        }

        Err(TurnError::TurnLimitExceeded { limit: max_turns })
    }
}
