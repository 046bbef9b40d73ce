//! Log message rendering.

use super::AttackResult;
use crate::state::Contestant;

pub const BATTLE_STARTED: &str = "Battle started! Round-robin scheduler engaged.";
pub const TURN_ORDER: &str = "Each contestant (thread) takes its turn in order.";
pub const BATTLE_PAUSED: &str = "Battle paused. Threads waiting.";
pub const BATTLE_RESUMED: &str = "Battle resumed. Threads reactivated.";

pub fn dodge(result: &AttackResult) -> String {
    let AttackResult {
        attacker, defender, ..
    } = result;
    format!(
        "[{}] {} attacked {}, but {} dodged! (speed: {}%)",
        attacker.thread_id,
        attacker.name,
        defender.name,
        defender.name,
        defender.speed()
    )
}

pub fn attack(result: &AttackResult, updated_defender: &Contestant) -> String {
    let critical = if result.critical { " CRITICAL!" } else { "" };
    format!(
        "[{}] {} dealt {} damage{} to {}! (HP: {})",
        result.attacker.thread_id,
        result.attacker.name,
        result.damage,
        critical,
        updated_defender.name,
        updated_defender.hp
    )
}

pub fn death(defender: &Contestant) -> String {
    format!(
        "[{}] {} was eliminated! Thread terminated.",
        defender.thread_id, defender.name
    )
}

pub fn winner(winner: &Contestant) -> String {
    format!("{} ({}) is the WINNER!", winner.name, winner.thread_id)
}
