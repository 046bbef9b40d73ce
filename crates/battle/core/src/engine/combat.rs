//! Combat resolution: dodge, base damage, critical.

use crate::config::BattleConfig;
use crate::rng::BattleRng;
use crate::state::Contestant;

/// Outcome of one contestant acting on another.
///
/// `attacker` and `defender` are the values as they were before the action;
/// applying `damage` is the mutator's job.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub attacker: Contestant,
    pub defender: Contestant,
    pub damage: u32,
    pub dodged: bool,
    pub critical: bool,
}

/// Base damage of a landed hit: `attack - defense`, never below
/// [`BattleConfig::MIN_DAMAGE`].
#[inline]
pub fn base_damage(attacker: &Contestant, defender: &Contestant) -> u32 {
    attacker
        .attack()
        .saturating_sub(defender.defense())
        .max(BattleConfig::MIN_DAMAGE)
}

/// Resolves an attack.
///
/// Draw order is fixed: a dodge roll first, then (only on a hit) a critical
/// roll. A dodge consumes exactly one draw.
pub fn resolve(
    attacker: &Contestant,
    defender: &Contestant,
    rng: &mut (impl BattleRng + ?Sized),
) -> AttackResult {
    let dodge_roll = rng.roll_percent();
    if dodge_roll < defender.speed() {
        return AttackResult {
            attacker: attacker.clone(),
            defender: defender.clone(),
            damage: 0,
            dodged: true,
            critical: false,
        };
    }

    let damage = base_damage(attacker, defender);

    let critical_roll = rng.roll_percent();
    let critical = critical_roll < BattleConfig::CRITICAL_CHANCE;

    AttackResult {
        attacker: attacker.clone(),
        defender: defender.clone(),
        damage: if critical { damage * 2 } else { damage },
        dodged: false,
        critical,
    }
}
