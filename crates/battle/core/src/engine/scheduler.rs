//! Round-robin selection of attackers and random selection of defenders.
//!
//! The contestant slice is the ring. Order never depends on stats: every
//! alive contestant gets exactly one quantum per revolution, and only dead
//! contestants are skipped.

use crate::rng::BattleRng;
use crate::state::Contestant;

/// Selects the next attacker after `last` in registration order.
///
/// Returns `None` when at most one contestant is alive, which means the
/// battle is over.
pub fn next_attacker(contestants: &[Contestant], last: Option<usize>) -> Option<usize> {
    let alive = contestants.iter().filter(|c| c.is_alive()).count();
    if alive <= 1 {
        return None;
    }

    let len = contestants.len();
    let start = last.map_or(0, |index| (index + 1) % len);

    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&index| contestants[index].is_alive())
}

/// Alive contestants in the order they will be scheduled after `last`.
///
/// The first element is what [`next_attacker`] would return; the list covers
/// one full revolution of the ring.
pub fn ready_queue(contestants: &[Contestant], last: Option<usize>) -> Vec<usize> {
    let len = contestants.len();
    if len == 0 {
        return Vec::new();
    }
    let start = last.map_or(0, |index| (index + 1) % len);

    (0..len)
        .map(|offset| (start + offset) % len)
        .filter(|&index| contestants[index].is_alive())
        .collect()
}

/// Picks a defender uniformly among alive contestants other than `attacker`.
pub fn choose_defender(
    contestants: &[Contestant],
    attacker: usize,
    rng: &mut (impl BattleRng + ?Sized),
) -> Option<usize> {
    let eligible: Vec<usize> = contestants
        .iter()
        .enumerate()
        .filter(|&(index, contestant)| index != attacker && contestant.is_alive())
        .map(|(index, _)| index)
        .collect();

    if eligible.is_empty() {
        return None;
    }

    Some(eligible[rng.pick(eligible.len())])
}
