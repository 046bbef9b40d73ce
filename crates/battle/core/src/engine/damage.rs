//! State mutation and termination checks.

use crate::state::Contestant;

/// Returns `contestant` after losing `damage` hit points.
///
/// Hit points saturate at zero; the argument is left as it was.
pub fn apply_damage(contestant: &Contestant, damage: u32) -> Contestant {
    contestant.damaged(damage)
}

/// The sole surviving contestant, if exactly one is alive.
pub fn check_winner(contestants: &[Contestant]) -> Option<&Contestant> {
    let mut alive = contestants.iter().filter(|c| c.is_alive());
    match (alive.next(), alive.next()) {
        (Some(winner), None) => Some(winner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    #[test]
    fn hp_saturates_at_zero_and_kills() {
        let contestant = Roster::standard().contestants()[1].clone().with_hp(3);

        let updated = apply_damage(&contestant, 5);

        assert_eq!(updated.hp.current, 0);
        assert!(!updated.is_alive());
        assert_eq!(contestant.hp.current, 3);
        assert!(contestant.is_alive());
    }

    #[test]
    fn hp_stays_within_bounds_over_many_hits() {
        let mut contestant = Roster::standard().contestants()[0].clone();
        for damage in [0, 1, 7, 13, 40, 80, 200] {
            contestant = apply_damage(&contestant, damage);
            assert!(contestant.hp.current <= contestant.hp.maximum);
            assert_eq!(contestant.is_alive(), contestant.hp.current > 0);
        }
        assert_eq!(contestant.hp.current, 0);
    }

    #[test]
    fn zero_damage_is_identity() {
        let contestant = Roster::standard().contestants()[2].clone();
        assert_eq!(apply_damage(&contestant, 0), contestant);
    }

    #[test]
    fn winner_only_with_single_survivor() {
        let mut contestants = Roster::standard().contestants();
        assert!(check_winner(&contestants).is_none());

        for index in 0..contestants.len() - 1 {
            contestants[index] = apply_damage(&contestants[index], 1000);
        }
        let winner = check_winner(&contestants).unwrap();
        assert_eq!(winner.name, "Jeferson");

        contestants[5] = apply_damage(&contestants[5], 1000);
        assert!(check_winner(&contestants).is_none());
    }
}
