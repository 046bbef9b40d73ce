use battle_core::{BattleEngine, BattleState, LogKind, PcgRng, Roster, TurnOutcome};

const MAX_TURNS: u64 = 10_000;

#[test]
fn seeded_battles_end_with_single_survivor() {
    for seed in 0..50 {
        let mut state = BattleState::new(&Roster::standard());
        let mut rng = PcgRng::seeded(seed);

        let winner = BattleEngine::new(&mut state)
            .run_to_completion(&mut rng, MAX_TURNS)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));

        let alive: Vec<_> = state.contestants.iter().filter(|c| c.is_alive()).collect();
        assert_eq!(alive.len(), 1, "seed {seed}");
        assert_eq!(alive[0], &winner);
        assert_eq!(state.winner.as_ref(), Some(&winner));
        assert_eq!(state.log.last().map(|e| e.kind), Some(LogKind::Winner));
    }
}

#[test]
fn same_seed_replays_same_battle() {
    let run = |seed| {
        let mut state = BattleState::new(&Roster::standard());
        let mut rng = PcgRng::seeded(seed);
        let winner = BattleEngine::new(&mut state)
            .run_to_completion(&mut rng, MAX_TURNS)
            .unwrap();
        let messages: Vec<String> = state.log.entries().iter().map(|e| e.message.clone()).collect();
        (winner.thread_id, state.turn, messages)
    };

    assert_eq!(run(77), run(77));
}

#[test]
fn invariants_hold_every_turn() {
    let mut state = BattleState::new(&Roster::standard());
    let mut rng = PcgRng::seeded(31337);
    let ids: Vec<_> = state.contestants.iter().map(|c| c.thread_id).collect();
    let mut previous_alive = state.alive_count();
    let mut previous_log_len = 0;

    loop {
        let outcome = BattleEngine::new(&mut state).execute_turn(&mut rng);

        let current_ids: Vec<_> = state.contestants.iter().map(|c| c.thread_id).collect();
        assert_eq!(current_ids, ids, "ring order must never change");

        for contestant in &state.contestants {
            assert!(contestant.hp.current <= contestant.hp.maximum);
            assert_eq!(contestant.is_alive(), contestant.hp.current > 0);
        }

        let alive = state.alive_count();
        assert!(alive >= 1, "alive count can never reach zero");
        assert!(previous_alive - alive <= 1, "at most one death per turn");
        previous_alive = alive;

        assert!(state.log.len() > previous_log_len, "each turn narrates");
        previous_log_len = state.log.len();

        assert_eq!(state.winner.is_some(), alive == 1);

        if outcome.is_final() {
            assert!(matches!(outcome, TurnOutcome::Decided { .. }));
            break;
        }
        assert!(state.turn < MAX_TURNS);
    }
}

#[test]
fn no_deaths_means_fair_rotation() {
    let roster = Roster::standard().with_max_hp(u32::MAX);
    let mut state = BattleState::new(&roster);
    let mut rng = PcgRng::seeded(3);
    let mut engine = BattleEngine::new(&mut state);

    let attackers: Vec<usize> = (0..60)
        .map(|_| engine.execute_turn(&mut rng).report().unwrap().attacker)
        .collect();

    for cycle in attackers.chunks(6) {
        assert_eq!(cycle, &[0, 1, 2, 3, 4, 5]);
    }
}
