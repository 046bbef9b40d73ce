use std::time::Duration;

use tokio::time::{self, Instant};

use battle_core::{ContestantTemplate, LogKind, ScriptedRng};
use battle_runtime::{
    BattleHandle, BattleRuntime, ControlEvent, ControlOutcome, Event, Phase, RuntimeError, Topic,
};

fn seeded_runtime(seed: u64) -> BattleRuntime {
    BattleRuntime::builder()
        .seed(seed)
        .build()
        .expect("runtime should build")
}

/// Lets the worker process everything that is already due.
async fn settle() {
    time::sleep(Duration::from_millis(1)).await;
}

async fn started(seed: u64) -> (BattleRuntime, BattleHandle, Instant) {
    let runtime = seeded_runtime(seed);
    let handle = runtime.handle();
    assert_eq!(handle.start().await.unwrap(), ControlOutcome::Applied);
    let started_at = Instant::now();
    settle().await;
    (runtime, handle, started_at)
}

#[tokio::test(start_paused = true)]
async fn initial_snapshot_is_idle() {
    let runtime = seeded_runtime(1);
    let snapshot = runtime.handle().snapshot();

    assert_eq!(snapshot.phase, Phase::Idle);
    assert!(!snapshot.running());
    assert!(!snapshot.paused());
    assert_eq!(snapshot.turn, 0);
    assert!(snapshot.log.is_empty());
    assert!(snapshot.winner.is_none());
    assert_eq!(snapshot.attacker_index(), -1);
    assert_eq!(snapshot.defender_index(), -1);
    assert_eq!(snapshot.contestants.len(), 6);
    assert_eq!(snapshot.ready_queue, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(snapshot.turn_delay.as_millis(), 800);
}

#[tokio::test(start_paused = true)]
async fn start_announces_and_runs_first_turn_immediately() {
    let (_runtime, handle, _) = started(7).await;
    let snapshot = handle.snapshot();

    assert_eq!(snapshot.phase, Phase::Running);
    assert!(snapshot.running());
    assert_eq!(snapshot.turn, 1);
    assert_eq!(snapshot.current_attacker, Some(0));
    assert_eq!(snapshot.log[0].kind, LogKind::Info);
    assert_eq!(snapshot.log[1].kind, LogKind::Info);
    assert!(matches!(snapshot.log[2].kind, LogKind::Attack | LogKind::Dodge));
    assert_eq!(snapshot.ready_queue.first(), Some(&1));
}

#[tokio::test(start_paused = true)]
async fn start_while_active_is_ignored() {
    let (_runtime, handle, _) = started(7).await;
    let before = handle.snapshot();

    assert_eq!(handle.start().await.unwrap(), ControlOutcome::Ignored);
    handle.pause().await.unwrap();
    assert_eq!(handle.start().await.unwrap(), ControlOutcome::Ignored);

    let after = handle.snapshot();
    assert_eq!(after.turn, before.turn);
    assert_eq!(after.log.len(), before.log.len() + 1);
}

#[tokio::test(start_paused = true)]
async fn turns_follow_configured_delay() {
    let (_runtime, handle, started_at) = started(11).await;

    time::sleep_until(started_at + Duration::from_millis(700)).await;
    assert_eq!(handle.snapshot().turn, 1);

    time::sleep_until(started_at + Duration::from_millis(900)).await;
    assert_eq!(handle.snapshot().turn, 2);

    time::sleep_until(started_at + Duration::from_millis(1_700)).await;
    assert_eq!(handle.snapshot().turn, 3);
}

#[tokio::test(start_paused = true)]
async fn pause_suspends_and_resume_continues() {
    let (_runtime, handle, _) = started(3).await;

    assert_eq!(handle.pause().await.unwrap(), ControlOutcome::Applied);
    let paused = handle.snapshot();
    assert_eq!(paused.phase, Phase::Paused);
    assert!(paused.running());
    assert!(paused.paused());
    let last = paused.log.last().unwrap();
    assert_eq!(last.kind, LogKind::Info);
    assert_eq!(last.message, "Battle paused. Threads waiting.");

    time::sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().turn, 1, "no turns while paused");

    assert_eq!(handle.pause().await.unwrap(), ControlOutcome::Ignored);
    assert_eq!(handle.resume().await.unwrap(), ControlOutcome::Applied);

    // The pending deadline already passed while paused, so the overdue turn
    // may run before the snapshot is read.
    settle().await;
    let resumed = handle.snapshot();
    assert_eq!(resumed.phase, Phase::Running);
    assert_eq!(resumed.turn, 2);

    let paused_at = paused.log.len();
    let entry = &resumed.log[paused_at];
    assert_eq!(entry.kind, LogKind::Info);
    assert_eq!(entry.message, "Battle resumed. Threads reactivated.");
    assert_eq!(entry.id, last.id + 1);
    assert!(resumed.log.len() > paused_at + 1, "overdue turn logged after resume");

    assert_eq!(handle.resume().await.unwrap(), ControlOutcome::Ignored);
}

#[tokio::test(start_paused = true)]
async fn pause_and_resume_are_ignored_when_idle() {
    let runtime = seeded_runtime(5);
    let handle = runtime.handle();

    assert!(!handle.pause().await.unwrap().is_applied());
    assert!(!handle.resume().await.unwrap().is_applied());
    assert!(handle.snapshot().log.is_empty());
}

#[tokio::test(start_paused = true)]
async fn reset_mid_wait_cancels_pending_turn() {
    let (_runtime, handle, started_at) = started(21).await;

    time::sleep_until(started_at + Duration::from_millis(300)).await;
    handle.reset().await.unwrap();

    let snapshot = handle.snapshot();
    assert!(!snapshot.running());
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.turn, 0);
    assert!(snapshot.log.is_empty());
    assert!(snapshot.winner.is_none());
    assert_eq!(snapshot.current_attacker, None);
    assert!(snapshot.contestants.iter().all(|c| c.hp.current == c.hp.maximum));

    time::sleep_until(started_at + Duration::from_millis(5_000)).await;
    let later = handle.snapshot();
    assert_eq!(later.turn, 0);
    assert!(later.log.is_empty());
}

#[tokio::test(start_paused = true)]
async fn reset_while_paused_returns_to_idle() {
    let (_runtime, handle, _) = started(4).await;
    handle.pause().await.unwrap();

    handle.reset().await.unwrap();
    assert_eq!(handle.snapshot().phase, Phase::Idle);

    time::sleep(Duration::from_secs(5)).await;
    assert!(handle.snapshot().log.is_empty());
}

#[tokio::test(start_paused = true)]
async fn log_ids_restart_after_reset() {
    let (_runtime, handle, _) = started(8).await;
    time::sleep(Duration::from_secs(3)).await;
    assert!(handle.snapshot().log.len() > 3);

    handle.reset().await.unwrap();
    handle.start().await.unwrap();

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.log[0].id, 1);
    assert_eq!(snapshot.log[1].id, 2);
    assert_eq!(snapshot.log[0].kind, LogKind::Info);
    assert_eq!(snapshot.log[1].kind, LogKind::Info);
}

#[tokio::test(start_paused = true)]
async fn log_never_shrinks_while_running() {
    let (_runtime, handle, _) = started(13).await;
    let mut previous = handle.snapshot().log.len();

    for _ in 0..20 {
        time::sleep(Duration::from_millis(400)).await;
        let len = handle.snapshot().log.len();
        assert!(len >= previous);
        previous = len;
    }
}

#[tokio::test(start_paused = true)]
async fn set_speed_clamps_and_snaps() {
    let runtime = seeded_runtime(2);
    let handle = runtime.handle();

    assert_eq!(handle.set_speed(50).await.unwrap().as_millis(), 100);
    assert_eq!(handle.set_speed(5_000).await.unwrap().as_millis(), 2000);
    assert_eq!(handle.set_speed(450).await.unwrap().as_millis(), 500);
    assert_eq!(handle.set_speed(1200).await.unwrap().as_millis(), 1200);
    assert_eq!(handle.snapshot().turn_delay.as_millis(), 1200);
}

#[tokio::test(start_paused = true)]
async fn shortening_speed_rearms_pending_wait() {
    let (_runtime, handle, started_at) = started(17).await;

    time::sleep_until(started_at + Duration::from_millis(100)).await;
    handle.set_speed(300).await.unwrap();

    time::sleep_until(started_at + Duration::from_millis(250)).await;
    assert_eq!(handle.snapshot().turn, 1);

    time::sleep_until(started_at + Duration::from_millis(350)).await;
    assert_eq!(handle.snapshot().turn, 2);
}

#[tokio::test(start_paused = true)]
async fn lengthening_speed_rearms_pending_wait() {
    let (_runtime, handle, started_at) = started(19).await;

    time::sleep_until(started_at + Duration::from_millis(100)).await;
    handle.set_speed(2000).await.unwrap();

    time::sleep_until(started_at + Duration::from_millis(1_500)).await;
    assert_eq!(handle.snapshot().turn, 1);

    time::sleep_until(started_at + Duration::from_millis(2_050)).await;
    assert_eq!(handle.snapshot().turn, 2);
}

#[tokio::test(start_paused = true)]
async fn speed_shortened_below_elapsed_fires_immediately() {
    let (_runtime, handle, started_at) = started(23).await;

    time::sleep_until(started_at + Duration::from_millis(500)).await;
    handle.set_speed(200).await.unwrap();
    settle().await;

    assert_eq!(handle.snapshot().turn, 2);
}

#[tokio::test(start_paused = true)]
async fn seeded_battle_finishes_with_single_survivor() {
    let runtime = seeded_runtime(42);
    let handle = runtime.handle();
    handle.set_speed(100).await.unwrap();
    handle.start().await.unwrap();

    let snapshot = handle.wait_for_finish().await.unwrap();

    let alive: Vec<_> = snapshot.alive().collect();
    assert_eq!(alive.len(), 1);
    assert_eq!(snapshot.winner.as_ref(), Some(alive[0]));
    assert!(!snapshot.running());
    assert_eq!(snapshot.log.last().unwrap().kind, LogKind::Winner);

    assert_eq!(handle.start().await.unwrap(), ControlOutcome::Ignored);

    let turn = snapshot.turn;
    time::sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().turn, turn);
}

#[tokio::test(start_paused = true)]
async fn scripted_duel_applies_expected_damage() {
    let runtime = BattleRuntime::builder()
        .contestants([
            ContestantTemplate::new("Jeferson", 20, 6, 50),
            ContestantTemplate::new("Sekeff", 12, 15, 25),
        ])
        .rng(ScriptedRng::new().with_rolls([60, 50]))
        .build()
        .unwrap();
    let handle = runtime.handle();

    handle.start().await.unwrap();
    settle().await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.contestants[1].hp.current, 95);
    assert!(snapshot.contestants[1].is_alive());
    assert_eq!(snapshot.current_attacker, Some(0));
    assert_eq!(snapshot.current_defender, Some(1));
}

#[tokio::test(start_paused = true)]
async fn invalid_roster_is_rejected_at_build() {
    let result = BattleRuntime::builder()
        .contestants([ContestantTemplate::new("Solo", 1, 1, 1)])
        .build();

    assert!(matches!(result, Err(RuntimeError::Roster(_))));
}

#[tokio::test(start_paused = true)]
async fn events_follow_log_and_phase_changes() {
    let runtime = seeded_runtime(9);
    let handle = runtime.handle();
    let mut log_rx = handle.subscribe(Topic::Log);
    let mut control_rx = handle.subscribe(Topic::Control);

    handle.start().await.unwrap();
    settle().await;

    let mut ids = Vec::new();
    while let Ok(Event::Log(entry)) = log_rx.try_recv() {
        ids.push(entry.id);
    }
    assert!(ids.len() >= 3);
    assert!(ids.windows(2).all(|pair| pair[1] == pair[0] + 1));
    assert_eq!(ids[0], 1);

    match control_rx.try_recv().unwrap() {
        Event::Control(ControlEvent::PhaseChanged { from, to }) => {
            assert_eq!(from, Phase::Idle);
            assert_eq!(to, Phase::Running);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn snapshot_serializes_to_json() {
    let (_runtime, handle, _) = started(6).await;
    let json = serde_json::to_value(handle.snapshot()).unwrap();

    assert_eq!(json["phase"], "running");
    assert_eq!(json["turn"], 1);
    assert_eq!(json["log"][0]["kind"], "info");
    assert_eq!(json["contestants"][0]["alive"], true);
    assert_eq!(json["contestants"][0]["hp"]["current"], 100);
}

#[test]
fn contestant_alive_flag_follows_hp() {
    let defeated = battle_core::Roster::standard().contestants()[1].damaged(1000);

    let json = serde_json::to_value(&defeated).unwrap();
    assert_eq!(json["alive"], false);
    assert_eq!(json["hp"]["current"], 0);

    // A stale flag on input does not override hit points.
    let mut stale = json;
    stale["alive"] = serde_json::Value::Bool(true);
    let parsed: battle_core::Contestant = serde_json::from_value(stale).unwrap();
    assert_eq!(parsed, defeated);
    assert!(!parsed.is_alive());
}

#[tokio::test(start_paused = true)]
async fn shutdown_joins_worker() {
    let runtime = seeded_runtime(1);
    runtime.shutdown().await.unwrap();
}
