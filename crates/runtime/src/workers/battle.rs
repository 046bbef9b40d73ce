//! Battle worker that owns the authoritative [`battle_core::BattleState`].
//!
//! Receives control commands from [`crate::BattleHandle`], runs turns through
//! [`battle_core::BattleEngine`], and publishes snapshots and events.
//!
//! The loop has exactly two suspension points: waiting for a command while
//! idle, paused or finished, and waiting for either a command or the next
//! turn deadline while running. Both wake up as soon as a command arrives, so
//! pause, reset and speed changes never wait for a pending delay to elapse.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use battle_core::{BattleEngine, BattleRng, BattleState, Roster, TurnDelay, TurnOutcome};

use crate::api::{BattleSnapshot, ControlOutcome, Phase};
use crate::events::{ControlEvent, Event, EventBus, TurnEvent};

/// Commands that can be sent to the battle worker
pub enum Command {
    Start {
        reply: oneshot::Sender<ControlOutcome>,
    },
    Pause {
        reply: oneshot::Sender<ControlOutcome>,
    },
    Resume {
        reply: oneshot::Sender<ControlOutcome>,
    },
    /// Rebuild the battle from its roster. Replies after the reset is applied.
    Reset { reply: oneshot::Sender<()> },
    /// Change the inter-turn delay. Replies with the value actually applied.
    SetSpeed {
        millis: u64,
        reply: oneshot::Sender<TurnDelay>,
    },
}

/// Background task that drives the battle loop.
pub struct BattleWorker {
    roster: Roster,
    state: BattleState,
    phase: Phase,
    turn_delay: TurnDelay,
    rng: Box<dyn BattleRng>,
    /// When the last turn finished; the pending wait is measured from here.
    last_turn_at: Option<Instant>,
    /// When the next turn is due. Only honored while running.
    next_turn_at: Option<Instant>,
    /// Highest log id already published on the event bus.
    published_log_id: u64,
    command_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<BattleSnapshot>,
    event_bus: EventBus,
}

impl BattleWorker {
    /// Creates a new battle worker in the idle phase.
    pub fn new(
        roster: Roster,
        turn_delay: TurnDelay,
        rng: Box<dyn BattleRng>,
        command_rx: mpsc::Receiver<Command>,
        snapshot_tx: watch::Sender<BattleSnapshot>,
        event_bus: EventBus,
    ) -> Self {
        let state = BattleState::new(&roster);

        info!(
            contestants = state.contestants.len(),
            turn_delay = %turn_delay,
            "BattleWorker initialized"
        );

        Self {
            roster,
            state,
            phase: Phase::Idle,
            turn_delay,
            rng,
            last_turn_at: None,
            next_turn_at: None,
            published_log_id: 0,
            command_rx,
            snapshot_tx,
            event_bus,
        }
    }

    /// Snapshot of the initial state, used to seed the watch channel.
    pub fn initial_snapshot(roster: &Roster, turn_delay: TurnDelay) -> BattleSnapshot {
        BattleSnapshot::capture(&BattleState::new(roster), Phase::Idle, turn_delay)
    }

    /// Main worker loop. Returns once every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            let deadline = match self.phase {
                Phase::Running => self.next_turn_at,
                _ => None,
            };

            tokio::select! {
                biased;

                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = wait_until(deadline) => self.run_turn(),
            }
        }

        debug!(target: "runtime::worker", "Command channel closed, battle worker stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                let outcome = self.start();
                if reply.send(outcome).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Pause { reply } => {
                let outcome = self.pause();
                if reply.send(outcome).is_err() {
                    debug!("Pause reply channel closed (caller dropped)");
                }
            }
            Command::Resume { reply } => {
                let outcome = self.resume();
                if reply.send(outcome).is_err() {
                    debug!("Resume reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                self.reset();
                if reply.send(()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::SetSpeed { millis, reply } => {
                let applied = self.set_speed(millis);
                if reply.send(applied).is_err() {
                    debug!("SetSpeed reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn start(&mut self) -> ControlOutcome {
        if self.phase != Phase::Idle {
            debug!(target: "runtime::worker", phase = %self.phase, "Start ignored");
            return ControlOutcome::Ignored;
        }

        BattleEngine::new(&mut self.state).announce_start();
        // The first turn runs right away; later turns wait `turn_delay`.
        self.next_turn_at = Some(Instant::now());
        self.transition(Phase::Running);
        ControlOutcome::Applied
    }

    fn pause(&mut self) -> ControlOutcome {
        if self.phase != Phase::Running {
            debug!(target: "runtime::worker", phase = %self.phase, "Pause ignored");
            return ControlOutcome::Ignored;
        }

        BattleEngine::new(&mut self.state).announce_pause();
        self.transition(Phase::Paused);
        ControlOutcome::Applied
    }

    fn resume(&mut self) -> ControlOutcome {
        if self.phase != Phase::Paused {
            debug!(target: "runtime::worker", phase = %self.phase, "Resume ignored");
            return ControlOutcome::Ignored;
        }

        BattleEngine::new(&mut self.state).announce_resume();
        // The pending deadline is kept; if it already passed, the next turn
        // fires immediately.
        self.transition(Phase::Running);
        ControlOutcome::Applied
    }

    fn reset(&mut self) {
        let from = self.phase;

        self.state = BattleState::new(&self.roster);
        self.phase = Phase::Idle;
        self.last_turn_at = None;
        self.next_turn_at = None;
        self.published_log_id = 0;

        info!(from = %from, "Battle reset");

        self.event_bus.publish(Event::Control(ControlEvent::Reset));
        if from != Phase::Idle {
            self.event_bus
                .publish(Event::Control(ControlEvent::PhaseChanged {
                    from,
                    to: Phase::Idle,
                }));
        }
        self.publish_snapshot();
    }

    fn set_speed(&mut self, millis: u64) -> TurnDelay {
        let delay = TurnDelay::clamped(millis);
        if delay.as_millis() != millis {
            warn!(requested = millis, applied = %delay, "Turn delay adjusted to the allowed range");
        }

        self.turn_delay = delay;
        if let (Some(_), Some(last)) = (self.next_turn_at, self.last_turn_at) {
            self.next_turn_at = Some(last + delay.as_duration());
        }

        debug!(target: "runtime::worker", turn_delay = %delay, "Turn delay updated");
        self.event_bus
            .publish(Event::Control(ControlEvent::SpeedChanged { delay }));
        self.publish_snapshot();
        delay
    }

    fn run_turn(&mut self) {
        let outcome = BattleEngine::new(&mut self.state).execute_turn(&mut self.rng);
        let now = Instant::now();

        if let Some(report) = outcome.report() {
            debug!(
                target: "runtime::worker",
                turn = report.turn,
                attacker = %report.result.attacker.thread_id,
                defender = %report.result.defender.thread_id,
                damage = report.result.damage,
                dodged = report.result.dodged,
                critical = report.result.critical,
                "Turn executed"
            );
        }

        self.publish_log();
        if let Some(report) = outcome.report() {
            self.event_bus
                .publish(Event::Turn(TurnEvent::completed(report)));
        }

        match outcome {
            TurnOutcome::Continued(_) => {
                self.last_turn_at = Some(now);
                self.next_turn_at = Some(now + self.turn_delay.as_duration());
                self.publish_snapshot();
            }
            TurnOutcome::Decided { winner, .. } => {
                info!(
                    winner = %winner.name,
                    thread = %winner.thread_id,
                    turns = self.state.turn,
                    "Battle finished"
                );
                self.finish(Some(winner));
            }
            TurnOutcome::Halted => {
                warn!(turn = self.state.turn, "No attacker or defender available, stopping loop");
                self.finish(self.state.winner.clone());
            }
        }
    }

    fn finish(&mut self, winner: Option<battle_core::Contestant>) {
        self.last_turn_at = None;
        self.next_turn_at = None;
        self.event_bus.publish(Event::Turn(TurnEvent::Finished {
            turns: self.state.turn,
            winner,
        }));
        self.transition(Phase::Finished);
    }

    fn transition(&mut self, to: Phase) {
        let from = self.phase;
        self.phase = to;

        info!(from = %from, to = %to, "Battle phase changed");

        self.publish_log();
        self.event_bus
            .publish(Event::Control(ControlEvent::PhaseChanged { from, to }));
        self.publish_snapshot();
    }

    /// Publishes log entries appended since the last call.
    fn publish_log(&mut self) {
        for entry in self.state.log.since(self.published_log_id) {
            self.event_bus.publish(Event::Log(entry.clone()));
        }
        if let Some(last) = self.state.log.last() {
            self.published_log_id = last.id;
        }
    }

    fn publish_snapshot(&self) {
        let snapshot = BattleSnapshot::capture(&self.state, self.phase, self.turn_delay);
        // `send_replace` keeps the value even when nobody is watching.
        self.snapshot_tx.send_replace(snapshot);
    }
}

/// Sleeps until `deadline`, or forever when there is none.
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
