//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`BattleHandle`] hides channel plumbing and offers async helpers for the
//! control operations plus read access to the latest snapshot and the event
//! stream. Callers never touch battle state directly.
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use battle_core::TurnDelay;

use super::errors::{Result, RuntimeError};
use super::snapshot::{BattleSnapshot, ControlOutcome, Phase};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with a running battle
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<BattleSnapshot>,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        snapshot_rx: watch::Receiver<BattleSnapshot>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            command_tx,
            snapshot_rx,
            event_bus,
        }
    }

    /// `Idle -> Running`. Ignored while a loop is already active or finished.
    pub async fn start(&self) -> Result<ControlOutcome> {
        self.request(|reply| Command::Start { reply }).await
    }

    /// `Running -> Paused`.
    pub async fn pause(&self) -> Result<ControlOutcome> {
        self.request(|reply| Command::Pause { reply }).await
    }

    /// `Paused -> Running`.
    pub async fn resume(&self) -> Result<ControlOutcome> {
        self.request(|reply| Command::Resume { reply }).await
    }

    /// Tears the battle down and rebuilds it from the roster.
    ///
    /// Resolves once the worker has applied the reset; no turn is processed
    /// after this returns until [`start`](Self::start) is called again.
    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Changes the inter-turn delay and returns the value actually applied.
    ///
    /// Out-of-range values are clamped to [100, 2000] ms and snapped to the
    /// nearest 100 ms. A wait already in progress is re-armed with the new
    /// delay, measured from the end of the previous turn.
    pub async fn set_speed(&self, millis: u64) -> Result<TurnDelay> {
        self.request(|reply| Command::SetSpeed { millis, reply }).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> BattleSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that is notified whenever a new snapshot is published.
    pub fn watch_snapshots(&self) -> watch::Receiver<BattleSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Waits until the battle reaches [`Phase::Finished`] and returns that
    /// snapshot.
    pub async fn wait_for_finish(&self) -> Result<BattleSnapshot> {
        let mut rx = self.snapshot_rx.clone();
        let snapshot = rx
            .wait_for(|snapshot| snapshot.phase == Phase::Finished)
            .await
            .map_err(|_| RuntimeError::SnapshotChannelClosed)?;
        Ok(snapshot.clone())
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Log` - Battle log entries as they are appended
    /// - `Topic::Turn` - Turn completion and battle end
    /// - `Topic::Control` - Phase and speed changes, resets
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use battle_runtime::{Event, Topic};
    ///
    /// let mut log_rx = handle.subscribe(Topic::Log);
    /// while let Ok(Event::Log(entry)) = log_rx.recv().await {
    ///     println!("{}", entry.message);
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
