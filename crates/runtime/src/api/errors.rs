//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and configuration so clients can
//! bubble them up with consistent context. Battle-over and ignored control
//! requests are not errors; see [`super::ControlOutcome`].
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker stopped publishing snapshots")]
    SnapshotChannelClosed,

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Roster(#[from] battle_core::RosterError),
}
