//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Snapshots remain the authoritative view; events are a
//! best-effort stream on top of them.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ControlEvent, TurnEvent};
