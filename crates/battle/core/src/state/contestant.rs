//! Contestant value type.
//!
//! A contestant is the schedulable unit of the battle. Updates never happen
//! in place: the engine derives a new value and swaps it into its slot, so
//! snapshots handed to observers stay valid without synchronization.

use super::{ResourceMeter, ThreadId};

/// Base attributes of a contestant before it joins a roster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContestantStats {
    pub attack: u32,
    pub defense: u32,
    /// Dodge chance in percent (0-100).
    pub speed: u32,
}

impl ContestantStats {
    pub const fn new(attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            attack,
            defense,
            speed,
        }
    }
}

/// Participant in the battle.
///
/// Serialized form carries a derived `alive` flag next to the hit points; it
/// is ignored on input since liveness always follows `hp`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "ContestantRecord", from = "ContestantRecord")
)]
pub struct Contestant {
    pub thread_id: ThreadId,
    pub name: String,
    pub stats: ContestantStats,
    pub hp: ResourceMeter,
}

impl Contestant {
    pub fn new(
        thread_id: ThreadId,
        name: impl Into<String>,
        stats: ContestantStats,
        max_hp: u32,
    ) -> Self {
        Self {
            thread_id,
            name: name.into(),
            stats,
            hp: ResourceMeter::full(max_hp),
        }
    }

    /// Builder-style override of current hit points, clamped to the maximum.
    #[must_use]
    pub fn with_hp(mut self, current: u32) -> Self {
        self.hp = ResourceMeter::new(current, self.hp.maximum);
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    #[inline]
    pub fn attack(&self) -> u32 {
        self.stats.attack
    }

    #[inline]
    pub fn defense(&self) -> u32 {
        self.stats.defense
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.stats.speed
    }

    /// Returns this contestant after taking `damage`.
    ///
    /// Hit points saturate at zero and liveness follows hit points.
    #[must_use]
    pub fn damaged(&self, damage: u32) -> Self {
        Self {
            hp: self.hp.depleted_by(damage),
            ..self.clone()
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ContestantRecord {
    thread_id: ThreadId,
    name: String,
    stats: ContestantStats,
    hp: ResourceMeter,
    #[serde(default)]
    alive: bool,
}

#[cfg(feature = "serde")]
impl From<Contestant> for ContestantRecord {
    fn from(contestant: Contestant) -> Self {
        Self {
            alive: contestant.is_alive(),
            thread_id: contestant.thread_id,
            name: contestant.name,
            stats: contestant.stats,
            hp: contestant.hp,
        }
    }
}

#[cfg(feature = "serde")]
impl From<ContestantRecord> for Contestant {
    fn from(record: ContestantRecord) -> Self {
        Self {
            thread_id: record.thread_id,
            name: record.name,
            stats: record.stats,
            hp: record.hp,
        }
    }
}
