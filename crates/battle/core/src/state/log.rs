//! Append-only battle narration.

use chrono::{DateTime, Utc};

/// Category of a log entry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogKind {
    Attack,
    Dodge,
    Death,
    Winner,
    Info,
}

/// Single narrated event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Battle-scoped sequence number, starting at 1.
    pub id: u64,
    pub message: String,
    pub kind: LogKind,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only sequence of [`LogEntry`] values.
///
/// Entry ids come from a counter owned by the log itself, so two battles never
/// share a sequence. Insertion order is event order; timestamps are
/// informational only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: Vec<LogEntry>,
    last_id: u64,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new entry stamped with the current time.
    pub fn append(&mut self, message: impl Into<String>, kind: LogKind) -> &LogEntry {
        self.last_id += 1;
        let index = self.entries.len();
        self.entries.push(LogEntry {
            id: self.last_id,
            message: message.into(),
            kind,
            timestamp: Utc::now(),
        });
        &self.entries[index]
    }

    /// Drops every entry and restarts the id sequence.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.last_id = 0;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Entries appended after the entry with id `after` (exclusive).
    pub fn since(&self, after: u64) -> &[LogEntry] {
        let start = self.entries.partition_point(|entry| entry.id <= after);
        &self.entries[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut log = BattleLog::new();
        assert_eq!(log.append("a", LogKind::Info).id, 1);
        assert_eq!(log.append("b", LogKind::Attack).id, 2);
        assert_eq!(log.append("c", LogKind::Death).id, 3);

        let ids: Vec<u64> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn reset_clears_entries_and_counter() {
        let mut log = BattleLog::new();
        log.append("a", LogKind::Info);
        log.append("b", LogKind::Info);

        log.reset();
        assert!(log.is_empty());
        assert_eq!(log.append("c", LogKind::Info).id, 1);
    }

    #[test]
    fn independent_logs_do_not_share_ids() {
        let mut first = BattleLog::new();
        let mut second = BattleLog::new();
        first.append("a", LogKind::Info);
        first.append("b", LogKind::Info);

        assert_eq!(second.append("c", LogKind::Info).id, 1);
    }

    #[test]
    fn since_returns_tail_after_id() {
        let mut log = BattleLog::new();
        for _ in 0..5 {
            log.append("x", LogKind::Info);
        }
        let tail: Vec<u64> = log.since(3).iter().map(|e| e.id).collect();
        assert_eq!(tail, vec![4, 5]);
        assert_eq!(log.since(0).len(), 5);
        assert!(log.since(5).is_empty());
    }

    #[test]
    fn kind_renders_snake_case() {
        assert_eq!(LogKind::Winner.to_string(), "winner");
        assert_eq!("DODGE".parse::<LogKind>().unwrap(), LogKind::Dodge);
    }
}
