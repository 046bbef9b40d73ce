//! Plain-text rendering of log entries and the final result.
use std::fmt;

use battle_core::{Contestant, LogEntry, LogKind};
use battle_runtime::BattleSnapshot;

/// One log line: `[HH:MM:SS.mmm] kind    message`.
pub fn format_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:<7} {}",
        entry.timestamp.format("%H:%M:%S%.3f"),
        entry.kind.as_ref(),
        entry.message
    )
}

/// End-of-battle standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub turns: u64,
    pub winner: Option<Contestant>,
    pub standings: Vec<Contestant>,
    pub deaths: usize,
}

impl Summary {
    pub fn from_snapshot(snapshot: &BattleSnapshot) -> Self {
        let mut standings = snapshot.contestants.clone();
        // Highest hp first; ties keep roster order.
        standings.sort_by(|a, b| b.hp.current.cmp(&a.hp.current));

        Self {
            turns: snapshot.turn,
            winner: snapshot.winner.clone(),
            standings,
            deaths: snapshot
                .log
                .iter()
                .filter(|entry| entry.kind == LogKind::Death)
                .count(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.winner {
            Some(winner) => writeln!(
                f,
                "Winner: [{}] {} after {} turns",
                winner.thread_id, winner.name, self.turns
            )?,
            None => writeln!(f, "No winner after {} turns", self.turns)?,
        }
        writeln!(f, "Eliminated: {}", self.deaths)?;

        for contestant in &self.standings {
            let status = if contestant.is_alive() { "alive" } else { "dead" };
            writeln!(
                f,
                "  [{}] {:<8} HP {:>7}  {}",
                contestant.thread_id,
                contestant.name,
                contestant.hp.to_string(),
                status
            )?;
        }
        Ok(())
    }
}
