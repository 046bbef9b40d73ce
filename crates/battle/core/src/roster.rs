//! Contestant roster.
//!
//! A roster is the fixed template a battle is built from. Resetting a battle
//! rebuilds its contestants from the same roster with full hit points.

use crate::config::BattleConfig;
use crate::state::{Contestant, ContestantStats, ThreadId};

/// Named base attributes used to build a contestant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContestantTemplate {
    pub name: String,
    pub stats: ContestantStats,
}

impl ContestantTemplate {
    pub fn new(name: impl Into<String>, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            name: name.into(),
            stats: ContestantStats::new(attack, defense, speed),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("a battle needs at least two contestants, got {count}")]
    TooFewContestants { count: usize },

    #[error("contestant {name} has speed {speed}, dodge chance cannot exceed {max}%")]
    SpeedOutOfRange { name: String, speed: u32, max: u32 },
}

/// Ordered contestant templates; position in the roster becomes the thread id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    templates: Vec<ContestantTemplate>,
    max_hp: u32,
}

impl Roster {
    /// The six standard contestants, in declaration order.
    pub fn standard() -> Self {
        Self {
            templates: vec![
                ContestantTemplate::new("Maykol", 18, 8, 35),
                ContestantTemplate::new("Sekeff", 12, 15, 25),
                ContestantTemplate::new("Iallen", 14, 10, 45),
                ContestantTemplate::new("Jivago", 16, 12, 30),
                ContestantTemplate::new("Maylon", 10, 18, 40),
                ContestantTemplate::new("Jeferson", 20, 6, 50),
            ],
            max_hp: BattleConfig::STARTING_HP,
        }
    }

    pub fn from_templates(
        templates: impl IntoIterator<Item = ContestantTemplate>,
    ) -> Result<Self, RosterError> {
        let templates: Vec<_> = templates.into_iter().collect();

        if templates.len() < 2 {
            return Err(RosterError::TooFewContestants {
                count: templates.len(),
            });
        }

        if let Some(template) = templates
            .iter()
            .find(|t| t.stats.speed > BattleConfig::MAX_SPEED_STAT)
        {
            return Err(RosterError::SpeedOutOfRange {
                name: template.name.clone(),
                speed: template.stats.speed,
                max: BattleConfig::MAX_SPEED_STAT,
            });
        }

        Ok(Self {
            templates,
            max_hp: BattleConfig::STARTING_HP,
        })
    }

    /// Overrides the starting hit points (at least 1).
    #[must_use]
    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn templates(&self) -> &[ContestantTemplate] {
        &self.templates
    }

    /// Builds fresh contestants at full health, thread ids `0..len`.
    pub fn contestants(&self) -> Vec<Contestant> {
        self.templates
            .iter()
            .enumerate()
            .map(|(index, template)| {
                Contestant::new(
                    ThreadId(index as u32),
                    template.name.clone(),
                    template.stats.clone(),
                    self.max_hp,
                )
            })
            .collect()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}
