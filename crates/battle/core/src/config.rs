use std::time::Duration;

/// Battle rule constants and speed bounds.
///
/// The delay actually in effect lives in the runtime configuration; this
/// type only fixes the limits every [`TurnDelay`] is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleConfig;

impl BattleConfig {
    // ===== rules =====
    /// Hit points every contestant starts a battle with.
    pub const STARTING_HP: u32 = 100;
    /// Percentage chance that a landed hit is critical.
    pub const CRITICAL_CHANCE: u32 = 10;
    /// Damage dealt by a landed hit can never go below this value.
    pub const MIN_DAMAGE: u32 = 1;
    /// Dodge chance is a percentage, so speed is capped at 100.
    pub const MAX_SPEED_STAT: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const MIN_SPEED_MS: u64 = 100;
    pub const MAX_SPEED_MS: u64 = 2000;
    pub const SPEED_STEP_MS: u64 = 100;
    pub const DEFAULT_SPEED_MS: u64 = 800;
}

/// Rejected inter-turn delay values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnDelayError {
    #[error("turn delay {millis}ms is outside [{min}, {max}]ms")]
    OutOfRange { millis: u64, min: u64, max: u64 },

    #[error("turn delay {millis}ms is not a multiple of {step}ms")]
    Misaligned { millis: u64, step: u64 },
}

/// Inter-turn delay in milliseconds, always inside
/// [`BattleConfig::MIN_SPEED_MS`]..=[`BattleConfig::MAX_SPEED_MS`] and a
/// multiple of [`BattleConfig::SPEED_STEP_MS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
pub struct TurnDelay(u64);

impl TurnDelay {
    pub const MIN: Self = Self(BattleConfig::MIN_SPEED_MS);
    pub const MAX: Self = Self(BattleConfig::MAX_SPEED_MS);

    /// Strict constructor used at configuration boundaries.
    pub fn try_from_millis(millis: u64) -> Result<Self, TurnDelayError> {
        if !(BattleConfig::MIN_SPEED_MS..=BattleConfig::MAX_SPEED_MS).contains(&millis) {
            return Err(TurnDelayError::OutOfRange {
                millis,
                min: BattleConfig::MIN_SPEED_MS,
                max: BattleConfig::MAX_SPEED_MS,
            });
        }
        if millis % BattleConfig::SPEED_STEP_MS != 0 {
            return Err(TurnDelayError::Misaligned {
                millis,
                step: BattleConfig::SPEED_STEP_MS,
            });
        }
        Ok(Self(millis))
    }

    /// Clamps into range and snaps to the nearest step (halves round up).
    pub fn clamped(millis: u64) -> Self {
        let step = BattleConfig::SPEED_STEP_MS;
        let snapped = millis.saturating_add(step / 2) / step * step;
        Self(snapped.clamp(BattleConfig::MIN_SPEED_MS, BattleConfig::MAX_SPEED_MS))
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for TurnDelay {
    fn default() -> Self {
        Self(BattleConfig::DEFAULT_SPEED_MS)
    }
}

impl TryFrom<u64> for TurnDelay {
    type Error = TurnDelayError;

    fn try_from(millis: u64) -> Result<Self, Self::Error> {
        Self::try_from_millis(millis)
    }
}

impl From<TurnDelay> for u64 {
    fn from(delay: TurnDelay) -> Self {
        delay.0
    }
}

impl std::fmt::Display for TurnDelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
