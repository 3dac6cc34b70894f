//! Adventure catalog and the four shapes an adventure fetch can take.

use crate::error::GameError;

/// Adventure difficulty tier.
///
/// The discriminants are the server's wire values. Ordering follows the
/// discriminants, so `difficulty <= max` is the eligibility check.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy = -1,
    Medium = 0,
    #[default]
    Difficult = 1,
    VeryDifficult = 2,
}

impl Difficulty {
    /// Wire value of this tier.
    pub const fn value(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Difficulty {
    type Error = GameError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Easy),
            0 => Ok(Self::Medium),
            1 => Ok(Self::Difficult),
            2 => Ok(Self::VeryDifficult),
            other => Err(GameError::UnknownDifficulty(other)),
        }
    }
}

/// One offered adventure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Adventure {
    pub difficulty: Difficulty,
    /// Duration in seconds.
    pub duration: i32,
    pub experience: i32,
    /// Chance of a fight, in percent.
    pub fight_chance: i32,
    pub gold: i32,
    pub quest_id: i32,
}

/// Adventures on offer plus the daily allowance counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdventureCatalog {
    pub made_today: i32,
    pub free_per_day: i32,
    pub adventures: Vec<Adventure>,
}

impl AdventureCatalog {
    /// Whether today's free adventures are still available.
    ///
    /// The counters are only compared; the server owns them.
    pub fn has_free_adventures(&self) -> bool {
        self.made_today < self.free_per_day
    }
}

/// An adventure currently underway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunningAdventure {
    pub id: Option<i32>,
    pub seconds_remaining: i32,
    pub seconds_total: Option<i32>,
}

/// Rewards reported for an adventure that just finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdventureReport {
    pub won: bool,
    pub experience: i32,
    pub gold: i32,
    pub item_found: bool,
    pub gems: i32,
}

/// Result of an adventure fetch.
///
/// The wire format carries no type tag; the codec decides the variant once
/// from which keys are present, and callers match on this enum only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdventureOutcome {
    /// The account is working; no adventure details are available.
    Busy,
    /// An adventure is in progress.
    Running(RunningAdventure),
    /// No adventure is running; these can be started.
    Catalog(AdventureCatalog),
    /// An adventure completed and its rewards were reported.
    Completed(AdventureReport),
}
