//! Adventure ranking strategies.
//!
//! Every strategy scores adventures on one metric, gold or experience, picked
//! by [`Priority`] independently of the strategy. Ranking is a stable sort by
//! descending score, so equal scores keep their catalog order. Strategies
//! never exclude anything; difficulty filtering happens in [`AdventureStrategy::pick`].

pub mod best_combined;
pub mod max_per_minute;
pub mod max_value;

pub use best_combined::BestCombinedStrategy;
pub use max_per_minute::MaxPerMinuteStrategy;
pub use max_value::MaxValueStrategy;

use crate::adventure::{Adventure, Difficulty};

/// Reward the ranking optimises for.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Priority {
    Gold,
    #[default]
    Experience,
}

impl Priority {
    /// The reward this priority reads from an adventure.
    pub fn metric(self, adventure: &Adventure) -> i32 {
        match self {
            Self::Gold => adventure.gold,
            Self::Experience => adventure.experience,
        }
    }
}

/// Metric earned per minute of adventuring.
///
/// Durations are seconds; a non-positive duration counts as one second.
pub(crate) fn per_minute(metric: i32, adventure: &Adventure) -> f64 {
    let minutes = f64::from(adventure.duration.max(1)) / 60.0;
    f64::from(metric) / minutes
}

/// Scoring rule for adventures.
pub trait AdventureRanking {
    /// Higher scores rank first.
    fn score(&self, adventure: &Adventure, priority: Priority) -> f64;

    fn name(&self) -> &'static str;

    /// Orders adventures by descending score, keeping catalog order on ties.
    fn rank<'a>(&self, adventures: &'a [Adventure], priority: Priority) -> Vec<&'a Adventure> {
        let mut scored: Vec<(f64, &Adventure)> = adventures
            .iter()
            .map(|adventure| (self.score(adventure, priority), adventure))
            .collect();
        scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
        scored.into_iter().map(|(_, adventure)| adventure).collect()
    }
}

/// Built-in ranking strategies, selectable from configuration.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AdventureStrategy {
    #[default]
    MaxValue,
    MaxPerMinute,
    BestCombined,
}

impl AdventureStrategy {
    pub fn ranking(self) -> &'static dyn AdventureRanking {
        match self {
            Self::MaxValue => &MaxValueStrategy,
            Self::MaxPerMinute => &MaxPerMinuteStrategy,
            Self::BestCombined => &BestCombinedStrategy,
        }
    }

    pub fn rank<'a>(self, adventures: &'a [Adventure], priority: Priority) -> Vec<&'a Adventure> {
        self.ranking().rank(adventures, priority)
    }

    /// Best-ranked adventure whose difficulty does not exceed `max_difficulty`.
    pub fn pick(
        self,
        adventures: &[Adventure],
        priority: Priority,
        max_difficulty: Difficulty,
    ) -> Option<&Adventure> {
        self.rank(adventures, priority)
            .into_iter()
            .find(|adventure| adventure.difficulty <= max_difficulty)
    }
}
