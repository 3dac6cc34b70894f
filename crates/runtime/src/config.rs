//! Engine configuration.
use std::time::Duration;

use game_core::{AdventureStrategy, Attribute, CircleNodeKind, Difficulty, Priority};

/// How an upgrade check chooses what to buy.
///
/// Pinning and automatic selection exclude each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradePolicy<T> {
    Disabled,
    Pinned(T),
    Auto,
}

impl<T> UpgradePolicy<T> {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl<T> Default for UpgradePolicy<T> {
    fn default() -> Self {
        Self::Disabled
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub circle: UpgradePolicy<CircleNodeKind>,
    pub attributes: UpgradePolicy<Attribute>,
    pub priority: Priority,
    /// Spend gems on adventures once the free ones are gone.
    pub use_gems: bool,
    /// Opponents above this level are skipped.
    pub max_attack_level: Option<i32>,
    pub max_difficulty: Difficulty,
    pub strategy: AdventureStrategy,
    pub auto_work: bool,
    pub auto_map: bool,
    /// Opponent lookups allowed in one attack check.
    pub max_opponent_lookups: u32,
    pub timing: EngineTiming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            circle: UpgradePolicy::Disabled,
            attributes: UpgradePolicy::Disabled,
            priority: Priority::default(),
            use_gems: false,
            max_attack_level: None,
            max_difficulty: Difficulty::default(),
            strategy: AdventureStrategy::default(),
            auto_work: false,
            auto_map: false,
            max_opponent_lookups: 50,
            timing: EngineTiming::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EngineTiming {
    /// Pause between ticks.
    pub tick_interval: Duration,
    /// Pause before every opponent lookup.
    pub attack_pause: Duration,
    /// Extra wait after a tick aborted by network trouble.
    pub error_backoff: Duration,
}

impl Default for EngineTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(30),
            attack_pause: Duration::from_secs(1),
            error_backoff: Duration::from_secs(120),
        }
    }
}
