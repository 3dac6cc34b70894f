//! Best reward rate first.

use super::{AdventureRanking, Priority, per_minute};
use crate::adventure::Adventure;

/// Ranks by reward per minute of adventure time.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxPerMinuteStrategy;

impl AdventureRanking for MaxPerMinuteStrategy {
    fn score(&self, adventure: &Adventure, priority: Priority) -> f64 {
        per_minute(priority.metric(adventure), adventure)
    }

    fn name(&self) -> &'static str {
        "Max per minute"
    }
}
