//! Largest reward first.

use super::{AdventureRanking, Priority};
use crate::adventure::Adventure;

/// Ranks by the raw reward, ignoring how long the adventure takes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxValueStrategy;

impl AdventureRanking for MaxValueStrategy {
    fn score(&self, adventure: &Adventure, priority: Priority) -> f64 {
        f64::from(priority.metric(adventure))
    }

    fn name(&self) -> &'static str {
        "Max value"
    }
}
