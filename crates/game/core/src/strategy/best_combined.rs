//! Rate weighted by size.

use super::{AdventureRanking, Priority, per_minute};
use crate::adventure::Adventure;

/// Ranks by reward times reward-per-minute.
///
/// Favours adventures that are both efficient and large, so a short trip
/// with a tiny payout does not beat a long one that pays far more.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestCombinedStrategy;

impl AdventureRanking for BestCombinedStrategy {
    fn score(&self, adventure: &Adventure, priority: Priority) -> f64 {
        let metric = priority.metric(adventure);
        f64::from(metric) * per_minute(metric, adventure)
    }

    fn name(&self) -> &'static str {
        "Best combined"
    }
}
