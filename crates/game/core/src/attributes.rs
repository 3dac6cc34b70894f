//! Character attributes and the automatic raise policy.

use std::collections::BTreeMap;

/// Cost above which automatic mode starts favouring Intelligence.
const INTELLIGENCE_BIAS_COST: i32 = 2000;

/// Raisable character attribute, serialized as the server's three-letter code.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Attribute {
    #[strum(serialize = "CON")]
    Constitution,
    #[strum(serialize = "STR")]
    Strength,
    #[strum(serialize = "DEX")]
    Dexterity,
    #[strum(serialize = "INT")]
    Intelligence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeStats {
    /// Gold needed for the next point.
    pub cost: i32,
    pub base: i32,
}

/// Costs and base values for every attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    stats: BTreeMap<Attribute, AttributeStats>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: Attribute, stats: AttributeStats) -> Self {
        self.insert(attribute, stats);
        self
    }

    pub fn insert(&mut self, attribute: Attribute, stats: AttributeStats) {
        self.stats.insert(attribute, stats);
    }

    pub fn get(&self, attribute: Attribute) -> Option<AttributeStats> {
        self.stats.get(&attribute).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, AttributeStats)> + '_ {
        self.stats.iter().map(|(attribute, stats)| (*attribute, *stats))
    }

    /// Picks the attribute automatic mode should raise next.
    ///
    /// Normally the cheapest one. Once the cheapest costs at least 2000 and
    /// twice its cost reaches Intelligence's cost, Intelligence is chosen
    /// instead.
    pub fn auto_target(&self) -> Option<(Attribute, AttributeStats)> {
        let cheapest = self.iter().min_by_key(|(_, stats)| stats.cost)?;

        match self.get(Attribute::Intelligence) {
            Some(intelligence)
                if cheapest.1.cost >= INTELLIGENCE_BIAS_COST
                    && cheapest.1.cost.saturating_mul(2) >= intelligence.cost =>
            {
                Some((Attribute::Intelligence, intelligence))
            }
            _ => Some(cheapest),
        }
    }
}
