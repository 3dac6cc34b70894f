//! Optional side activities: working for wages and exploring the cave.

/// Job currently offered to the account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkOffer {
    pub gold_per_hour: i32,
    pub experience_per_hour: i32,
    /// Longest shift the server accepts, in hours.
    pub max_hours: i32,
}

impl WorkOffer {
    /// Clamps a requested shift to what the offer allows.
    pub fn clamp_hours(&self, hours: i32) -> i32 {
        hours.clamp(1, self.max_hours.max(1))
    }
}

/// Cave exploration currently offered on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapOffer {
    pub cost: i32,
    pub available: bool,
}

impl MapOffer {
    /// Exploration only runs when it is available and free.
    pub fn is_free(&self) -> bool {
        self.available && self.cost == 0
    }
}
