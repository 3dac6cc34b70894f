use game_core::CombatTarget;

/// Per-account state carried across ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Opponent being robbed repeatedly.
    pub target: Option<CombatTarget>,
    /// Gold stolen from the current target so far.
    pub stolen_gold: i64,
    /// Today's free adventures are used up and gems may not be spent.
    pub adventures_exhausted: bool,
    pub working: bool,
    pub in_adventure: bool,
}

impl EngineState {
    pub(super) fn drop_target(&mut self) {
        self.target = None;
        self.stolen_gold = 0;
    }
}
