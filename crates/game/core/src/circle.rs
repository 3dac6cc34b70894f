//! Evocation circle: sixteen upgrade slots gated by the demon skull.
//!
//! The skull is the core node. Its level `L` sets the target level of every
//! other node, and once it reaches [`CORE_NODE_LEVEL_CAP`] automatic upgrading
//! stops until an operator steps in.

use crate::error::GameError;

/// Level at which the core node blocks further scheduling.
pub const CORE_NODE_LEVEL_CAP: i32 = 10;

/// Identity of a circle slot. Discriminants are the server's node ids.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CircleNodeKind {
    Amethyst = 1,
    Amber = 2,
    Topaz = 3,
    Ruby = 4,
    Emerald = 5,
    Sapphire = 6,
    Aquamarine = 7,
    Jade = 8,
    TigersEye = 9,
    Diamond = 10,
    RuneOfCourage = 11,
    RuneOfDiligence = 12,
    RuneOfWisdom = 13,
    RuneOfNegotiation = 14,
    RuneOfGlory = 15,
    DemonSkull = 16,
}

impl CircleNodeKind {
    /// The core node.
    pub const CORE: Self = Self::DemonSkull;

    /// Order in which automatic mode considers nodes. The core node comes last
    /// so companions reach their targets before the skull raises them.
    pub const AUTO_PRIORITY: [Self; 16] = [
        Self::Jade,
        Self::Amethyst,
        Self::Amber,
        Self::Sapphire,
        Self::RuneOfCourage,
        Self::RuneOfDiligence,
        Self::RuneOfWisdom,
        Self::RuneOfNegotiation,
        Self::RuneOfGlory,
        Self::Ruby,
        Self::Emerald,
        Self::Aquamarine,
        Self::TigersEye,
        Self::Diamond,
        Self::Topaz,
        Self::DemonSkull,
    ];

    /// Server node id.
    pub const fn id(self) -> i32 {
        self as i32
    }

    pub const fn effect(self) -> &'static str {
        match self {
            Self::Amethyst => "More gold in adventures",
            Self::Amber => "Higher wages",
            Self::Topaz => "Inventory slot every 10 refinement grades",
            Self::Ruby => "Potion effectiveness",
            Self::Emerald => "Better prices when selling to Merchant",
            Self::Sapphire => "Fame earned",
            Self::Aquamarine => "Potion duration",
            Self::Jade => "Experience earned",
            Self::TigersEye => "Travel speed",
            Self::Diamond => "Cheaper Alchemist and Merchant items",
            Self::RuneOfCourage => "Strength",
            Self::RuneOfDiligence => "Dexterity",
            Self::RuneOfWisdom => "Constitution",
            Self::RuneOfNegotiation => "Intelligence",
            Self::RuneOfGlory => "Loot chance on adventures",
            Self::DemonSkull => "Many",
        }
    }

    pub const fn is_rune(self) -> bool {
        matches!(
            self,
            Self::RuneOfCourage
                | Self::RuneOfDiligence
                | Self::RuneOfWisdom
                | Self::RuneOfNegotiation
                | Self::RuneOfGlory
        )
    }

    /// Level this node should reach while the core node sits at `core_level`.
    pub const fn target_level(self, core_level: i32) -> i32 {
        match self {
            Self::Jade => (core_level + 2) * 100,
            Self::DemonSkull => core_level + 1,
            kind if kind.is_rune() => (core_level + 1) * 10,
            _ => (core_level + 1) * 100,
        }
    }
}

impl TryFrom<i32> for CircleNodeKind {
    type Error = GameError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        use strum::IntoEnumIterator;

        Self::iter()
            .find(|kind| kind.id() == id)
            .ok_or(GameError::UnknownCircleNode(id))
    }
}

/// Current state of one circle slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircleNode {
    pub kind: CircleNodeKind,
    pub level: i32,
    pub max_level: i32,
    pub gold_price: i32,
    pub effect_power: i32,
}

impl CircleNode {
    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    fn below_target(&self, core_level: i32) -> bool {
        self.level < self.kind.target_level(core_level) && !self.is_maxed()
    }
}

/// Finds the core node in a circle listing.
pub fn core_node(nodes: &[CircleNode]) -> Option<&CircleNode> {
    find_node(nodes, CircleNodeKind::CORE)
}

pub fn find_node(nodes: &[CircleNode], kind: CircleNodeKind) -> Option<&CircleNode> {
    nodes.iter().find(|node| node.kind == kind)
}

/// Picks the next node automatic mode should buy.
///
/// Walks [`CircleNodeKind::AUTO_PRIORITY`] and returns the first node still
/// below both its target level and its own max level.
pub fn auto_target(nodes: &[CircleNode]) -> Option<&CircleNode> {
    let core_level = core_node(nodes)?.level;

    CircleNodeKind::AUTO_PRIORITY
        .iter()
        .filter_map(|&kind| find_node(nodes, kind))
        .find(|node| node.below_target(core_level))
}
