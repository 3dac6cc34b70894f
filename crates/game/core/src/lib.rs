//! Account snapshots and pure decision helpers shared across the bot.
//!
//! `game-core` defines the typed view of what the game server reports
//! (account totals, adventures, opponents, circle nodes, attributes, offers)
//! and the side-effect free helpers the decision engine consults: adventure
//! ranking in [`strategy`], circle target levels in [`circle`] and attribute
//! selection in [`attributes`]. Nothing here performs I/O.
pub mod account;
pub mod adventure;
pub mod attributes;
pub mod circle;
pub mod combat;
pub mod error;
pub mod offers;
pub mod strategy;

pub use account::AccountSnapshot;
pub use adventure::{
    Adventure, AdventureCatalog, AdventureOutcome, AdventureReport, Difficulty, RunningAdventure,
};
pub use attributes::{Attribute, AttributeSet, AttributeStats};
pub use circle::{CORE_NODE_LEVEL_CAP, CircleNode, CircleNodeKind};
pub use combat::{AttackOutcome, CombatReport, CombatTarget, PvpStatus};
pub use error::GameError;
pub use offers::{MapOffer, WorkOffer};
pub use strategy::{AdventureRanking, AdventureStrategy, Priority};
