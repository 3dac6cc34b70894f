//! Decision engine driving one game account.
//!
//! The engine polls the account on a fixed cadence and, on every tick, runs
//! independent checks in a fixed order:
//! adventure, map, work, attack, circle, attributes.
//! Each check issues at most one kind of mutation per tick; the upgrade
//! checks repeat their single mutation while gold allows.
//!
//! - [`config`] holds what the engine does and how often
//! - [`engine`] hosts [`DecisionEngine`] and its per-account state
//! - [`error`] classifies failures for the outer loop
pub mod config;
pub mod engine;
pub mod error;

pub use config::{EngineConfig, EngineTiming, UpgradePolicy};
pub use engine::{DecisionEngine, EngineState, work_hours};
pub use error::{EngineError, Result, Step};
