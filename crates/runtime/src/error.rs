//! Engine errors and their classification for the outer loop.
use client_core::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Tick phase in which a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    Account,
    Adventure,
    Map,
    Work,
    Attack,
    Circle,
    Attributes,
}

#[derive(Debug, Error)]
#[error("{step} check failed")]
pub struct EngineError {
    pub step: Step,
    #[source]
    pub source: ClientError,
}

impl EngineError {
    pub fn new(step: Step, source: ClientError) -> Self {
        Self { step, source }
    }

    /// Aborts the tick and delays the next one.
    pub fn is_transient_network(&self) -> bool {
        self.source.is_transient_network()
    }

    /// Ends the run; nothing short of operator action fixes it.
    pub fn is_fatal(&self) -> bool {
        self.source.is_session_invalid()
    }
}
