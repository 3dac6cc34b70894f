//! Errors raised when server-reported values fall outside the known domain.

/// Domain conversion failures.
///
/// These surface while turning raw wire values into the typed enums of this
/// crate; they never originate from decision logic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("unknown adventure difficulty: {0}")]
    UnknownDifficulty(i32),

    #[error("unknown circle node id: {0}")]
    UnknownCircleNode(i32),
}
