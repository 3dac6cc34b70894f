//! Client abstraction traits.
//!
//! - Layer 0: `Transport`, `SessionProvider` (pure infrastructure)
//! - Layer 1: `GameApi` (game domain)

use async_trait::async_trait;
use game_core::{
    AccountSnapshot, AdventureOutcome, AttackOutcome, Attribute, AttributeSet, CircleNode,
    CircleNodeKind, MapOffer, PvpStatus, WorkOffer,
};

use crate::error::ClientError;

// ============================================================================
// Error Types
// ============================================================================

/// Transport layer errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Timeouts and dropped connections. Retried by the client.
    #[error("transient network failure: {0}")]
    Transient(String),

    /// The server answered but refused service (HTTP 503).
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("transport failure: {0}")]
    Fatal(String),
}

impl TransportError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Session acquisition errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no session id found in game page")]
    NotFound,

    #[error("session provider failed: {0}")]
    Provider(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

// ============================================================================
// Layer 0: Pure Infrastructure
// ============================================================================

/// Moves request bodies to the game server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request body with the given session cookie and returns the
    /// raw response body.
    async fn send(&self, body: &str, cookie: &str) -> Result<String, TransportError>;
}

/// Obtains session tokens from a long-lived credential.
///
/// May be called at any point mid-tick, so implementations must not hold
/// state that a concurrent refresh could corrupt.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn refresh(&self, credential: &str) -> Result<String, SessionError>;
}

// ============================================================================
// Layer 1: Game Domain
// ============================================================================

/// Typed game operations the decision engine drives.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn account(&self) -> Result<AccountSnapshot, ClientError>;

    async fn adventures(&self) -> Result<AdventureOutcome, ClientError>;

    async fn start_adventure(&self, quest_id: i32) -> Result<(), ClientError>;

    async fn pvp_status(&self) -> Result<PvpStatus, ClientError>;

    /// Attacks the named opponent. `None` when the opponent no longer exists.
    async fn fight(&self, opponent: &str) -> Result<Option<AttackOutcome>, ClientError>;

    async fn circle(&self) -> Result<Vec<CircleNode>, ClientError>;

    /// Buys one level of a circle node with gold.
    async fn buy_circle_node(&self, node: CircleNodeKind) -> Result<(), ClientError>;

    async fn attributes(&self) -> Result<AttributeSet, ClientError>;

    async fn raise_attribute(&self, attribute: Attribute) -> Result<(), ClientError>;

    async fn work_offer(&self) -> Result<Option<WorkOffer>, ClientError>;

    async fn start_work(&self, hours: i32) -> Result<(), ClientError>;

    async fn map_offer(&self) -> Result<Option<MapOffer>, ClientError>;

    async fn explore_map(&self) -> Result<(), ClientError>;
}
