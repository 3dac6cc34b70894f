//! Client layer between the decision engine and the game server.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: GameApi (typed game operations)
//!          └── GameClient (retry + session refresh)
//!
//! Layer 0: Transport, SessionProvider (pure infrastructure)
//! ```
//!
//! `Transport` moves raw bodies and knows nothing about the game.
//! `SessionProvider` turns a long-lived credential into a fresh session token.
//! [`GameClient`] combines both with the codec and exposes [`GameApi`].

pub mod client;
pub mod config;
pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::GameClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use traits::{GameApi, SessionError, SessionProvider, Transport, TransportError};

#[cfg(any(test, feature = "mock"))]
pub use mock::{
    MockFailure, MockGame, MockSessionProvider, MockTransport, Mutation, SentRequest,
};
