//! HTTPS implementations of the client capabilities.
//!
//! - [`HttpTransport`] posts request bodies to the game endpoint.
//! - [`PageSessionProvider`] reads a session id out of the game page, fetched
//!   with the long-lived credential as cookie.

mod config;
mod session;
mod transport;

pub use config::{DEFAULT_ENDPOINT, DEFAULT_GAME_PAGE, HttpConfig};
pub use session::{PageSessionProvider, parse_session_id};
pub use transport::HttpTransport;

/// Cookie carrying the long-lived credential.
pub(crate) fn credential_cookie(value: &str) -> String {
    format!("gf-token-production={value}")
}
