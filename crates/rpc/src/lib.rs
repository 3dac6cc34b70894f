//! Codec for the game server's XML-RPC dialect.
//!
//! The server speaks a fixed, undocumented flavour of XML-RPC:
//!
//! - [`request`] renders method calls with the session token always as the
//!   first positional argument, then the optional string, then the optional
//!   integer.
//! - [`response`] reduces a response body to an ordered list of named scalar
//!   fields, with single, repeated and nested lookups.
//! - [`decode`] turns those fields into `game-core` snapshots. Responses carry
//!   no type tags, so this is also where shapes such as "working", "adventure
//!   running", "catalog" and "adventure completed" are told apart.
//!
//! Absent keys are reported as `None`; only unparsable markup or values, and
//! fields a caller declares mandatory, become [`CodecError`]s.

pub mod decode;
pub mod error;
pub mod request;
pub mod response;

pub use error::{CodecError, Result};
pub use request::{Method, MethodCall};
pub use response::{Response, is_session_invalid};
