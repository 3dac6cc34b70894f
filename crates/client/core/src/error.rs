use rpc_codec::{CodecError, Method};

use crate::traits::{SessionError, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("session refresh failed: {0}")]
    Session(#[from] SessionError),

    /// The server rejected the session and it could not be refreshed.
    #[error("session rejected by server during {method}")]
    SessionInvalid { method: Method },

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ClientError {
    /// Network trouble that a later attempt may not see.
    pub fn is_transient_network(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError::Transient(_) | TransportError::Unavailable(_))
        )
    }

    pub fn is_session_invalid(&self) -> bool {
        matches!(self, Self::SessionInvalid { .. })
    }
}
