//! Codec errors.

use game_core::GameError;

/// Failures while reading a response body.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The body is not well-formed markup. Carries the body for diagnosis.
    #[error("malformed response ({source}): {body}")]
    Malformed {
        body: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{key}` has unexpected value `{value}`")]
    InvalidValue { key: String, value: String },

    #[error("list columns have different lengths: `{key}` has {found}, expected {expected}")]
    MisalignedColumns {
        key: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Domain(#[from] GameError),
}

impl CodecError {
    pub(crate) fn invalid(key: &str, value: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
