//! Request transport over HTTPS POST.

use std::error::Error as _;
use std::io;

use async_trait::async_trait;
use client_core::{Transport, TransportError};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, COOKIE};

use crate::config::HttpConfig;
use crate::credential_cookie;

/// Posts request bodies to the game endpoint.
pub struct HttpTransport {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|error| TransportError::Fatal(format!("http client: {error}")))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: &str, cookie: &str) -> Result<String, TransportError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/xml")
            .header(COOKIE, credential_cookie(cookie))
            .body(body.to_string())
            .send()
            .await
            .map_err(classify)?;

        check_status(response.status())?;
        response.text().await.map_err(classify)
    }
}

/// Maps a status code to a transport failure, if it is one.
pub(crate) fn check_status(status: StatusCode) -> Result<(), TransportError> {
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return Err(TransportError::Unavailable(status.to_string()));
    }
    if !status.is_success() {
        return Err(TransportError::Fatal(format!("unexpected status {status}")));
    }
    Ok(())
}

/// Timeouts and dropped connections are transient; anything else, including a
/// refused connection, is fatal.
pub(crate) fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() || was_dropped(&error) {
        tracing::debug!(%error, "transient transport error");
        return TransportError::Transient(error.to_string());
    }
    TransportError::Fatal(error.to_string())
}

fn was_dropped(error: &reqwest::Error) -> bool {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            return is_transient_io(io_error.kind());
        }
        source = cause.source();
    }
    false
}

fn is_transient_io(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::TimedOut
    )
}
