//! Session acquisition from the game page.

use async_trait::async_trait;
use client_core::{SessionError, SessionProvider, TransportError};
use reqwest::header::COOKIE;

use crate::config::HttpConfig;
use crate::credential_cookie;
use crate::transport::{check_status, classify};

const SESSION_MARKER: &str = "sessionID: \"";

/// Extracts the session id the game page embeds as `sessionID: "<id>"`.
pub fn parse_session_id(html: &str) -> Option<&str> {
    let start = html.find(SESSION_MARKER)? + SESSION_MARKER.len();
    let rest = &html[start..];
    let end = rest.find('"')?;
    let id = rest[..end].trim();
    (!id.is_empty()).then_some(id)
}

/// Fetches the game page with the credential cookie and reads the session id
/// out of it.
pub struct PageSessionProvider {
    game_page: String,
    http_client: reqwest::Client,
}

impl PageSessionProvider {
    pub fn new(config: &HttpConfig) -> Result<Self, SessionError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|error| SessionError::Provider(format!("http client: {error}")))?;

        Ok(Self {
            game_page: config.game_page.clone(),
            http_client,
        })
    }

    async fn fetch_page(&self, credential: &str) -> Result<String, TransportError> {
        let response = self
            .http_client
            .get(&self.game_page)
            .header(COOKIE, credential_cookie(credential))
            .send()
            .await
            .map_err(classify)?;

        check_status(response.status())?;
        response.text().await.map_err(classify)
    }
}

#[async_trait]
impl SessionProvider for PageSessionProvider {
    async fn refresh(&self, credential: &str) -> Result<String, SessionError> {
        tracing::info!(page = %self.game_page, "requesting new session");
        let html = self.fetch_page(credential).await?;
        let id = parse_session_id(&html).ok_or(SessionError::NotFound)?;
        tracing::info!("session acquired");
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_read_from_flashvars() {
        let html = r#"<script>var flashvars = { lang: "en", sessionID: "a1b2c3d4", serverId: 1 };</script>"#;
        assert_eq!(parse_session_id(html), Some("a1b2c3d4"));
    }

    #[test]
    fn missing_or_empty_session_id() {
        assert_eq!(parse_session_id("<html>login required</html>"), None);
        assert_eq!(parse_session_id(r#"sessionID: """#), None);
        assert_eq!(parse_session_id(r#"sessionID: "unterminated"#), None);
    }
}
