//! Game client with transient-failure retry and session refresh.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use game_core::{
    AccountSnapshot, AdventureOutcome, AttackOutcome, Attribute, AttributeSet, CircleNode,
    CircleNodeKind, MapOffer, PvpStatus, WorkOffer,
};
use rpc_codec::{Method, MethodCall, Response, decode, is_session_invalid};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::traits::{GameApi, SessionProvider, Transport};

/// Issues game calls for one account.
///
/// Owns the current session token. Transient transport failures are retried
/// after [`ClientConfig::retry_backoff`] for as long as they persist. A
/// response reporting an invalid session triggers a refresh through the
/// [`SessionProvider`] (when a refresh credential is configured) and the same
/// call is re-issued with the new token, at most
/// [`ClientConfig::max_session_refreshes`] times per call.
pub struct GameClient {
    transport: Arc<dyn Transport>,
    sessions: Arc<dyn SessionProvider>,
    session: Mutex<String>,
    credential: Option<String>,
    cookie: String,
    config: ClientConfig,
}

impl GameClient {
    /// Without a refresh credential the transport cookie is a random id.
    pub fn new(
        transport: Arc<dyn Transport>,
        sessions: Arc<dyn SessionProvider>,
        session: impl Into<String>,
        credential: Option<String>,
    ) -> Self {
        let cookie = credential
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Self {
            transport,
            sessions,
            session: Mutex::new(session.into()),
            credential,
            cookie,
            config: ClientConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Current session token.
    pub fn session(&self) -> String {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_session(&self, token: String) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Sends a call and returns the raw response body.
    pub async fn call(&self, mut call: MethodCall) -> Result<String, ClientError> {
        let mut refreshes = 0;

        loop {
            call.set_session(self.session());
            debug!(method = %call.method, "sending request");
            let body = self.send_with_retry(&call.encode()).await?;

            if !is_session_invalid(&body) {
                return Ok(body);
            }

            let Some(credential) = self.credential.as_deref() else {
                return Err(ClientError::SessionInvalid {
                    method: call.method,
                });
            };
            if refreshes >= self.config.max_session_refreshes {
                return Err(ClientError::SessionInvalid {
                    method: call.method,
                });
            }

            refreshes += 1;
            warn!(method = %call.method, "session rejected, refreshing");
            let token = self.sessions.refresh(credential).await?;
            self.replace_session(token);
        }
    }

    async fn send_with_retry(&self, body: &str) -> Result<String, ClientError> {
        loop {
            match self.transport.send(body, &self.cookie).await {
                Ok(response) => return Ok(response),
                Err(error) if error.is_transient() => {
                    warn!(
                        %error,
                        backoff_secs = self.config.retry_backoff.as_secs(),
                        "transient transport failure, retrying"
                    );
                    tokio::time::sleep(self.config.retry_backoff).await;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    async fn fetch(&self, call: MethodCall) -> Result<Response, ClientError> {
        let body = self.call(call).await?;
        Ok(Response::parse(&body)?)
    }

    fn request(method: Method) -> MethodCall {
        MethodCall::new(method, String::new())
    }
}

#[async_trait]
impl GameApi for GameClient {
    async fn account(&self) -> Result<AccountSnapshot, ClientError> {
        let response = self.fetch(Self::request(Method::MiniUpdate)).await?;
        Ok(decode::account(&response)?)
    }

    async fn adventures(&self) -> Result<AdventureOutcome, ClientError> {
        let response = self.fetch(Self::request(Method::GetAdventures)).await?;
        Ok(decode::adventure_outcome(&response)?)
    }

    async fn start_adventure(&self, quest_id: i32) -> Result<(), ClientError> {
        let call = Self::request(Method::StartAdventure).with_int(quest_id);
        self.fetch(call).await?;
        Ok(())
    }

    async fn pvp_status(&self) -> Result<PvpStatus, ClientError> {
        let response = self.fetch(Self::request(Method::GetPvpData)).await?;
        Ok(decode::pvp_status(&response)?)
    }

    async fn fight(&self, opponent: &str) -> Result<Option<AttackOutcome>, ClientError> {
        let call = Self::request(Method::Fight).with_string(opponent);
        let response = self.fetch(call).await?;
        Ok(decode::attack(&response)?)
    }

    async fn circle(&self) -> Result<Vec<CircleNode>, ClientError> {
        let response = self.fetch(Self::request(Method::GetCircle)).await?;
        Ok(decode::circle(&response)?)
    }

    async fn buy_circle_node(&self, node: CircleNodeKind) -> Result<(), ClientError> {
        let call = Self::request(Method::BuyCircleNode)
            .with_string("gold")
            .with_int(node.id());
        self.fetch(call).await?;
        Ok(())
    }

    async fn attributes(&self) -> Result<AttributeSet, ClientError> {
        let response = self.fetch(Self::request(Method::GetUserAttributes)).await?;
        Ok(decode::attributes(&response)?)
    }

    async fn raise_attribute(&self, attribute: Attribute) -> Result<(), ClientError> {
        let call = Self::request(Method::RaiseAttribute).with_string(attribute.as_ref());
        self.fetch(call).await?;
        Ok(())
    }

    async fn work_offer(&self) -> Result<Option<WorkOffer>, ClientError> {
        let response = self.fetch(Self::request(Method::GetWorkData)).await?;
        Ok(decode::work_offer(&response)?)
    }

    async fn start_work(&self, hours: i32) -> Result<(), ClientError> {
        let call = Self::request(Method::StartWork).with_int(hours);
        self.fetch(call).await?;
        Ok(())
    }

    async fn map_offer(&self) -> Result<Option<MapOffer>, ClientError> {
        let response = self.fetch(Self::request(Method::GetMapDetails)).await?;
        Ok(decode::map_offer(&response)?)
    }

    async fn explore_map(&self) -> Result<(), ClientError> {
        self.fetch(Self::request(Method::ExploreCave)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::mock::{MockSessionProvider, MockTransport};
    use crate::traits::{SessionError, TransportError};

    const ACCOUNT: &str = "<methodResponse><params><param><value><struct>\
        <member><name>bs</name><value><i4>3</i4></value></member>\
        <member><name>gold</name><value><i4>120</i4></value></member>\
        <member><name>fame</name><value><i4>40</i4></value></member>\
        </struct></value></param></params></methodResponse>";

    const EXPIRED: &str = "<methodResponse><fault><value><string>no_valid_session</string>\
        </value></fault></methodResponse>";

    fn client(
        transport: &MockTransport,
        sessions: &MockSessionProvider,
        credential: Option<&str>,
    ) -> GameClient {
        GameClient::new(
            Arc::new(transport.clone()),
            Arc::new(sessions.clone()),
            "old-token",
            credential.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn decodes_account_snapshot() {
        let transport = MockTransport::new().respond(ACCOUNT);
        let sessions = MockSessionProvider::new("unused");
        let client = client(&transport, &sessions, Some("refresh"));

        let account = client.account().await.unwrap();

        assert_eq!(account.gold, 120);
        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("<string>old-token</string>"));
        assert_eq!(sent[0].cookie, "refresh");
    }

    #[tokio::test]
    async fn refresh_reissues_exactly_once_with_new_token() {
        let transport = MockTransport::new().respond(EXPIRED).respond(ACCOUNT);
        let sessions = MockSessionProvider::new("new-token");
        let client = client(&transport, &sessions, Some("refresh"));

        let account = client.account().await.unwrap();

        assert_eq!(account.fame, 40);
        assert_eq!(sessions.credentials(), vec!["refresh".to_string()]);
        assert_eq!(client.session(), "new-token");

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].body.contains("<string>new-token</string>"));
        assert!(!sent[1].body.contains("old-token"));
        assert_eq!(sent[1].body, sent[0].body.replace("old-token", "new-token"));
    }

    #[tokio::test]
    async fn persistently_invalid_session_stops_after_one_refresh() {
        let transport = MockTransport::new().respond(EXPIRED).respond(EXPIRED);
        let sessions = MockSessionProvider::new("still-bad");
        let client = client(&transport, &sessions, Some("refresh"));

        let error = client.account().await.unwrap_err();

        assert!(error.is_session_invalid());
        assert_eq!(sessions.refresh_count(), 1);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_surfaces_as_session_error() {
        let transport = MockTransport::new().respond(EXPIRED).respond(ACCOUNT);
        let sessions = MockSessionProvider::failing();
        let client = client(&transport, &sessions, Some("refresh"));

        let error = client.account().await.unwrap_err();

        assert!(matches!(error, ClientError::Session(SessionError::NotFound)));
        assert!(!error.is_session_invalid());
        assert_eq!(sessions.refresh_count(), 1);
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(client.session(), "old-token");
    }

    #[tokio::test]
    async fn invalid_session_without_credential_is_fatal() {
        let transport = MockTransport::new().respond(EXPIRED);
        let sessions = MockSessionProvider::new("unused");
        let client = client(&transport, &sessions, None);

        let error = client.account().await.unwrap_err();

        assert!(matches!(
            error,
            ClientError::SessionInvalid {
                method: Method::MiniUpdate
            }
        ));
        assert_eq!(sessions.refresh_count(), 0);
    }

    #[tokio::test]
    async fn random_cookie_without_credential() {
        let transport = MockTransport::new().respond(ACCOUNT);
        let sessions = MockSessionProvider::new("unused");
        let client = client(&transport, &sessions, None);

        client.account().await.unwrap();

        let cookie = &transport.requests()[0].cookie;
        assert!(uuid::Uuid::parse_str(cookie).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried_after_backoff() {
        let transport = MockTransport::new()
            .fail(TransportError::Transient("timed out".into()))
            .fail(TransportError::Transient("connection reset".into()))
            .respond(ACCOUNT);
        let sessions = MockSessionProvider::new("unused");
        let client = client(&transport, &sessions, Some("refresh"));

        let started = tokio::time::Instant::now();
        let account = client.account().await.unwrap();

        assert_eq!(account.gems, 3);
        assert_eq!(transport.requests().len(), 3);
        assert!(started.elapsed() >= Duration::from_secs(20));
    }

    #[tokio::test]
    async fn unavailable_is_not_retried() {
        let transport = MockTransport::new()
            .fail(TransportError::Unavailable("503".into()))
            .respond(ACCOUNT);
        let sessions = MockSessionProvider::new("unused");
        let client = client(&transport, &sessions, Some("refresh"));

        let error = client.account().await.unwrap_err();

        assert!(error.is_transient_network());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn unparsable_body_surfaces_as_codec_error() {
        let transport = MockTransport::new().respond("<html>oops");
        let sessions = MockSessionProvider::new("unused");
        let client = client(&transport, &sessions, Some("refresh"));

        let error = client.account().await.unwrap_err();

        assert!(matches!(
            error,
            ClientError::Codec(rpc_codec::CodecError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn mutation_arguments_follow_wire_order() {
        let transport = MockTransport::new().respond(ACCOUNT);
        let sessions = MockSessionProvider::new("unused");
        let client = client(&transport, &sessions, Some("refresh"));

        client.buy_circle_node(CircleNodeKind::Jade).await.unwrap();

        let body = &transport.requests()[0].body;
        assert!(body.contains("<methodName>EvocationCircle_buyNode</methodName>"));
        let gold = body.find("<string>gold</string>").unwrap();
        let id = body
            .find(&format!("<int>{}</int>", CircleNodeKind::Jade.id()))
            .unwrap();
        assert!(gold < id);
    }
}
