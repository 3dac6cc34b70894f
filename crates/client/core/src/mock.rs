//! In-memory transport, session provider and game for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use game_core::{
    AccountSnapshot, AdventureOutcome, AttackOutcome, Attribute, AttributeSet, CircleNode,
    CircleNodeKind, MapOffer, PvpStatus, WorkOffer,
};
use rpc_codec::Method;

use crate::error::ClientError;
use crate::traits::{GameApi, SessionError, SessionProvider, Transport, TransportError};

// ============================================================================
// Transport
// ============================================================================

/// A request captured by [`MockTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentRequest {
    pub body: String,
    pub cookie: String,
}

/// Transport that replays scripted results in order.
///
/// Once the script runs out every send fails with a fatal error.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Result<String, TransportError>>>>,
    sent: Arc<Mutex<Vec<SentRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, body: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, body: &str, cookie: &str) -> Result<String, TransportError> {
        self.sent.lock().unwrap().push(SentRequest {
            body: body.to_string(),
            cookie: cookie.to_string(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Fatal("script exhausted".into())))
    }
}

// ============================================================================
// Session provider
// ============================================================================

/// Session provider that always hands out the same token.
#[derive(Clone)]
pub struct MockSessionProvider {
    token: Option<String>,
    refreshes: Arc<Mutex<Vec<String>>>,
}

impl MockSessionProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            refreshes: Arc::default(),
        }
    }

    /// A provider whose every refresh fails.
    pub fn failing() -> Self {
        Self {
            token: None,
            refreshes: Arc::default(),
        }
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.lock().unwrap().len()
    }

    /// Credentials passed to each refresh, in order.
    pub fn credentials(&self) -> Vec<String> {
        self.refreshes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn refresh(&self, credential: &str) -> Result<String, SessionError> {
        self.refreshes.lock().unwrap().push(credential.to_string());
        self.token.clone().ok_or(SessionError::NotFound)
    }
}

// ============================================================================
// Game
// ============================================================================

/// Failure [`MockGame`] injects for a method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockFailure {
    /// HTTP 503 from the server.
    Unavailable,
    /// Session rejected with no way to refresh it.
    SessionInvalid,
    /// Markup the codec cannot read.
    Malformed,
    /// Session rejected and the refresh found no new session.
    RefreshFailed,
}

impl MockFailure {
    fn into_error(self, method: Method) -> ClientError {
        match self {
            Self::Unavailable => {
                TransportError::Unavailable("503 Service Unavailable".into()).into()
            }
            Self::SessionInvalid => ClientError::SessionInvalid { method },
            Self::Malformed => rpc_codec::CodecError::MissingField(method.to_string()).into(),
            Self::RefreshFailed => SessionError::NotFound.into(),
        }
    }
}

/// A state change requested through [`MockGame`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    StartAdventure(i32),
    Fight(String),
    BuyCircleNode(CircleNodeKind),
    RaiseAttribute(Attribute),
    StartWork(i32),
    ExploreMap,
}

#[derive(Default)]
struct GameState {
    account: AccountSnapshot,
    adventure: Option<AdventureOutcome>,
    pvp: VecDeque<PvpStatus>,
    fights: VecDeque<Option<AttackOutcome>>,
    circle: Vec<CircleNode>,
    circle_price_step: i32,
    attributes: AttributeSet,
    attribute_cost_step: i32,
    work: Option<WorkOffer>,
    map: Option<MapOffer>,
    failures: HashMap<Method, MockFailure>,
    calls: Vec<Method>,
    mutations: Vec<Mutation>,
}

/// In-memory game server.
///
/// Buying a circle node or raising an attribute deducts its price from gold,
/// increments it, and raises the next price by the configured step. The
/// opponent lookup replays scripted statuses and reports a countdown once the
/// script is empty, so attack loops always terminate.
#[derive(Clone, Default)]
pub struct MockGame {
    state: Arc<Mutex<GameState>>,
}

impl MockGame {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(self, apply: impl FnOnce(&mut GameState)) -> Self {
        apply(&mut *self.state.lock().unwrap());
        self
    }

    pub fn with_account(self, account: AccountSnapshot) -> Self {
        self.update(|state| state.account = account)
    }

    pub fn with_adventure(self, outcome: AdventureOutcome) -> Self {
        self.update(|state| state.adventure = Some(outcome))
    }

    pub fn with_pvp(self, status: PvpStatus) -> Self {
        self.update(|state| state.pvp.push_back(status))
    }

    pub fn with_fight(self, outcome: Option<AttackOutcome>) -> Self {
        self.update(|state| state.fights.push_back(outcome))
    }

    pub fn with_circle(self, nodes: Vec<CircleNode>, price_step: i32) -> Self {
        self.update(|state| {
            state.circle = nodes;
            state.circle_price_step = price_step;
        })
    }

    pub fn with_attributes(self, attributes: AttributeSet, cost_step: i32) -> Self {
        self.update(|state| {
            state.attributes = attributes;
            state.attribute_cost_step = cost_step;
        })
    }

    pub fn with_work_offer(self, offer: WorkOffer) -> Self {
        self.update(|state| state.work = Some(offer))
    }

    pub fn with_map_offer(self, offer: MapOffer) -> Self {
        self.update(|state| state.map = Some(offer))
    }

    /// Makes every call of `method` fail.
    pub fn with_failure(self, method: Method, failure: MockFailure) -> Self {
        self.update(|state| {
            state.failures.insert(method, failure);
        })
    }

    pub fn account_now(&self) -> AccountSnapshot {
        self.state.lock().unwrap().account
    }

    /// Every method called so far, in order.
    pub fn calls(&self) -> Vec<Method> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.state.lock().unwrap().mutations.clone()
    }

    pub fn circle_now(&self) -> Vec<CircleNode> {
        self.state.lock().unwrap().circle.clone()
    }

    /// Records the call and hands the state over, or returns the injected
    /// failure.
    fn with_state<T>(
        &self,
        method: Method,
        apply: impl FnOnce(&mut GameState) -> T,
    ) -> Result<T, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method);
        if let Some(failure) = state.failures.get(&method) {
            return Err(failure.into_error(method));
        }
        Ok(apply(&mut *state))
    }
}

#[async_trait]
impl GameApi for MockGame {
    async fn account(&self) -> Result<AccountSnapshot, ClientError> {
        self.with_state(Method::MiniUpdate, |state| state.account)
    }

    async fn adventures(&self) -> Result<AdventureOutcome, ClientError> {
        self.with_state(Method::GetAdventures, |state| {
            state.adventure.clone().unwrap_or(AdventureOutcome::Busy)
        })
    }

    async fn start_adventure(&self, quest_id: i32) -> Result<(), ClientError> {
        self.with_state(Method::StartAdventure, |state| {
            state.mutations.push(Mutation::StartAdventure(quest_id));
        })
    }

    async fn pvp_status(&self) -> Result<PvpStatus, ClientError> {
        self.with_state(Method::GetPvpData, |state| {
            state.pvp.pop_front().unwrap_or(PvpStatus {
                reattack_countdown: 600,
                ..PvpStatus::default()
            })
        })
    }

    async fn fight(&self, opponent: &str) -> Result<Option<AttackOutcome>, ClientError> {
        self.with_state(Method::Fight, |state| {
            state.mutations.push(Mutation::Fight(opponent.to_string()));
            let outcome = state.fights.pop_front().flatten();
            if let Some(outcome) = outcome {
                state.account.gold += outcome.gold;
                state.account.fame += outcome.fame;
            }
            outcome
        })
    }

    async fn circle(&self) -> Result<Vec<CircleNode>, ClientError> {
        self.with_state(Method::GetCircle, |state| state.circle.clone())
    }

    async fn buy_circle_node(&self, kind: CircleNodeKind) -> Result<(), ClientError> {
        self.with_state(Method::BuyCircleNode, |state| {
            state.mutations.push(Mutation::BuyCircleNode(kind));
            let step = state.circle_price_step;
            if let Some(node) = state.circle.iter_mut().find(|node| node.kind == kind) {
                state.account.gold -= node.gold_price;
                node.level += 1;
                node.gold_price += step;
            }
        })
    }

    async fn attributes(&self) -> Result<AttributeSet, ClientError> {
        self.with_state(Method::GetUserAttributes, |state| state.attributes.clone())
    }

    async fn raise_attribute(&self, attribute: Attribute) -> Result<(), ClientError> {
        self.with_state(Method::RaiseAttribute, |state| {
            state.mutations.push(Mutation::RaiseAttribute(attribute));
            if let Some(mut stats) = state.attributes.get(attribute) {
                state.account.gold -= stats.cost;
                stats.base += 1;
                stats.cost += state.attribute_cost_step;
                state.attributes.insert(attribute, stats);
            }
        })
    }

    async fn work_offer(&self) -> Result<Option<WorkOffer>, ClientError> {
        self.with_state(Method::GetWorkData, |state| state.work)
    }

    async fn start_work(&self, hours: i32) -> Result<(), ClientError> {
        self.with_state(Method::StartWork, |state| {
            state.mutations.push(Mutation::StartWork(hours));
        })
    }

    async fn map_offer(&self) -> Result<Option<MapOffer>, ClientError> {
        self.with_state(Method::GetMapDetails, |state| state.map)
    }

    async fn explore_map(&self) -> Result<(), ClientError> {
        self.with_state(Method::ExploreCave, |state| {
            state.mutations.push(Mutation::ExploreMap);
        })
    }
}
