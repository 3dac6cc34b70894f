//! The decision engine and its outer loop.
mod adventure;
mod attack;
mod attributes;
mod circle;
mod state;
mod work;

use std::future::Future;

use chrono::{Local, NaiveDateTime};
use client_core::{ClientError, GameApi};
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result, Step};

pub use state::EngineState;
pub use work::work_hours;

type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Drives one account.
///
/// Owns the per-account state carried across ticks. Running several accounts
/// takes one engine per account; nothing is shared between them.
pub struct DecisionEngine<G> {
    game: G,
    config: EngineConfig,
    state: EngineState,
    clock: Clock,
}

impl<G: GameApi> DecisionEngine<G> {
    pub fn new(game: G, config: EngineConfig) -> Self {
        Self {
            game,
            config,
            state: EngineState::default(),
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Replaces the local wall clock used to plan work shifts.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one pass over every check.
    ///
    /// A failed account fetch aborts the tick. A failed check aborts the tick
    /// when the failure is network trouble or fatal; otherwise it is logged
    /// and the next check runs. Gold re-read by the circle check carries over
    /// to the attribute check.
    pub async fn tick(&mut self) -> Result<()> {
        let account = self
            .game
            .account()
            .await
            .map_err(|source| EngineError::new(Step::Account, source))?;
        debug!(gems = account.gems, gold = account.gold, fame = account.fame, "account");

        let mut gold = account.gold;
        settle(Step::Adventure, self.check_adventure(&account).await)?;
        settle(Step::Map, self.check_map().await)?;
        settle(Step::Work, self.check_work().await)?;
        settle(Step::Attack, self.check_attack().await)?;
        settle(Step::Circle, self.check_circle(&mut gold).await)?;
        settle(Step::Attributes, self.check_attributes(&mut gold).await)?;

        Ok(())
    }

    /// Ticks until a fatal error.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.tick_and_wait().await?;
        }
    }

    /// Ticks until `shutdown` resolves or a fatal error occurs.
    ///
    /// Shutdown is honored at every suspension point; a tick interrupted
    /// mid-way is simply not finished.
    pub async fn run_until(&mut self, shutdown: impl Future<Output = ()>) -> Result<()> {
        tokio::select! {
            result = self.run() => result,
            () = shutdown => {
                info!("shutdown requested");
                Ok(())
            }
        }
    }

    async fn tick_and_wait(&mut self) -> Result<()> {
        let timing = self.config.timing;

        match self.tick().await {
            Ok(()) => {}
            Err(error) if error.is_fatal() => {
                error!(step = %error.step, error = %error.source, "fatal failure, stopping");
                return Err(error);
            }
            Err(error) if error.is_transient_network() => {
                warn!(
                    step = %error.step,
                    error = %error.source,
                    backoff_secs = timing.error_backoff.as_secs(),
                    "server unreachable, waiting"
                );
                tokio::time::sleep(timing.error_backoff).await;
            }
            Err(error) => {
                error!(step = %error.step, error = %error.source, "tick failed");
            }
        }

        tokio::time::sleep(timing.tick_interval).await;
        Ok(())
    }
}

/// Turns a failed check into a tick abort, or logs it and lets the tick go on.
fn settle(step: Step, result: std::result::Result<(), ClientError>) -> Result<()> {
    let Err(source) = result else {
        return Ok(());
    };
    let error = EngineError::new(step, source);
    if error.is_transient_network() || error.is_fatal() {
        return Err(error);
    }
    warn!(%step, error = %error.source, "check failed, continuing");
    Ok(())
}
