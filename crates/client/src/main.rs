//! Game bot entry point.
mod args;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{GameClient, SessionProvider};
use client_http::{HttpConfig, HttpTransport, PageSessionProvider};
use runtime::DecisionEngine;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let _log_guard = logging::init()?;

    let http = HttpConfig {
        endpoint: args.endpoint.clone(),
        game_page: args.game_page.clone(),
        ..HttpConfig::default()
    };
    let transport = Arc::new(HttpTransport::new(&http).context("building transport")?);
    let sessions = Arc::new(PageSessionProvider::new(&http).context("building session provider")?);

    let session = match &args.session_id {
        Some(session) => session.clone(),
        None => {
            let credential = args
                .refresh_token
                .as_deref()
                .context("a session id or refresh token is required")?;
            sessions
                .refresh(credential)
                .await
                .context("acquiring initial session")?
        }
    };

    let client = GameClient::new(transport, sessions, session, args.refresh_token.clone());
    let config = args.engine_config();
    tracing::info!(
        strategy = %config.strategy,
        priority = %config.priority,
        max_difficulty = %config.max_difficulty,
        circle = ?config.circle,
        attributes = ?config.attributes,
        "starting engine"
    );

    let mut engine = DecisionEngine::new(client, config);
    engine
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("engine stopped")?;

    Ok(())
}
