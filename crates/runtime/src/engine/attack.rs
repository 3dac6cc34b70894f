use client_core::{ClientError, GameApi};
use game_core::CombatTarget;
use tracing::{debug, info, warn};

use super::DecisionEngine;

/// Guilds whose members are never attacked.
const EXCLUDED_GUILDS: &[&str] = &["NarcoS"];

/// A target is kept only while each attack steals at least this much.
const MIN_STOLEN_GOLD: i32 = 50;

fn is_excluded(candidate: &CombatTarget) -> bool {
    candidate
        .guild
        .as_deref()
        .is_some_and(|guild| EXCLUDED_GUILDS.contains(&guild))
}

impl<G: GameApi> DecisionEngine<G> {
    /// Attacks the held target, or looks for a new one.
    ///
    /// Every iteration pauses, then looks up an opponent. Adopting a
    /// candidate does not attack it; the attack happens on the next
    /// iteration. At most one attack is made per check.
    pub(super) async fn check_attack(&mut self) -> Result<(), ClientError> {
        for _ in 0..self.config.max_opponent_lookups {
            tokio::time::sleep(self.config.timing.attack_pause).await;

            let status = self.game.pvp_status().await?;
            if status.reattack_countdown > 0 {
                debug!(countdown = status.reattack_countdown, "attack not available yet");
                return Ok(());
            }

            if let Some(target) = self.state.target.clone() {
                info!(opponent = %target.name, level = target.level, "attacking");
                let Some(outcome) = self.game.fight(&target.name).await? else {
                    warn!(opponent = %target.name, "opponent not found, dropping target");
                    self.state.drop_target();
                    continue;
                };

                self.state.stolen_gold += i64::from(outcome.gold);
                info!(
                    opponent = %target.name,
                    won = outcome.won,
                    fame = outcome.fame,
                    gold = outcome.gold,
                    experience = outcome.experience,
                    stolen_total = self.state.stolen_gold,
                    "attack finished"
                );
                if outcome.gold < MIN_STOLEN_GOLD {
                    debug!(opponent = %target.name, "target drained, dropping");
                    self.state.drop_target();
                }
                return Ok(());
            }

            let Some(candidate) = status.candidate else {
                debug!("no opponent offered");
                return Ok(());
            };
            if is_excluded(&candidate) {
                debug!(opponent = %candidate.name, "opponent in excluded guild");
                continue;
            }
            if self
                .config
                .max_attack_level
                .is_some_and(|max| candidate.level > max)
            {
                debug!(opponent = %candidate.name, level = candidate.level, "opponent level too high");
                continue;
            }

            debug!(opponent = %candidate.name, level = candidate.level, "new target");
            self.state.target = Some(candidate);
        }

        debug!("opponent lookups exhausted");
        Ok(())
    }
}
