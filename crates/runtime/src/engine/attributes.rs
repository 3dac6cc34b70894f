use client_core::{ClientError, GameApi};
use tracing::{debug, info};

use super::DecisionEngine;
use crate::config::UpgradePolicy;

impl<G: GameApi> DecisionEngine<G> {
    /// Raises attributes while gold allows, re-reading gold after each raise.
    pub(super) async fn check_attributes(&mut self, gold: &mut i32) -> Result<(), ClientError> {
        let policy = self.config.attributes;
        if !policy.is_enabled() {
            return Ok(());
        }

        loop {
            let attributes = self.game.attributes().await?;
            let target = match policy {
                UpgradePolicy::Disabled => None,
                UpgradePolicy::Pinned(attribute) => attributes
                    .get(attribute)
                    .map(|stats| (attribute, stats)),
                UpgradePolicy::Auto => attributes.auto_target(),
            };
            let Some((attribute, stats)) = target else {
                debug!("no attribute to raise");
                return Ok(());
            };
            if stats.cost >= *gold {
                debug!(%attribute, cost = stats.cost, gold = *gold, "not enough gold for attribute");
                return Ok(());
            }

            info!(%attribute, base = stats.base, cost = stats.cost, "raising attribute");
            self.game.raise_attribute(attribute).await?;
            *gold = self.game.account().await?.gold;
        }
    }
}
