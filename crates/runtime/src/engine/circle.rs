use client_core::{ClientError, GameApi};
use game_core::{CORE_NODE_LEVEL_CAP, CircleNode, circle};
use tracing::{debug, info, warn};

use super::DecisionEngine;
use crate::config::UpgradePolicy;

impl<G: GameApi> DecisionEngine<G> {
    /// Buys circle node levels while gold allows.
    ///
    /// Gold is re-read after every purchase. Stops for good once the core
    /// node reaches its cap.
    pub(super) async fn check_circle(&mut self, gold: &mut i32) -> Result<(), ClientError> {
        let policy = self.config.circle;
        if !policy.is_enabled() {
            return Ok(());
        }

        loop {
            let nodes = self.game.circle().await?;
            let Some(core) = circle::core_node(&nodes) else {
                warn!("circle has no core node");
                return Ok(());
            };
            if core.level >= CORE_NODE_LEVEL_CAP {
                warn!(
                    level = core.level,
                    cap = CORE_NODE_LEVEL_CAP,
                    "core node at cap, circle upgrades need manual attention"
                );
                return Ok(());
            }

            let Some(node) = select_node(policy, &nodes) else {
                debug!("no circle node to upgrade");
                return Ok(());
            };
            if node.gold_price >= *gold {
                debug!(
                    node = %node.kind,
                    price = node.gold_price,
                    gold = *gold,
                    "not enough gold for node"
                );
                return Ok(());
            }

            info!(
                node = %node.kind,
                effect = node.kind.effect(),
                level = node.level,
                price = node.gold_price,
                "upgrading circle node"
            );
            self.game.buy_circle_node(node.kind).await?;
            *gold = self.game.account().await?.gold;
        }
    }
}

fn select_node(
    policy: UpgradePolicy<game_core::CircleNodeKind>,
    nodes: &[CircleNode],
) -> Option<CircleNode> {
    match policy {
        UpgradePolicy::Disabled => None,
        UpgradePolicy::Pinned(kind) => circle::find_node(nodes, kind)
            .filter(|node| !node.is_maxed())
            .copied(),
        UpgradePolicy::Auto => circle::auto_target(nodes).copied(),
    }
}
