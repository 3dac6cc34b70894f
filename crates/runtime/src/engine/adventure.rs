use client_core::{ClientError, GameApi};
use game_core::{AccountSnapshot, AdventureCatalog, AdventureOutcome};
use tracing::{debug, info, warn};

use super::DecisionEngine;

impl<G: GameApi> DecisionEngine<G> {
    pub(super) async fn check_adventure(
        &mut self,
        account: &AccountSnapshot,
    ) -> Result<(), ClientError> {
        match self.game.adventures().await? {
            AdventureOutcome::Busy => {
                debug!("working");
                self.state.working = true;
                self.state.in_adventure = false;
            }
            AdventureOutcome::Running(running) => {
                debug!(seconds_remaining = running.seconds_remaining, "adventure in progress");
                self.state.in_adventure = true;
                self.state.working = false;
            }
            AdventureOutcome::Completed(report) => {
                info!(
                    won = report.won,
                    experience = report.experience,
                    gold = report.gold,
                    gems = report.gems,
                    item_found = report.item_found,
                    "adventure finished"
                );
            }
            AdventureOutcome::Catalog(catalog) => {
                self.state.working = false;
                self.state.in_adventure = false;
                self.start_best_adventure(account, &catalog).await?;
            }
        }
        Ok(())
    }

    async fn start_best_adventure(
        &mut self,
        account: &AccountSnapshot,
        catalog: &AdventureCatalog,
    ) -> Result<(), ClientError> {
        let can_pay = self.config.use_gems && account.gems > 0;
        if !can_pay && !catalog.has_free_adventures() {
            debug!(
                made_today = catalog.made_today,
                free_per_day = catalog.free_per_day,
                "no adventures left today"
            );
            self.state.adventures_exhausted = true;
            return Ok(());
        }
        self.state.adventures_exhausted = false;

        let Some(adventure) = self.config.strategy.pick(
            &catalog.adventures,
            self.config.priority,
            self.config.max_difficulty,
        ) else {
            warn!(max_difficulty = %self.config.max_difficulty, "no adventure within difficulty");
            return Ok(());
        };

        info!(
            quest_id = adventure.quest_id,
            difficulty = %adventure.difficulty,
            duration = adventure.duration,
            experience = adventure.experience,
            gold = adventure.gold,
            strategy = self.config.strategy.ranking().name(),
            "starting adventure"
        );
        self.game.start_adventure(adventure.quest_id).await
    }
}
