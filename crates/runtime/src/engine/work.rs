use chrono::{Duration, NaiveDateTime, NaiveTime};
use client_core::{ClientError, GameApi};
use tracing::{debug, info};

use super::DecisionEngine;

/// Hour of the next morning a shift should last until.
const SHIFT_END_HOUR: u32 = 8;

/// Whole hours from `now` until 08:00 the next calendar day.
pub fn work_hours(now: NaiveDateTime) -> i32 {
    let shift_end = NaiveTime::from_hms_opt(SHIFT_END_HOUR, 0, 0).unwrap_or_default();
    let end = (now.date() + Duration::days(1)).and_time(shift_end);
    i32::try_from((end - now).num_hours()).unwrap_or(i32::MAX)
}

impl<G: GameApi> DecisionEngine<G> {
    /// Explores the cave when it costs nothing and the account is idle.
    pub(super) async fn check_map(&mut self) -> Result<(), ClientError> {
        if !self.config.auto_map || self.state.working || self.state.in_adventure {
            return Ok(());
        }

        match self.game.map_offer().await? {
            Some(offer) if offer.is_free() => {
                info!("exploring cave");
                self.game.explore_map().await
            }
            Some(offer) => {
                debug!(cost = offer.cost, available = offer.available, "cave not free");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Works until next morning once adventures are exhausted.
    pub(super) async fn check_work(&mut self) -> Result<(), ClientError> {
        if !self.config.auto_work || !self.state.adventures_exhausted || self.state.working {
            return Ok(());
        }

        let Some(offer) = self.game.work_offer().await? else {
            debug!("no work offered");
            return Ok(());
        };

        let hours = offer.clamp_hours(work_hours((self.clock)()));
        info!(
            hours,
            gold_per_hour = offer.gold_per_hour,
            experience_per_hour = offer.experience_per_hour,
            "starting work"
        );
        self.game.start_work(hours).await?;
        self.state.working = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn evening_shift_runs_until_morning() {
        assert_eq!(work_hours(at(14, 22, 0)), 10);
        assert_eq!(work_hours(at(14, 22, 30)), 9);
    }

    #[test]
    fn early_morning_still_targets_next_day() {
        assert_eq!(work_hours(at(14, 7, 0)), 25);
    }

    #[test]
    fn month_boundary() {
        assert_eq!(work_hours(at(31, 23, 0)), 9);
    }
}
