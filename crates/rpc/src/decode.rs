//! Typed decoding of method responses.
//!
//! Each function reads one response shape into `game-core` types. Shapes
//! that share no discriminator are resolved here, once, into explicit enums
//! and options so callers never inspect raw keys.

use game_core::{
    AccountSnapshot, Adventure, AdventureCatalog, AdventureOutcome, AdventureReport, Attribute,
    AttackOutcome, AttributeSet, AttributeStats, CircleNode, CircleNodeKind, CombatReport,
    CombatTarget, Difficulty, MapOffer, PvpStatus, RunningAdventure, WorkOffer,
};
use strum::IntoEnumIterator;

use crate::error::{CodecError, Result};
use crate::response::Response;

/// Keys that only appear in an adventure catalog.
const CATALOG_MARKER: &str = "adventures_made_today";
const REWARD_GOLD: &str = "reward_gold";
const TIME_REMAINING: &str = "running_adventure_time_remain";
const RUNNING_ID: &str = "running_adventure_id";

/// `MiniUpdate`.
pub fn account(response: &Response) -> Result<AccountSnapshot> {
    Ok(AccountSnapshot {
        gems: response.require_int("bs")?,
        gold: response.require_int("gold")?,
        fame: response.require_int("fame")?,
    })
}

/// `GetAdventures`.
///
/// Without remaining time or a reward:
/// - the catalog marker means a catalog
/// - a running adventure id means an adventure is running
/// - neither means the account is working
///
/// Otherwise a reward is a completed adventure and remaining time a running one.
pub fn adventure_outcome(response: &Response) -> Result<AdventureOutcome> {
    let running = response.contains(TIME_REMAINING);
    let rewarded = response.contains(REWARD_GOLD);

    if !running && !rewarded {
        if response.contains(CATALOG_MARKER) {
            return catalog(response).map(AdventureOutcome::Catalog);
        }
        if !response.contains(RUNNING_ID) {
            return Ok(AdventureOutcome::Busy);
        }
    }
    if rewarded {
        return adventure_report(response).map(AdventureOutcome::Completed);
    }
    running_adventure(response).map(AdventureOutcome::Running)
}

/// Adventure catalog columns, aligned by occurrence.
pub fn catalog(response: &Response) -> Result<AdventureCatalog> {
    let made_today = response.require_int(CATALOG_MARKER)?;
    let free_per_day = response.require_int("free_adventures_per_day")?;

    let difficulties = response.ints("difficulty")?;
    let expected = difficulties.len();
    let column = |key: &'static str| -> Result<Vec<i32>> {
        let values = response.ints(key)?;
        if values.len() != expected {
            return Err(CodecError::MisalignedColumns {
                key,
                expected,
                found: values.len(),
            });
        }
        Ok(values)
    };
    let durations = column("duration")?;
    let experiences = column("exp")?;
    let fight_chances = column("fight_chance")?;
    let golds = column("gold")?;
    let quest_ids = column("quest_id")?;

    let adventures = (0..expected)
        .map(|index| {
            Ok(Adventure {
                difficulty: Difficulty::try_from(difficulties[index])?,
                duration: durations[index],
                experience: experiences[index],
                fight_chance: fight_chances[index],
                gold: golds[index],
                quest_id: quest_ids[index],
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AdventureCatalog {
        made_today,
        free_per_day,
        adventures,
    })
}

fn running_adventure(response: &Response) -> Result<RunningAdventure> {
    Ok(RunningAdventure {
        id: response.int(RUNNING_ID)?,
        seconds_remaining: response.int(TIME_REMAINING)?.unwrap_or(0),
        seconds_total: response.int("running_adventure_time_total")?,
    })
}

fn adventure_report(response: &Response) -> Result<AdventureReport> {
    let gold = response.require_int(REWARD_GOLD)?;
    Ok(AdventureReport {
        won: gold > 0,
        experience: response.require_int("reward_exp")?,
        gold,
        item_found: response.require_bool("item_found")?,
        gems: response.require_int("reward_bloodstones")?,
    })
}

/// `GetPvpData`.
pub fn pvp_status(response: &Response) -> Result<PvpStatus> {
    let candidate = match response.string("name") {
        Some(name) => Some(CombatTarget {
            name,
            id: response.require_int("id")?,
            level: response.require_int("level")?,
            guild: response.string("guild_name").filter(|guild| !guild.is_empty()),
        }),
        None => None,
    };

    Ok(PvpStatus {
        free_reattacks: response.int("free_reattacks")?,
        reattack_countdown: response.int("reattack_countdown")?.unwrap_or(0),
        candidate,
    })
}

/// `Fight`. `None` when the opponent could not be found.
pub fn attack(response: &Response) -> Result<Option<AttackOutcome>> {
    let Some(fame) = response.int("achieved_fame")? else {
        return Ok(None);
    };

    let report = CombatReport {
        fame,
        gold: response.require_int("robbed_gold")?,
        experience: response.require_int("xp")?,
        self_hitpoints: response.require_nested_int("self", "hitpoints")?,
        opponent_physical_damage: response.require_nested_int("opponent", "total_damage")?,
        opponent_magic_damage: response.require_nested_int("opponent", "magic_damage")?,
    };
    Ok(Some(AttackOutcome::resolve(report)))
}

/// `EvocationCircle_getCircle`.
///
/// Each node is a member named after its id whose value packs
/// `level:max_level:gem_price:gold_price:_:_:_:effect_power`.
pub fn circle(response: &Response) -> Result<Vec<CircleNode>> {
    CircleNodeKind::iter()
        .map(|kind| {
            let key = kind.id().to_string();
            let packed = response.require_string(&key)?;
            let parts = packed
                .split(':')
                .map(|part| part.trim().parse::<i32>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| CodecError::invalid(&key, &packed))?;
            if parts.len() < 8 {
                return Err(CodecError::invalid(&key, &packed));
            }
            Ok(CircleNode {
                kind,
                level: parts[0],
                max_level: parts[1],
                gold_price: parts[3],
                effect_power: parts[7],
            })
        })
        .collect()
}

/// `GetUserAttributes`.
pub fn attributes(response: &Response) -> Result<AttributeSet> {
    let mut set = AttributeSet::new();
    for attribute in Attribute::iter() {
        let code = attribute.as_ref().to_ascii_lowercase();
        set.insert(
            attribute,
            AttributeStats {
                cost: response.require_int(&format!("cost_{code}"))?,
                base: response.require_int(&format!("base_{code}"))?,
            },
        );
    }
    Ok(set)
}

/// `GetWorkData`. `None` when no job is offered.
pub fn work_offer(response: &Response) -> Result<Option<WorkOffer>> {
    let Some(gold_per_hour) = response.int("work_gold_per_hour")? else {
        return Ok(None);
    };
    Ok(Some(WorkOffer {
        gold_per_hour,
        experience_per_hour: response.int("work_exp_per_hour")?.unwrap_or(0),
        max_hours: response.require_int("work_max_hours")?,
    }))
}

/// `GetMapDetails`. `None` when the cave is not on offer.
pub fn map_offer(response: &Response) -> Result<Option<MapOffer>> {
    let Some(cost) = response.int("cave_cost")? else {
        return Ok(None);
    };
    Ok(Some(MapOffer {
        cost,
        available: response.boolean("cave_available")?.unwrap_or(false),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::fixtures::{body, boolean, int, nested, string};

    fn parse(members: &[String]) -> Response {
        Response::parse(&body(members)).unwrap()
    }

    fn adventure_entry(difficulty: i32, quest_id: i32, gold: i32) -> String {
        nested(
            "adventure",
            &[
                int("difficulty", difficulty),
                int("duration", 600),
                int("exp", 40),
                int("fight_chance", 25),
                int("gold", gold),
                int("quest_id", quest_id),
            ],
        )
    }

    fn catalog_body() -> Vec<String> {
        vec![
            int("adventures_made_today", 2),
            int("free_adventures_per_day", 12),
            adventure_entry(-1, 101, 300),
            adventure_entry(2, 102, 900),
        ]
    }

    #[test]
    fn account_snapshot() {
        let response = parse(&[int("bs", 5), int("gold", 2892), int("fame", 1639)]);
        let account = account(&response).unwrap();
        assert_eq!(
            account,
            AccountSnapshot {
                gems: 5,
                gold: 2892,
                fame: 1639
            }
        );
    }

    #[test]
    fn catalog_marker_decodes_to_catalog() {
        let outcome = adventure_outcome(&parse(&catalog_body())).unwrap();
        let AdventureOutcome::Catalog(catalog) = outcome else {
            panic!("expected catalog, got {outcome:?}");
        };
        assert_eq!(catalog.made_today, 2);
        assert_eq!(catalog.free_per_day, 12);
        assert_eq!(catalog.adventures.len(), 2);
        assert_eq!(catalog.adventures[0].difficulty, Difficulty::Easy);
        assert_eq!(catalog.adventures[1].quest_id, 102);
        assert_eq!(catalog.adventures[1].gold, 900);
    }

    #[test]
    fn reward_gold_decodes_to_completed() {
        let response = parse(&[
            int("reward_gold", 350),
            int("reward_exp", 80),
            int("reward_bloodstones", 1),
            boolean("item_found", true),
        ]);
        let outcome = adventure_outcome(&response).unwrap();
        assert_eq!(
            outcome,
            AdventureOutcome::Completed(AdventureReport {
                won: true,
                experience: 80,
                gold: 350,
                item_found: true,
                gems: 1,
            })
        );
    }

    #[test]
    fn completed_without_gold_is_a_loss() {
        let response = parse(&[
            int("reward_gold", 0),
            int("reward_exp", 3),
            int("reward_bloodstones", 0),
            boolean("item_found", false),
        ]);
        let AdventureOutcome::Completed(report) = adventure_outcome(&response).unwrap() else {
            panic!("expected completed");
        };
        assert!(!report.won);
        assert!(!report.item_found);
    }

    #[test]
    fn nothing_recognisable_decodes_to_busy() {
        let response = parse(&[int("work_remaining", 3600)]);
        assert_eq!(adventure_outcome(&response).unwrap(), AdventureOutcome::Busy);
    }

    #[test]
    fn running_adventure_decodes_to_running() {
        let response = parse(&[
            int("running_adventure_id", 77),
            int("running_adventure_time_remain", 421),
            int("running_adventure_time_total", 600),
        ]);
        assert_eq!(
            adventure_outcome(&response).unwrap(),
            AdventureOutcome::Running(RunningAdventure {
                id: Some(77),
                seconds_remaining: 421,
                seconds_total: Some(600),
            })
        );
    }

    #[test]
    fn running_id_alone_is_running() {
        let response = parse(&[int("running_adventure_id", 77)]);
        let AdventureOutcome::Running(running) = adventure_outcome(&response).unwrap() else {
            panic!("expected running");
        };
        assert_eq!(running.seconds_remaining, 0);
    }

    #[test]
    fn catalog_marker_wins_over_running_id() {
        let mut members = catalog_body();
        members.push(int("running_adventure_id", 0));
        let AdventureOutcome::Catalog(catalog) = adventure_outcome(&parse(&members)).unwrap() else {
            panic!("expected catalog");
        };
        assert_eq!(catalog.adventures.len(), 2);
    }

    #[test]
    fn misaligned_catalog_columns_are_rejected() {
        let mut members = catalog_body();
        members.push(int("quest_id", 999));
        assert!(matches!(
            catalog(&parse(&members)),
            Err(CodecError::MisalignedColumns { key: "quest_id", expected: 2, found: 3 })
        ));
    }

    #[test]
    fn unknown_difficulty_is_a_domain_error() {
        let members = vec![
            int("adventures_made_today", 0),
            int("free_adventures_per_day", 1),
            adventure_entry(5, 1, 1),
        ];
        assert!(matches!(
            catalog(&parse(&members)),
            Err(CodecError::Domain(_))
        ));
    }

    #[test]
    fn pvp_status_with_candidate() {
        let response = parse(&[
            int("free_reattacks", 2),
            string("guild_name", "Night Watch"),
            int("id", 4411),
            int("level", 37),
            string("name", "Rook"),
        ]);
        let status = pvp_status(&response).unwrap();
        assert_eq!(status.reattack_countdown, 0);
        assert_eq!(status.free_reattacks, Some(2));
        assert_eq!(
            status.candidate,
            Some(CombatTarget {
                name: "Rook".into(),
                id: 4411,
                level: 37,
                guild: Some("Night Watch".into()),
            })
        );
    }

    #[test]
    fn pvp_status_during_countdown() {
        let response = parse(&[int("reattack_countdown", 240)]);
        let status = pvp_status(&response).unwrap();
        assert_eq!(status.reattack_countdown, 240);
        assert!(status.candidate.is_none());
    }

    fn fight_body(hitpoints: i32, physical: i32, magic: i32, fame: i32, gold: i32) -> Vec<String> {
        vec![
            int("achieved_fame", fame),
            int("robbed_gold", gold),
            int("xp", 12),
            nested("self", &[int("hitpoints", hitpoints), int("level", 40)]),
            nested(
                "opponent",
                &[int("total_damage", physical), int("magic_damage", magic)],
            ),
        ]
    }

    #[test]
    fn attack_won_when_hitpoints_exceed_damage() {
        let outcome = attack(&parse(&fight_body(7533, 2500, 298, 31, 410)))
            .unwrap()
            .unwrap();
        assert!(outcome.won);
        assert_eq!(outcome.fame, 31);
        assert_eq!(outcome.gold, 410);
        assert_eq!(outcome.experience, 12);
    }

    #[test]
    fn attack_lost_negates_fame() {
        let outcome = attack(&parse(&fight_body(18792, 170000, 7360, 76, 0)))
            .unwrap()
            .unwrap();
        assert!(!outcome.won);
        assert_eq!(outcome.fame, -76);
        assert_eq!(outcome.gold, 0);
    }

    #[test]
    fn attack_without_fame_means_opponent_not_found() {
        let response = parse(&[string("error", "player_not_found")]);
        assert_eq!(attack(&response).unwrap(), None);
    }

    #[test]
    fn circle_unpacks_every_node() {
        let members: Vec<String> = (1..=16)
            .map(|id| string(&id.to_string(), &format!("{id}:500:3:{}:0:0:0:7", id * 100)))
            .collect();
        let nodes = circle(&parse(&members)).unwrap();
        assert_eq!(nodes.len(), 16);
        let jade = nodes
            .iter()
            .find(|node| node.kind == CircleNodeKind::Jade)
            .unwrap();
        assert_eq!(jade.level, 8);
        assert_eq!(jade.max_level, 500);
        assert_eq!(jade.gold_price, 800);
        assert_eq!(jade.effect_power, 7);
    }

    #[test]
    fn circle_rejects_short_packing() {
        let members: Vec<String> = (1..=16)
            .map(|id| string(&id.to_string(), "1:2:3"))
            .collect();
        assert!(matches!(
            circle(&parse(&members)),
            Err(CodecError::InvalidValue { .. })
        ));
    }

    #[test]
    fn attributes_read_cost_and_base() {
        let response = parse(&[
            int("cost_con", 2000),
            int("base_con", 623),
            int("cost_str", 1000),
            int("base_str", 500),
            int("cost_dex", 3000),
            int("base_dex", 700),
            int("cost_int", 1800),
            int("base_int", 583),
        ]);
        let set = attributes(&response).unwrap();
        assert_eq!(
            set.get(Attribute::Dexterity),
            Some(AttributeStats {
                cost: 3000,
                base: 700
            })
        );
        assert_eq!(set.get(Attribute::Intelligence).unwrap().base, 583);
    }

    #[test]
    fn offers_absent_without_primary_field() {
        let response = parse(&[int("gold", 1)]);
        assert_eq!(work_offer(&response).unwrap(), None);
        assert_eq!(map_offer(&response).unwrap(), None);
    }

    #[test]
    fn offers_present() {
        let response = parse(&[
            int("work_gold_per_hour", 45),
            int("work_exp_per_hour", 2),
            int("work_max_hours", 10),
            int("cave_cost", 0),
            boolean("cave_available", true),
        ]);
        assert_eq!(
            work_offer(&response).unwrap(),
            Some(WorkOffer {
                gold_per_hour: 45,
                experience_per_hour: 2,
                max_hours: 10
            })
        );
        assert!(map_offer(&response).unwrap().unwrap().is_free());
    }
}
