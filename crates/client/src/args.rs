//! Command-line and environment configuration.
use clap::{ArgGroup, Parser};
use client_http::{DEFAULT_ENDPOINT, DEFAULT_GAME_PAGE};
use game_core::{AdventureStrategy, Attribute, CircleNodeKind, Difficulty, Priority};
use runtime::{EngineConfig, UpgradePolicy};

/// Plays a game account unattended.
///
/// Every flag can also be set through its `TBOT_*` environment variable or a
/// `.env` file.
#[derive(Debug, Parser)]
#[command(name = "tbot", version)]
#[command(group(
    ArgGroup::new("credentials")
        .required(true)
        .multiple(true)
        .args(["session_id", "refresh_token"])
))]
pub struct Args {
    /// Currently active session id.
    #[arg(long, env = "TBOT_SESSION_ID")]
    pub session_id: Option<String>,

    /// Long-lived login token, used to refresh the session when it expires.
    #[arg(long, env = "TBOT_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Circle node to keep upgrading, e.g. `jade` or `rune_of_glory`.
    #[arg(long, env = "TBOT_RUNE", conflicts_with = "auto_runes")]
    pub rune: Option<CircleNodeKind>,

    /// Upgrade circle nodes in the built-in priority order.
    #[arg(long, env = "TBOT_AUTO_RUNES")]
    pub auto_runes: bool,

    /// Attribute to keep raising: CON, STR, DEX or INT.
    #[arg(long, env = "TBOT_ATTRIBUTE", conflicts_with = "auto_attributes")]
    pub attribute: Option<Attribute>,

    /// Raise the cheapest attribute, favouring Intelligence once costs grow.
    #[arg(long, env = "TBOT_AUTO_ATTRIBUTES")]
    pub auto_attributes: bool,

    /// Rank adventures by gold instead of experience.
    #[arg(long, env = "TBOT_PRIORITIZE_GOLD")]
    pub prioritize_gold: bool,

    /// Spend gems on adventures once the free ones are gone.
    #[arg(long, env = "TBOT_USE_GEMS")]
    pub use_gems: bool,

    /// Never attack players above this level.
    #[arg(long, env = "TBOT_MAX_ATTACK_LEVEL")]
    pub max_attack_level: Option<i32>,

    /// Hardest adventure to accept.
    #[arg(long, env = "TBOT_MAX_DIFFICULTY", default_value_t = Difficulty::Difficult)]
    pub max_difficulty: Difficulty,

    /// Adventure ranking: max_value, max_per_minute or best_combined.
    #[arg(long, env = "TBOT_STRATEGY", default_value_t = AdventureStrategy::MaxValue)]
    pub strategy: AdventureStrategy,

    /// Work until next morning once adventures run out.
    #[arg(long, env = "TBOT_AUTO_WORK")]
    pub auto_work: bool,

    /// Explore the cave whenever it is free.
    #[arg(long, env = "TBOT_AUTO_MAP")]
    pub auto_map: bool,

    #[arg(long, env = "TBOT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Page the session id is read from when refreshing.
    #[arg(long, env = "TBOT_GAME_PAGE", default_value = DEFAULT_GAME_PAGE)]
    pub game_page: String,
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            circle: policy(self.rune, self.auto_runes),
            attributes: policy(self.attribute, self.auto_attributes),
            priority: if self.prioritize_gold {
                Priority::Gold
            } else {
                Priority::Experience
            },
            use_gems: self.use_gems,
            max_attack_level: self.max_attack_level,
            max_difficulty: self.max_difficulty,
            strategy: self.strategy,
            auto_work: self.auto_work,
            auto_map: self.auto_map,
            ..EngineConfig::default()
        }
    }
}

fn policy<T>(pinned: Option<T>, auto: bool) -> UpgradePolicy<T> {
    match (pinned, auto) {
        (Some(value), _) => UpgradePolicy::Pinned(value),
        (None, true) => UpgradePolicy::Auto,
        (None, false) => UpgradePolicy::Disabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("tbot").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_with_session_only() {
        let args = parse(&["--session-id", "abc"]).unwrap();
        let config = args.engine_config();

        assert_eq!(config.circle, UpgradePolicy::Disabled);
        assert_eq!(config.attributes, UpgradePolicy::Disabled);
        assert_eq!(config.priority, Priority::Experience);
        assert_eq!(config.max_difficulty, Difficulty::Difficult);
        assert_eq!(config.strategy, AdventureStrategy::MaxValue);
        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn a_credential_is_required() {
        assert!(parse(&["--auto-runes"]).is_err());
        assert!(parse(&["--refresh-token", "token"]).is_ok());
    }

    #[test]
    fn pin_and_auto_exclude_each_other() {
        assert!(parse(&["--session-id", "s", "--rune", "jade", "--auto-runes"]).is_err());
        assert!(parse(&["--session-id", "s", "--attribute", "STR", "--auto-attributes"]).is_err());
    }

    #[test]
    fn enum_flags_parse_case_insensitively() {
        let args = parse(&[
            "--session-id",
            "s",
            "--rune",
            "Rune_Of_Glory",
            "--attribute",
            "dex",
            "--max-difficulty",
            "very_difficult",
            "--strategy",
            "best_combined",
            "--prioritize-gold",
        ])
        .unwrap();
        let config = args.engine_config();

        assert_eq!(config.circle, UpgradePolicy::Pinned(CircleNodeKind::RuneOfGlory));
        assert_eq!(config.attributes, UpgradePolicy::Pinned(Attribute::Dexterity));
        assert_eq!(config.max_difficulty, Difficulty::VeryDifficult);
        assert_eq!(config.strategy, AdventureStrategy::BestCombined);
        assert_eq!(config.priority, Priority::Gold);
    }

    #[test]
    fn unknown_rune_is_rejected() {
        assert!(parse(&["--session-id", "s", "--rune", "obsidian"]).is_err());
    }
}
