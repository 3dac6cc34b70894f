//! Opponent lookup and attack results.

/// An opponent worth attacking.
///
/// The engine holds one across ticks while it keeps robbing the same player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatTarget {
    pub name: String,
    pub id: i32,
    pub level: i32,
    pub guild: Option<String>,
}

/// Result of an opponent lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PvpStatus {
    pub free_reattacks: Option<i32>,
    /// Seconds until the next attack is allowed; zero when attacking is open.
    pub reattack_countdown: i32,
    /// Random opponent offered by the server, if any.
    pub candidate: Option<CombatTarget>,
}

/// Raw numbers reported for a fight, before the winner is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatReport {
    pub fame: i32,
    pub gold: i32,
    pub experience: i32,
    pub self_hitpoints: i32,
    pub opponent_physical_damage: i32,
    pub opponent_magic_damage: i32,
}

/// Outcome of an attack from the attacker's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub won: bool,
    /// Fame delta; negative on a loss.
    pub fame: i32,
    /// Gold stolen; zero on a loss.
    pub gold: i32,
    pub experience: i32,
}

impl AttackOutcome {
    /// Derives the outcome from a fight report.
    ///
    /// The server never says who won. The attacker won iff their hit points
    /// exceed the total damage the opponent dealt.
    pub fn resolve(report: CombatReport) -> Self {
        let damage_taken = report
            .opponent_physical_damage
            .saturating_add(report.opponent_magic_damage);
        let won = report.self_hitpoints > damage_taken;

        Self {
            won,
            fame: if won { report.fame } else { -report.fame },
            gold: if won { report.gold } else { 0 },
            experience: report.experience,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(hitpoints: i32, physical: i32, magic: i32) -> CombatReport {
        CombatReport {
            fame: 76,
            gold: 120,
            experience: 30,
            self_hitpoints: hitpoints,
            opponent_physical_damage: physical,
            opponent_magic_damage: magic,
        }
    }

    #[test]
    fn attacker_wins_when_hitpoints_exceed_damage() {
        let outcome = AttackOutcome::resolve(report(7533, 2000, 798));
        assert!(outcome.won);
        assert_eq!(outcome.fame, 76);
        assert_eq!(outcome.gold, 120);
        assert_eq!(outcome.experience, 30);
    }

    #[test]
    fn attacker_loses_negates_fame_and_drops_gold() {
        let outcome = AttackOutcome::resolve(report(18792, 170000, 7360));
        assert!(!outcome.won);
        assert_eq!(outcome.fame, -76);
        assert_eq!(outcome.gold, 0);
    }

    #[test]
    fn equal_damage_is_a_loss() {
        let outcome = AttackOutcome::resolve(report(100, 60, 40));
        assert!(!outcome.won);
    }
}
