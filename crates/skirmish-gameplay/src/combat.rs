//! Fighter-vs-fighter combat resolution.
//!
//! Runs once per frame after both fighters have moved and landed. Damage is
//! a flat amount; there is no blocking, knockback or damage scaling. Because
//! `is_attacking` is a one-frame pulse, a held overlap deals at most one hit
//! per attack cooldown window.

use serde::{Deserialize, Serialize};
use skirmish_common::{check_collision, PlayerSlot};
use tracing::debug;

use crate::fighter::Fighter;
use crate::rules::MatchRules;

/// A landed attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// Fighter that attacked
    pub attacker: PlayerSlot,
    /// Fighter that took damage
    pub target: PlayerSlot,
    /// Health removed
    pub damage: i32,
    /// Target health after the hit (may be negative)
    pub target_health: i32,
}

/// Applies attack damage between overlapping fighters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResolver {
    /// Health removed per landed attack
    pub damage: i32,
}

impl CombatResolver {
    /// Creates a resolver dealing `damage` per hit.
    #[must_use]
    pub const fn new(damage: i32) -> Self {
        Self { damage }
    }

    /// Builds the resolver for a rule set.
    #[must_use]
    pub fn from_rules(rules: &MatchRules) -> Self {
        Self::new(rules.attack_damage)
    }

    /// Resolves one frame of contact between the two fighters.
    ///
    /// Player one's attack is checked first: if both attack on the same
    /// frame only player two is damaged. An overlap with no attack clears
    /// both attack effects.
    pub fn resolve(&self, fighters: &mut [Fighter; 2]) -> Option<Hit> {
        let [one, two] = fighters;
        if !check_collision(&*one, &*two) {
            return None;
        }

        if one.is_attacking {
            Some(self.strike(one, two))
        } else if two.is_attacking {
            Some(self.strike(two, one))
        } else {
            one.attack_effect_active = false;
            two.attack_effect_active = false;
            None
        }
    }

    fn strike(&self, attacker: &Fighter, target: &mut Fighter) -> Hit {
        target.health -= self.damage;
        target.attack_effect_active = true;
        target.is_hit = true;

        debug!(
            attacker = %attacker.slot,
            target = %target.slot,
            health = target.health,
            "Attack landed"
        );

        Hit {
            attacker: attacker.slot,
            target: target.slot,
            damage: self.damage,
            target_health: target.health,
        }
    }
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::new(10)
    }
}
