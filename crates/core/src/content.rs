//! Static catalog tables keyed by enum tags.
//! Behavior differences live in the table rows, so gameplay code looks a row
//! up by tag instead of branching on names.

pub mod abilities;
pub mod classes;
pub mod enemies;
pub mod pickups;

pub use abilities::{AbilityCategory, AbilityDef, AbilityEffect, StatusPayload, ability_def};
pub use classes::{
    ChainBonus, ClassBonuses, ExplosiveDeath, PrestigeClass, active_bonuses, class_def,
};
pub use enemies::{Behavior, EnemyDef, SizeClass, boss_for_depth, enemy_def, regular_pool};
pub use pickups::{
    DAMAGE_BUFF_MULTIPLIER, PickupDef, PickupEffect, SPEED_BUFF_MULTIPLIER, pickup_def,
};

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{AbilityId, EnemyKind, PickupKind, PrestigeClassId};

/// Fingerprint of the tuning tables. Journals record it so a replay against
/// retuned content is detected instead of silently diverging.
pub fn content_hash() -> u64 {
    let mut text = String::new();
    for id in AbilityId::ALL {
        text.push_str(&format!("{:?}", ability_def(id)));
    }
    for kind in EnemyKind::ALL {
        text.push_str(&format!("{:?}", enemy_def(kind)));
    }
    for kind in PickupKind::ALL {
        text.push_str(&format!("{:?}", pickup_def(kind)));
    }
    for id in PrestigeClassId::ALL {
        text.push_str(&format!("{:?}", class_def(id)));
    }
    xxh3_64(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_stable_within_a_build() {
        assert_eq!(content_hash(), content_hash());
    }
}
