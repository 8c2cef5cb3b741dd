//! Prestige-class effects triggered by a kill.

use crate::content::ClassBonuses;
use crate::types::{EnemyId, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DyingEnemy {
    pub pos: Vec2,
    pub max_health: f32,
}

/// A surviving enemy near the kill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearby {
    pub id: EnemyId,
    pub pos: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OnKillOutcome {
    /// Damage to apply to surviving enemies, at most one entry per enemy.
    pub damage: Vec<(EnemyId, f32)>,
    /// Center and radius of an explosive death.
    pub explosion: Option<(Vec2, f32)>,
    /// Targets hit by chained damage, nearest first.
    pub chained: Vec<EnemyId>,
    pub summon_ally: bool,
    pub heal: f32,
}

fn add_damage(damage: &mut Vec<(EnemyId, f32)>, id: EnemyId, amount: f32) {
    match damage.iter_mut().find(|(existing, _)| *existing == id) {
        Some((_, total)) => *total += amount,
        None => damage.push((id, amount)),
    }
}

/// Effects of the active class for one kill. `summon_roll` is a uniform
/// sample in `[0, 1)` drawn by the caller.
pub fn resolve_on_kill(
    dying: DyingEnemy,
    nearby: &[Nearby],
    bonuses: &ClassBonuses,
    summon_roll: f32,
) -> OnKillOutcome {
    let mut outcome = OnKillOutcome { heal: bonuses.heal_on_kill.max(0.0), ..Default::default() };

    if let Some(explosive) = bonuses.explosive_death {
        let amount = dying.max_health * explosive.damage_fraction;
        for enemy in nearby.iter().filter(|e| e.pos.distance(dying.pos) <= explosive.radius) {
            add_damage(&mut outcome.damage, enemy.id, amount);
        }
        outcome.explosion = Some((dying.pos, explosive.radius));
    }

    if let Some(chain) = bonuses.chain {
        let mut in_range: Vec<(f32, usize)> = nearby
            .iter()
            .enumerate()
            .map(|(index, enemy)| (enemy.pos.distance(dying.pos), index))
            .filter(|&(distance, _)| distance <= chain.radius)
            .collect();
        in_range.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        for (_, index) in in_range.into_iter().take(chain.targets) {
            let id = nearby[index].id;
            add_damage(&mut outcome.damage, id, chain.damage);
            outcome.chained.push(id);
        }
    }

    outcome.summon_ally = bonuses.summon_chance > 0.0 && summon_roll < bonuses.summon_chance;
    outcome
}
