//! Per-enemy timed modifiers: freeze, burn and gravity suspension.

use super::*;
use super::kills::KillSource;

pub(super) const FREEZE_SLOW: f32 = 0.4;
const BURN_DPS: f32 = 8.0;

impl Game {
    /// Expires timers and applies damage over time. Returns `false` when the
    /// enemy died (and went through the kill path) this tick.
    pub(super) fn tick_status(&mut self, id: EnemyId, dt: f32) -> bool {
        let Some(enemy) = self.state.enemies.get_mut(id) else {
            return false;
        };
        let status = &mut enemy.status;
        status.frozen = (status.frozen - dt).max(0.0);

        let burn_time = status.burning.min(dt);
        status.burning = (status.burning - dt).max(0.0);
        let burn = BURN_DPS * burn_time;

        let (drain, hold) = match status.suspended.as_mut() {
            Some(hold) => (hold.advance(dt), hold.drain_fraction),
            None => (0.0, 0.0),
        };
        if status.suspended.is_some_and(|hold| !hold.is_active()) {
            status.suspended = None;
        }

        if burn > 0.0 {
            self.damage_enemy(id, burn);
        }
        if drain > 0.0 {
            let dealt = self.damage_enemy(id, drain).unwrap_or(0.0);
            self.state.player.heal(dealt * hold);
        }
        if self.state.enemies.get(id).is_some_and(Enemy::is_dead) {
            self.kill_enemy(id, KillSource::Direct);
            return false;
        }
        true
    }
}
