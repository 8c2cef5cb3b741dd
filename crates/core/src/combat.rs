//! Damage, reward and on-kill math. Nothing here touches game state; the
//! simulation feeds inputs in and applies the returned deltas.

mod area;
mod combo;
mod damage;
mod on_kill;
mod rewards;

pub use area::{Suspension, enemies_in_radius, knockback_destination};
pub use combo::{COMBO_WINDOW, Combo, MAX_COMBO_BONUS};
pub use damage::{CRIT_MULTIPLIER, CombatStats, Hit};
pub use on_kill::{DyingEnemy, Nearby, OnKillOutcome, resolve_on_kill};
pub use rewards::{KillReward, kill_reward};
