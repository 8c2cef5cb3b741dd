use serde::{Deserialize, Serialize};

/// Seconds a combo survives without a kill.
pub const COMBO_WINDOW: f32 = 3.0;
pub const MAX_COMBO_BONUS: f32 = 3.0;
const BONUS_PER_KILL: f32 = 0.1;

/// Consecutive-kill counter with a rolling timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    count: u32,
    timer: f32,
}

impl Combo {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn multiplier(&self) -> f32 {
        1.0 + (self.count as f32 * BONUS_PER_KILL).min(MAX_COMBO_BONUS)
    }

    pub fn register_kill(&mut self) {
        self.count = self.count.saturating_add(1);
        self.timer = COMBO_WINDOW;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.count == 0 {
            self.timer = 0.0;
            return;
        }
        self.timer = (self.timer - dt.max(0.0)).max(0.0);
        if self.timer <= 0.0 {
            self.count = 0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_grows_per_kill_and_caps() {
        let mut combo = Combo::default();
        assert_eq!(combo.multiplier(), 1.0);
        for _ in 0..3 {
            combo.register_kill();
        }
        assert!((combo.multiplier() - 1.3).abs() < 1e-6);
        for _ in 0..100 {
            combo.register_kill();
        }
        assert_eq!(combo.multiplier(), 1.0 + MAX_COMBO_BONUS);
    }

    #[test]
    fn lapses_exactly_when_the_timer_runs_out() {
        let mut combo = Combo::default();
        combo.register_kill();
        combo.register_kill();
        combo.tick(2.0);
        assert_eq!(combo.count(), 2);
        combo.tick(0.5);
        assert_eq!(combo.count(), 2);
        combo.tick(0.5);
        assert_eq!(combo.count(), 0);
        assert_eq!(combo.multiplier(), 1.0);
    }

    #[test]
    fn a_kill_refreshes_the_window() {
        let mut combo = Combo::default();
        combo.register_kill();
        combo.tick(2.9);
        combo.register_kill();
        combo.tick(2.9);
        assert_eq!(combo.count(), 2);
        assert!(combo.timer() > 0.0);
    }
}
