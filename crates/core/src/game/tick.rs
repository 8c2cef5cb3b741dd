//! Fixed-order per-tick update and the frame entry point.

use super::*;
use crate::feedback::FrameFeedback;
use crate::input::ControlState;
use crate::render::{FrameReport, Surface, render_frame};

const FEEDBACK_DECAY_RATE: f32 = 8.0;
const VICTORY_GUARD_SECONDS: f32 = 1.0;
const SHAKE_PER_EXPLOSION: f32 = 0.6;

/// Everything one presented frame produced.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub tick: TickResult,
    pub feedback: FrameFeedback,
    pub report: FrameReport,
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

impl Game {
    /// Advances the world by `dt` seconds. Once an outcome is reached the
    /// world stops changing and every further tick reports it again.
    pub fn tick(&mut self, controls: &ControlState, dt: f32) -> TickResult {
        self.frame_feedback.clear();
        if let Some(outcome) = self.outcome {
            return TickResult { outcome: Some(outcome), pause_requested: false };
        }
        if controls.pause {
            return TickResult { outcome: None, pause_requested: true };
        }
        let controls = controls.sanitized();
        let dt = sanitize_dt(dt);
        self.tick += 1;
        self.time += dt;
        self.state.level_time += dt;

        // 1. Transient decay and run timers.
        self.decay_transients(dt);
        // 2. Player pose and mana, plus ability selection and casting.
        self.update_player(&controls, dt);
        // 3. Cooldowns.
        self.tick_cooldowns(dt);
        if controls.primary
            && let Err(error) = self.cast_selected()
        {
            debug!(%error, "cast rejected");
        }
        // 4-5. Projectile flight and hits.
        self.advance_projectiles(dt);
        self.resolve_projectile_hits();
        // 6. Shared distance field.
        self.path_field.recompute(&self.state.grid, self.state.player.cell());
        // 7. Enemies, their status effects, then allies.
        self.update_enemies(dt);
        self.update_allies(dt);
        // 8. Player buffs.
        self.state.player.buffs.tick(dt);
        // 9. Pickups and chests.
        self.collect_items();
        self.open_chests();
        // 10. Level-ups.
        self.apply_level_ups();
        self.state.player.clamp_pools();
        // 11. Terminal checks.
        let outcome = self.check_terminal();
        // 12. Secret doors.
        if controls.reveal {
            self.reveal_nearby_secrets();
        }
        // 13. Release due presentation events.
        self.present();

        TickResult { outcome, pause_requested: false }
    }

    /// Ticks the simulation then draws the result into `surface`.
    pub fn frame(&mut self, controls: &ControlState, dt: f32, surface: &mut Surface) -> FrameOutput {
        let tick = self.tick(controls, dt);
        let scene = self.render_scene();
        let report = render_frame(&scene, &self.config.render, surface);
        FrameOutput {
            tick,
            feedback: FrameFeedback { events: self.frame_feedback.clone() },
            report,
        }
    }

    fn decay_transients(&mut self, dt: f32) {
        let decay = (-FEEDBACK_DECAY_RATE * dt).exp();
        self.state.shake *= decay;
        self.state.flash *= decay;
        self.state.boss_intro = (self.state.boss_intro - dt).max(0.0);
        self.state.combo.tick(dt);
    }

    fn check_terminal(&mut self) -> Option<RunOutcome> {
        let outcome = if self.state.player.health <= 0.0 {
            RunOutcome::Death
        } else if self.state.enemies.is_empty()
            && self.state.level_time >= VICTORY_GUARD_SECONDS
        {
            RunOutcome::LevelCleared
        } else {
            return None;
        };
        self.finish(outcome);
        Some(outcome)
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.outcome = Some(outcome);
        self.state.projectiles.clear();
        let depth = self.state.depth;
        match outcome {
            RunOutcome::Death => {
                if !self.run_recorded {
                    let player = &self.state.player;
                    self.progression.record_run(player.kills as u64, player.gold as u64, depth);
                    self.run_recorded = true;
                }
            }
            RunOutcome::LevelCleared => {
                self.progression.deepest_level = self.progression.deepest_level.max(depth);
            }
        }
        self.mark_progression_dirty();
        self.push_log(LogEvent::RunEnded { outcome });
        info!(?outcome, depth, tick = self.tick, "run outcome reached");
    }

    fn present(&mut self) {
        let due = self.feedback.drain_due(self.time);
        for event in &due {
            match *event {
                FeedbackEvent::ScreenFlash { color, intensity } => {
                    self.state.flash = self.state.flash.max(intensity.clamp(0.0, 1.0));
                    self.state.flash_color = color;
                }
                FeedbackEvent::Explosion { .. } => {
                    self.state.shake = (self.state.shake + SHAKE_PER_EXPLOSION).min(2.0);
                }
                _ => {}
            }
        }
        self.frame_feedback = due;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn victory_waits_for_the_guard_time() {
        let mut game = open_room_game();
        let first = game.tick(&idle(), 0.5);
        assert_eq!(first.outcome, None);
        let second = game.tick(&idle(), 0.5);
        assert_eq!(second.outcome, Some(RunOutcome::LevelCleared));
        assert_eq!(game.progression().deepest_level, 1);
        assert!(game.take_progression_if_dirty().is_some());
        assert!(game.take_progression_if_dirty().is_none());
    }

    #[test]
    fn death_is_terminal_and_records_the_run() {
        let mut game = open_room_game();
        add_enemy(&mut game, EnemyKind::Rat, Vec2::new(10.5, 10.5));
        game.state.player.health = 0.0;
        let result = game.tick(&idle(), 0.016);
        assert_eq!(result.outcome, Some(RunOutcome::Death));
        assert_eq!(game.progression().total_runs, 1);

        let tick = game.current_tick();
        let again = game.tick(&idle(), 0.016);
        assert_eq!(again.outcome, Some(RunOutcome::Death));
        assert_eq!(game.current_tick(), tick);
        assert_eq!(game.progression().total_runs, 1);
    }

    #[test]
    fn pause_edge_skips_the_tick() {
        let mut game = open_room_game();
        let controls = ControlState { pause: true, move_y: 1.0, ..ControlState::default() };
        let before = game.state.player.pos;
        let result = game.tick(&controls, 0.1);
        assert!(result.pause_requested);
        assert_eq!(game.state.player.pos, before);
        assert_eq!(game.current_tick(), 0);
    }

    #[test]
    fn rejected_cast_still_advances_the_tick() {
        let mut game = open_room_game();
        add_enemy(&mut game, EnemyKind::Rat, Vec2::new(12.5, 12.5));
        game.state.player.mana = 0.0;
        let controls = ControlState { primary: true, ..ControlState::default() };
        let result = game.tick(&controls, 0.016);
        assert_eq!(result.outcome, None);
        assert_eq!(game.current_tick(), 1);
        assert!(game.state.projectiles.is_empty());
    }

    #[test]
    fn shake_and_flash_decay_exponentially() {
        let mut game = open_room_game();
        add_enemy(&mut game, EnemyKind::Rat, Vec2::new(12.5, 12.5));
        game.state.shake = 1.0;
        game.state.flash = 1.0;
        game.tick(&idle(), 0.1);
        let expected = (-0.8f32).exp();
        assert!((game.state.shake - expected).abs() < 1e-5);
        assert!((game.state.flash - expected).abs() < 1e-5);
    }

    #[test]
    fn frame_renders_and_reports_feedback() {
        let mut game = new_game(11);
        let mut surface = Surface::new(240, 135);
        let output = game.frame(&idle(), 0.016, &mut surface);
        assert_eq!(output.report.depth_buffer.len(), game.config().render.ray_count as usize);
        assert!(output.report.walls_drawn > 0);
    }
}
