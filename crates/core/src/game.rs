//! The simulation loop: one owned `Game` advanced by `tick`, split across
//! focused submodules that each extend `impl Game`.

use std::mem;

use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::combat::{CombatStats, Combo};
use crate::config::{ConfigError, GameConfig};
use crate::content::{ClassBonuses, SPEED_BUFF_MULTIPLIER, active_bonuses, enemy_def};
use crate::feedback::{FeedbackEvent, FeedbackQueue, SoundCue};
use crate::grid::DungeonGrid;
use crate::pathfield::PathField;
use crate::progression::ProgressionSnapshot;
use crate::rng::{GameRng, mix_seed_stream};
use crate::state::*;
use crate::types::*;

mod allies;
mod enemies;
mod hash;
mod kills;
mod level;
mod pickups;
mod player;
mod projectiles;
mod secrets;
mod status;
mod tick;
mod view;

#[cfg(test)]
mod test_support;

pub use tick::FrameOutput;

const GAMEPLAY_STREAM: u64 = 0x6761_6D65;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum CastError {
    #[error("ability {0:?} is not equipped")]
    NotEquipped(AbilityId),
    #[error("no ability selected")]
    NothingSelected,
    #[error("ability on cooldown for {remaining:.2}s")]
    OnCooldown { remaining: f32 },
    #[error("not enough mana: need {need}, have {have}")]
    InsufficientMana { need: f32, have: f32 },
}

pub struct Game {
    seed: u64,
    config: GameConfig,
    progression: ProgressionSnapshot,
    progression_dirty: bool,
    bonuses: ClassBonuses,
    stats: CombatStats,
    rng: GameRng,
    state: GameState,
    path_field: PathField,
    feedback: FeedbackQueue,
    frame_feedback: Vec<FeedbackEvent>,
    log: Vec<LogEvent>,
    tick: u64,
    /// Simulation clock, seconds since the game was created.
    time: f32,
    outcome: Option<RunOutcome>,
    run_recorded: bool,
}

impl Game {
    pub fn new(
        seed: u64,
        config: GameConfig,
        progression: ProgressionSnapshot,
    ) -> Result<Self, ConfigError> {
        Self::with_depth(seed, config, progression, 1)
    }

    /// Starts a run directly at `depth`, for replays and tests.
    pub fn with_depth(
        seed: u64,
        config: GameConfig,
        progression: ProgressionSnapshot,
        depth: u32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bonuses = active_bonuses(progression.active_class);
        let stats = CombatStats::derive(&progression.upgrades, &bonuses);
        let upgrades = progression.upgrades;
        let max_health = (BASE_HEALTH + upgrades.max_health_bonus()) * bonuses.all_stats_multiplier;
        let max_mana = (BASE_MANA + upgrades.max_mana_bonus()) * bonuses.all_stats_multiplier;
        let player = Player::new(Vec2::ZERO, max_health, max_mana, progression.owned_abilities());

        let grid = DungeonGrid::filled(0, 0, TileKind::SOLID);
        let path_field = PathField::compute(&grid, Cell::new(0, 0));
        let mut game = Self {
            seed,
            config,
            progression,
            progression_dirty: false,
            bonuses,
            stats,
            rng: GameRng::seed_from_u64(mix_seed_stream(seed, GAMEPLAY_STREAM)),
            state: GameState {
                depth: 0,
                boss_level: false,
                grid,
                spawn_cell: Cell::new(0, 0),
                player,
                enemies: SlotMap::with_key(),
                projectiles: Vec::new(),
                items: Vec::new(),
                chests: Vec::new(),
                allies: Vec::new(),
                combo: Combo::default(),
                level_time: 0.0,
                boss_intro: 0.0,
                shake: 0.0,
                flash: 0.0,
                flash_color: Rgba::BLACK,
            },
            path_field,
            feedback: FeedbackQueue::default(),
            frame_feedback: Vec::new(),
            log: Vec::new(),
            tick: 0,
            time: 0.0,
            outcome: None,
            run_recorded: false,
        };
        game.install_level(depth.max(1));
        info!(seed, depth = game.state.depth, "run started");
        Ok(game)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn path_field(&self) -> &PathField {
        &self.path_field
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn combat_stats(&self) -> &CombatStats {
        &self.stats
    }

    pub fn progression(&self) -> &ProgressionSnapshot {
        &self.progression
    }

    /// Returns the snapshot once after it changed, for the shell to persist.
    pub fn take_progression_if_dirty(&mut self) -> Option<ProgressionSnapshot> {
        mem::take(&mut self.progression_dirty).then_some(self.progression)
    }

    fn mark_progression_dirty(&mut self) {
        self.progression_dirty = true;
    }

    fn push_log(&mut self, event: LogEvent) {
        self.log.push(event);
    }

    fn schedule_now(&mut self, event: FeedbackEvent) {
        self.feedback.schedule(self.time, event);
    }

    fn play(&mut self, cue: SoundCue) {
        self.schedule_now(FeedbackEvent::Sound(cue));
    }

    /// Upgrades or class changed mid-run.
    fn refresh_stats(&mut self) {
        self.stats = CombatStats::derive(&self.progression.upgrades, &self.bonuses);
        debug!(stats = ?self.stats, "combat stats refreshed");
    }

    fn effective_speed(&self) -> f32 {
        let mut speed = BASE_SPEED
            * self.progression.upgrades.speed_multiplier()
            * self.bonuses.speed_multiplier
            * self.bonuses.all_stats_multiplier;
        if self.state.player.buffs.is_active(BuffKind::SpeedBoost) {
            speed *= SPEED_BUFF_MULTIPLIER;
        }
        speed
    }

    fn enemy_hit_radius(kind: EnemyKind) -> f32 {
        enemy_def(kind).size.hit_radius()
    }
}
