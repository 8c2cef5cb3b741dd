//! Owned simulation state. Every entity list lives here and only the tick
//! mutates it; the renderer gets a read-only view.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::combat::{Combo, Suspension};
use crate::content::{StatusPayload, enemy_def};
use crate::grid::DungeonGrid;
use crate::types::{AbilityId, BuffKind, Cell, EnemyId, EnemyKind, PickupKind, Rgba, Vec2};

pub const PLAYER_RADIUS: f32 = 0.2;
pub const BASE_HEALTH: f32 = 100.0;
pub const BASE_MANA: f32 = 100.0;
pub const BASE_SPEED: f32 = 3.0;
pub const TURN_SPEED: f32 = 2.6;
pub const BASE_MANA_REGEN: f32 = 6.0;
pub const FIRST_LEVEL_XP: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub id: AbilityId,
    /// Seconds until the ability is ready; zero when ready.
    pub cooldown: f32,
}

/// Remaining seconds per timed buff; zero means inactive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Buffs {
    damage: f32,
    speed: f32,
    invincibility: f32,
}

impl Buffs {
    fn slot(&mut self, kind: BuffKind) -> &mut f32 {
        match kind {
            BuffKind::DamageBoost => &mut self.damage,
            BuffKind::SpeedBoost => &mut self.speed,
            BuffKind::Invincibility => &mut self.invincibility,
        }
    }

    pub fn remaining(&self, kind: BuffKind) -> f32 {
        match kind {
            BuffKind::DamageBoost => self.damage,
            BuffKind::SpeedBoost => self.speed,
            BuffKind::Invincibility => self.invincibility,
        }
    }

    pub fn is_active(&self, kind: BuffKind) -> bool {
        self.remaining(kind) > 0.0
    }

    /// Refreshes to `duration` unless a longer timer is already running.
    pub fn grant(&mut self, kind: BuffKind, duration: f32) {
        let slot = self.slot(kind);
        *slot = slot.max(duration.max(0.0));
    }

    pub fn tick(&mut self, dt: f32) {
        for timer in [&mut self.damage, &mut self.speed, &mut self.invincibility] {
            *timer = (*timer - dt).max(0.0);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub angle: f32,
    /// Vertical look offset, fraction of screen height.
    pub pitch: f32,
    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub gold: u32,
    pub kills: u32,
    pub essence_earned: u32,
    pub abilities: Vec<AbilitySlot>,
    pub selected: usize,
    pub buffs: Buffs,
    /// Hits the ward still absorbs.
    pub ward: Option<u8>,
}

impl Player {
    pub fn new(pos: Vec2, max_health: f32, max_mana: f32, abilities: Vec<AbilityId>) -> Self {
        Self {
            pos,
            angle: 0.0,
            pitch: 0.0,
            health: max_health,
            max_health,
            mana: max_mana,
            max_mana,
            level: 1,
            xp: 0,
            xp_to_next: FIRST_LEVEL_XP,
            gold: 0,
            kills: 0,
            essence_earned: 0,
            abilities: abilities.into_iter().map(|id| AbilitySlot { id, cooldown: 0.0 }).collect(),
            selected: 0,
            buffs: Buffs::default(),
            ward: None,
        }
    }

    pub fn cell(&self) -> Cell {
        self.pos.cell()
    }

    pub fn selected_ability(&self) -> Option<AbilityId> {
        self.abilities.get(self.selected).map(|slot| slot.id)
    }

    pub fn slot_mut(&mut self, id: AbilityId) -> Option<&mut AbilitySlot> {
        self.abilities.iter_mut().find(|slot| slot.id == id)
    }

    pub fn has_ability(&self, id: AbilityId) -> bool {
        self.abilities.iter().any(|slot| slot.id == id)
    }

    pub fn heal(&mut self, amount: f32) {
        if amount.is_finite() && amount > 0.0 {
            self.health = (self.health + amount).min(self.max_health);
        }
    }

    pub fn restore_mana(&mut self, amount: f32) {
        if amount.is_finite() && amount > 0.0 {
            self.mana = (self.mana + amount).min(self.max_mana);
        }
    }

    pub fn clamp_pools(&mut self) {
        self.health = self.health.clamp(0.0, self.max_health);
        self.mana = self.mana.clamp(0.0, self.max_mana);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Idle,
    Chasing,
    Attacking,
}

/// Timed modifiers on one enemy; zero means inactive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusEffects {
    pub frozen: f32,
    pub burning: f32,
    pub suspended: Option<Suspension>,
}

impl StatusEffects {
    pub fn apply(&mut self, payload: StatusPayload) {
        match payload {
            StatusPayload::None => {}
            StatusPayload::Burn { duration } => self.burning = self.burning.max(duration),
            StatusPayload::Freeze { duration } => self.frozen = self.frozen.max(duration),
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.is_some_and(|hold| hold.is_active())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub angle: f32,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    pub state: EnemyState,
    pub attack_cooldown: f32,
    pub boss: bool,
    /// One-shot boss summon already used.
    pub summoned: bool,
    pub status: StatusEffects,
}

impl Enemy {
    /// Fresh enemy with stats scaled by depth (and boss difficulty).
    pub fn spawn(kind: EnemyKind, pos: Vec2, scale: f32) -> Self {
        let def = enemy_def(kind);
        let scale = if scale.is_finite() { scale.max(0.1) } else { 1.0 };
        Self {
            kind,
            pos,
            angle: 0.0,
            health: def.hp * scale,
            max_health: def.hp * scale,
            damage: def.damage * scale,
            speed: def.speed,
            state: EnemyState::Idle,
            attack_cooldown: 0.0,
            boss: def.boss,
            summoned: false,
            status: StatusEffects::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOrigin {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    /// Unscaled damage; player projectiles are scaled at impact.
    pub damage: f32,
    pub lifetime: f32,
    pub origin: ProjectileOrigin,
    pub piercing: bool,
    pub elemental: bool,
    pub status: StatusPayload,
    pub color: Rgba,
    pub alive: bool,
    /// Enemies a piercing projectile already hit.
    pub hits: Vec<EnemyId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub collected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub pos: Vec2,
    pub opened: bool,
    pub in_secret_room: bool,
}

/// Transient summoned helper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ally {
    pub pos: Vec2,
    pub lifetime: f32,
    pub damage: f32,
    pub attack_cooldown: f32,
}

pub struct GameState {
    pub depth: u32,
    pub boss_level: bool,
    pub grid: DungeonGrid,
    pub spawn_cell: Cell,
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    pub chests: Vec<Chest>,
    pub allies: Vec<Ally>,
    pub combo: Combo,
    /// Seconds since the level started.
    pub level_time: f32,
    pub boss_intro: f32,
    pub shake: f32,
    pub flash: f32,
    pub flash_color: Rgba,
}
