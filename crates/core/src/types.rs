use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
}

/// Continuous position or direction in grid units (one unit per cell).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_angle(angle: f32) -> Self {
        Self { x: angle.cos(), y: angle.sin() }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    pub fn angle_to(self, other: Self) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn normalized(self) -> Self {
        let length = self.length();
        if length <= f32::EPSILON || !length.is_finite() {
            return Self::ZERO;
        }
        Self { x: self.x / length, y: self.y / length }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Grid cell containing this point.
    pub fn cell(self) -> Cell {
        Cell { y: self.y.floor() as i32, x: self.x.floor() as i32 }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Integer grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn center(self) -> Vec2 {
        Vec2 { x: self.x as f32 + 0.5, y: self.y as f32 + 0.5 }
    }

    pub fn neighbors(self) -> [Cell; 4] {
        [
            Cell { y: self.y - 1, x: self.x },
            Cell { y: self.y, x: self.x + 1 },
            Cell { y: self.y + 1, x: self.x },
            Cell { y: self.y, x: self.x - 1 },
        ]
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WallStyle {
    Stone,
    Brick,
    Mossy,
    Cracked,
    Crystal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall(WallStyle),
    SecretDoor,
}

impl TileKind {
    pub const SOLID: Self = Self::Wall(WallStyle::Stone);

    pub fn is_floor(self) -> bool {
        self == Self::Floor
    }

    /// Stable per-tile code used for canonical level bytes.
    pub fn code(self) -> u8 {
        match self {
            Self::Floor => 0,
            Self::Wall(WallStyle::Stone) => 1,
            Self::Wall(WallStyle::Brick) => 2,
            Self::Wall(WallStyle::Mossy) => 3,
            Self::Wall(WallStyle::Cracked) => 4,
            Self::Wall(WallStyle::Crystal) => 5,
            Self::SecretDoor => 9,
        }
    }
}

/// Straight RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Multiply the color channels by `factor`, clamped to the displayable range.
    pub fn shade(self, factor: f32) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 0.0 };
        let scale = |channel: u8| (channel as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self { r: scale(self.r), g: scale(self.g), b: scale(self.b), a: self.a }
    }

    /// Linear blend toward `other`; `t = 0` keeps `self`.
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let blend = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: blend(self.r, other.r),
            g: blend(self.g, other.g),
            b: blend(self.b, other.b),
            a: blend(self.a, other.a),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Rat,
    Skeleton,
    Ghoul,
    Ogre,
    SkeletonArcher,
    Warlock,
    DemonLord,
    BoneColossus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    MagicMissile,
    Fireball,
    FrostLance,
    ChainLightning,
    Shockwave,
    Ward,
    GravityWell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    HealthPotion,
    ManaPotion,
    DamageTonic,
    SwiftnessTonic,
    InvulnerabilityCharm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuffKind {
    DamageBoost,
    SpeedBoost,
    Invincibility,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Health,
    Mana,
    Damage,
    Speed,
    ManaRegen,
    GoldGain,
    CritChance,
    LifeSteal,
    EssenceGain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrestigeClassId {
    Pyromancer,
    Necromancer,
    Stormcaller,
    Assassin,
    Paladin,
}

impl EnemyKind {
    pub const ALL: [Self; 8] = [
        Self::Rat,
        Self::Skeleton,
        Self::Ghoul,
        Self::Ogre,
        Self::SkeletonArcher,
        Self::Warlock,
        Self::DemonLord,
        Self::BoneColossus,
    ];
}

impl AbilityId {
    pub const ALL: [Self; 7] = [
        Self::MagicMissile,
        Self::Fireball,
        Self::FrostLance,
        Self::ChainLightning,
        Self::Shockwave,
        Self::Ward,
        Self::GravityWell,
    ];

    /// Bit in the persisted unlocked-abilities mask.
    pub fn bit(self) -> i64 {
        1 << (self as u32)
    }
}

impl PickupKind {
    pub const ALL: [Self; 5] = [
        Self::HealthPotion,
        Self::ManaPotion,
        Self::DamageTonic,
        Self::SwiftnessTonic,
        Self::InvulnerabilityCharm,
    ];
}

impl UpgradeKind {
    pub const COUNT: usize = 9;
    pub const ALL: [Self; Self::COUNT] = [
        Self::Health,
        Self::Mana,
        Self::Damage,
        Self::Speed,
        Self::ManaRegen,
        Self::GoldGain,
        Self::CritChance,
        Self::LifeSteal,
        Self::EssenceGain,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Mana => "mana",
            Self::Damage => "damage",
            Self::Speed => "speed",
            Self::ManaRegen => "mana_regen",
            Self::GoldGain => "gold_gain",
            Self::CritChance => "crit_chance",
            Self::LifeSteal => "life_steal",
            Self::EssenceGain => "essence_gain",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl PrestigeClassId {
    pub const ALL: [Self; 5] =
        [Self::Pyromancer, Self::Necromancer, Self::Stormcaller, Self::Assassin, Self::Paladin];

    /// Persisted identifier; zero is reserved for "no class".
    pub fn code(self) -> i64 {
        self as i64 + 1
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.code() == code)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestReward {
    Gold(u32),
    Upgrade(UpgradeKind),
    Ability(AbilityId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Death,
    LevelCleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TickResult {
    pub outcome: Option<RunOutcome>,
    pub pause_requested: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    LevelStarted { depth: u32, boss_level: bool },
    AbilityCast { ability: AbilityId },
    EnemyKilled { kind: EnemyKind, xp: u32, gold: u32, essence: u32 },
    PlayerDamaged { amount: f32 },
    WardAbsorbed { remaining: u8 },
    LevelUp { level: u32 },
    PickupCollected { kind: PickupKind },
    ChestOpened { reward: ChestReward },
    SecretDoorRevealed { cell: Cell },
    BossSummoned { count: usize },
    AllySummoned,
    RunEnded { outcome: RunOutcome },
}
