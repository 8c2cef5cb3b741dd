use crate::types::{EnemyKind, Rgba};

/// Movement and attack family used by the enemy update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    Melee,
    /// Keeps `standoff` cells away and fires projectiles at `projectile_speed`.
    Ranged { standoff: f32, projectile_speed: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
    Huge,
}

impl SizeClass {
    /// Billboard scale relative to a wall column.
    pub fn billboard_scale(self) -> f32 {
        match self {
            Self::Small => 0.4,
            Self::Medium => 0.7,
            Self::Large => 0.9,
            Self::Huge => 1.2,
        }
    }

    pub fn hit_radius(self) -> f32 {
        match self {
            Self::Small => 0.3,
            Self::Medium => 0.4,
            Self::Large => 0.5,
            Self::Huge => 0.7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyDef {
    pub kind: EnemyKind,
    pub name: &'static str,
    pub hp: f32,
    pub damage: f32,
    pub speed: f32,
    pub size: SizeClass,
    pub behavior: Behavior,
    pub detection_radius: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub xp: u32,
    pub gold: u32,
    pub essence: u32,
    pub color: Rgba,
    pub boss: bool,
}

pub fn enemy_def(kind: EnemyKind) -> &'static EnemyDef {
    match kind {
        EnemyKind::Rat => &RAT,
        EnemyKind::Skeleton => &SKELETON,
        EnemyKind::Ghoul => &GHOUL,
        EnemyKind::Ogre => &OGRE,
        EnemyKind::SkeletonArcher => &SKELETON_ARCHER,
        EnemyKind::Warlock => &WARLOCK,
        EnemyKind::DemonLord => &DEMON_LORD,
        EnemyKind::BoneColossus => &BONE_COLOSSUS,
    }
}

/// Regular kinds that may appear at `depth`; deeper levels widen the pool.
pub fn regular_pool(depth: u32) -> &'static [EnemyKind] {
    const SHALLOW: &[EnemyKind] = &[EnemyKind::Rat, EnemyKind::Skeleton];
    const MIDDLE: &[EnemyKind] =
        &[EnemyKind::Rat, EnemyKind::Skeleton, EnemyKind::Ghoul, EnemyKind::SkeletonArcher];
    const DEEP: &[EnemyKind] = &[
        EnemyKind::Skeleton,
        EnemyKind::Ghoul,
        EnemyKind::SkeletonArcher,
        EnemyKind::Ogre,
        EnemyKind::Warlock,
    ];
    match depth {
        0..=1 => SHALLOW,
        2..=3 => MIDDLE,
        _ => DEEP,
    }
}

/// Bosses alternate between the two boss kinds every fifth level.
pub fn boss_for_depth(depth: u32) -> EnemyKind {
    if (depth / 5) % 2 == 1 { EnemyKind::DemonLord } else { EnemyKind::BoneColossus }
}

const RAT: EnemyDef = EnemyDef {
    kind: EnemyKind::Rat,
    name: "Rat",
    hp: 20.0,
    damage: 5.0,
    speed: 2.2,
    size: SizeClass::Small,
    behavior: Behavior::Melee,
    detection_radius: 7.0,
    attack_range: 0.8,
    attack_cooldown: 0.8,
    xp: 8,
    gold: 2,
    essence: 0,
    color: Rgba::rgb(130, 110, 90),
    boss: false,
};

const SKELETON: EnemyDef = EnemyDef {
    kind: EnemyKind::Skeleton,
    name: "Skeleton",
    hp: 40.0,
    damage: 8.0,
    speed: 1.6,
    size: SizeClass::Medium,
    behavior: Behavior::Melee,
    detection_radius: 8.0,
    attack_range: 0.9,
    attack_cooldown: 1.0,
    xp: 15,
    gold: 5,
    essence: 1,
    color: Rgba::rgb(225, 220, 200),
    boss: false,
};

const GHOUL: EnemyDef = EnemyDef {
    kind: EnemyKind::Ghoul,
    name: "Ghoul",
    hp: 55.0,
    damage: 10.0,
    speed: 1.9,
    size: SizeClass::Medium,
    behavior: Behavior::Melee,
    detection_radius: 9.0,
    attack_range: 0.9,
    attack_cooldown: 1.1,
    xp: 20,
    gold: 6,
    essence: 1,
    color: Rgba::rgb(110, 150, 100),
    boss: false,
};

const OGRE: EnemyDef = EnemyDef {
    kind: EnemyKind::Ogre,
    name: "Ogre",
    hp: 120.0,
    damage: 18.0,
    speed: 1.1,
    size: SizeClass::Large,
    behavior: Behavior::Melee,
    detection_radius: 7.0,
    attack_range: 1.2,
    attack_cooldown: 1.6,
    xp: 40,
    gold: 12,
    essence: 2,
    color: Rgba::rgb(150, 120, 70),
    boss: false,
};

const SKELETON_ARCHER: EnemyDef = EnemyDef {
    kind: EnemyKind::SkeletonArcher,
    name: "Skeleton Archer",
    hp: 30.0,
    damage: 7.0,
    speed: 1.5,
    size: SizeClass::Medium,
    behavior: Behavior::Ranged { standoff: 4.5, projectile_speed: 6.0 },
    detection_radius: 10.0,
    attack_range: 7.0,
    attack_cooldown: 1.8,
    xp: 18,
    gold: 6,
    essence: 1,
    color: Rgba::rgb(200, 200, 180),
    boss: false,
};

const WARLOCK: EnemyDef = EnemyDef {
    kind: EnemyKind::Warlock,
    name: "Warlock",
    hp: 45.0,
    damage: 12.0,
    speed: 1.3,
    size: SizeClass::Medium,
    behavior: Behavior::Ranged { standoff: 5.0, projectile_speed: 5.0 },
    detection_radius: 11.0,
    attack_range: 8.0,
    attack_cooldown: 2.2,
    xp: 30,
    gold: 10,
    essence: 2,
    color: Rgba::rgb(120, 50, 160),
    boss: false,
};

const DEMON_LORD: EnemyDef = EnemyDef {
    kind: EnemyKind::DemonLord,
    name: "Demon Lord",
    hp: 600.0,
    damage: 25.0,
    speed: 1.4,
    size: SizeClass::Huge,
    behavior: Behavior::Melee,
    detection_radius: 14.0,
    attack_range: 1.5,
    attack_cooldown: 1.4,
    xp: 300,
    gold: 100,
    essence: 15,
    color: Rgba::rgb(200, 40, 30),
    boss: true,
};

const BONE_COLOSSUS: EnemyDef = EnemyDef {
    kind: EnemyKind::BoneColossus,
    name: "Bone Colossus",
    hp: 800.0,
    damage: 30.0,
    speed: 1.0,
    size: SizeClass::Huge,
    behavior: Behavior::Melee,
    detection_radius: 14.0,
    attack_range: 1.6,
    attack_cooldown: 1.8,
    xp: 350,
    gold: 120,
    essence: 20,
    color: Rgba::rgb(235, 230, 210),
    boss: true,
};
