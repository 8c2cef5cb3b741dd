use crate::types::{AbilityId, Rgba};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityCategory {
    Projectile,
    Utility,
}

/// Timed modifier a projectile leaves on the enemy it hits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatusPayload {
    None,
    Burn { duration: f32 },
    Freeze { duration: f32 },
}

/// What a cast does, one variant per behavior family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbilityEffect {
    Projectile { speed: f32, lifetime: f32, piercing: bool, status: StatusPayload },
    Knockback { radius: f32, force: f32, damage_fraction: f32 },
    Ward { hits: u8 },
    GravityWell { radius: f32, duration: f32, damage_fraction: f32, drain_fraction: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: &'static str,
    pub base_damage: f32,
    pub mana_cost: f32,
    pub cooldown: f32,
    pub color: Rgba,
    /// Essence price to unlock permanently. Zero means owned from the start.
    pub unlock_price: u32,
    pub elemental: bool,
    pub effect: AbilityEffect,
}

impl AbilityDef {
    pub fn category(&self) -> AbilityCategory {
        match self.effect {
            AbilityEffect::Projectile { .. } => AbilityCategory::Projectile,
            _ => AbilityCategory::Utility,
        }
    }
}

pub fn ability_def(id: AbilityId) -> &'static AbilityDef {
    match id {
        AbilityId::MagicMissile => &MAGIC_MISSILE,
        AbilityId::Fireball => &FIREBALL,
        AbilityId::FrostLance => &FROST_LANCE,
        AbilityId::ChainLightning => &CHAIN_LIGHTNING,
        AbilityId::Shockwave => &SHOCKWAVE,
        AbilityId::Ward => &WARD,
        AbilityId::GravityWell => &GRAVITY_WELL,
    }
}

const MAGIC_MISSILE: AbilityDef = AbilityDef {
    id: AbilityId::MagicMissile,
    name: "Magic Missile",
    base_damage: 20.0,
    mana_cost: 5.0,
    cooldown: 0.4,
    color: Rgba::rgb(170, 120, 255),
    unlock_price: 0,
    elemental: false,
    effect: AbilityEffect::Projectile {
        speed: 10.0,
        lifetime: 2.0,
        piercing: false,
        status: StatusPayload::None,
    },
};

const FIREBALL: AbilityDef = AbilityDef {
    id: AbilityId::Fireball,
    name: "Fireball",
    base_damage: 35.0,
    mana_cost: 15.0,
    cooldown: 1.2,
    color: Rgba::rgb(255, 120, 40),
    unlock_price: 150,
    elemental: true,
    effect: AbilityEffect::Projectile {
        speed: 8.0,
        lifetime: 2.5,
        piercing: false,
        status: StatusPayload::Burn { duration: 3.0 },
    },
};

const FROST_LANCE: AbilityDef = AbilityDef {
    id: AbilityId::FrostLance,
    name: "Frost Lance",
    base_damage: 25.0,
    mana_cost: 12.0,
    cooldown: 1.0,
    color: Rgba::rgb(120, 200, 255),
    unlock_price: 200,
    elemental: true,
    effect: AbilityEffect::Projectile {
        speed: 12.0,
        lifetime: 2.0,
        piercing: false,
        status: StatusPayload::Freeze { duration: 2.5 },
    },
};

const CHAIN_LIGHTNING: AbilityDef = AbilityDef {
    id: AbilityId::ChainLightning,
    name: "Chain Lightning",
    base_damage: 30.0,
    mana_cost: 20.0,
    cooldown: 1.5,
    color: Rgba::rgb(255, 255, 120),
    unlock_price: 300,
    elemental: true,
    effect: AbilityEffect::Projectile {
        speed: 16.0,
        lifetime: 1.5,
        piercing: true,
        status: StatusPayload::None,
    },
};

const SHOCKWAVE: AbilityDef = AbilityDef {
    id: AbilityId::Shockwave,
    name: "Shockwave",
    base_damage: 30.0,
    mana_cost: 25.0,
    cooldown: 4.0,
    color: Rgba::rgb(220, 220, 220),
    unlock_price: 250,
    elemental: false,
    effect: AbilityEffect::Knockback { radius: 3.0, force: 1.5, damage_fraction: 0.5 },
};

const WARD: AbilityDef = AbilityDef {
    id: AbilityId::Ward,
    name: "Ward",
    base_damage: 0.0,
    mana_cost: 30.0,
    cooldown: 10.0,
    color: Rgba::rgb(90, 160, 255),
    unlock_price: 200,
    elemental: false,
    effect: AbilityEffect::Ward { hits: 3 },
};

const GRAVITY_WELL: AbilityDef = AbilityDef {
    id: AbilityId::GravityWell,
    name: "Gravity Well",
    base_damage: 40.0,
    mana_cost: 35.0,
    cooldown: 8.0,
    color: Rgba::rgb(150, 60, 200),
    unlock_price: 400,
    elemental: false,
    effect: AbilityEffect::GravityWell {
        radius: 4.0,
        duration: 3.0,
        damage_fraction: 0.5,
        drain_fraction: 0.25,
    },
};
