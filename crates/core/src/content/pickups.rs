use crate::types::{BuffKind, PickupKind, Rgba};

pub const DAMAGE_BUFF_MULTIPLIER: f32 = 1.5;
pub const SPEED_BUFF_MULTIPLIER: f32 = 1.4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickupEffect {
    RestoreHealth(f32),
    RestoreMana(f32),
    Buff { kind: BuffKind, duration: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupDef {
    pub kind: PickupKind,
    pub name: &'static str,
    pub effect: PickupEffect,
    pub color: Rgba,
}

pub fn pickup_def(kind: PickupKind) -> &'static PickupDef {
    match kind {
        PickupKind::HealthPotion => &HEALTH_POTION,
        PickupKind::ManaPotion => &MANA_POTION,
        PickupKind::DamageTonic => &DAMAGE_TONIC,
        PickupKind::SwiftnessTonic => &SWIFTNESS_TONIC,
        PickupKind::InvulnerabilityCharm => &INVULNERABILITY_CHARM,
    }
}

const HEALTH_POTION: PickupDef = PickupDef {
    kind: PickupKind::HealthPotion,
    name: "Health Potion",
    effect: PickupEffect::RestoreHealth(30.0),
    color: Rgba::rgb(220, 40, 60),
};

const MANA_POTION: PickupDef = PickupDef {
    kind: PickupKind::ManaPotion,
    name: "Mana Potion",
    effect: PickupEffect::RestoreMana(40.0),
    color: Rgba::rgb(60, 90, 230),
};

const DAMAGE_TONIC: PickupDef = PickupDef {
    kind: PickupKind::DamageTonic,
    name: "Damage Tonic",
    effect: PickupEffect::Buff { kind: BuffKind::DamageBoost, duration: 10.0 },
    color: Rgba::rgb(250, 150, 30),
};

const SWIFTNESS_TONIC: PickupDef = PickupDef {
    kind: PickupKind::SwiftnessTonic,
    name: "Swiftness Tonic",
    effect: PickupEffect::Buff { kind: BuffKind::SpeedBoost, duration: 10.0 },
    color: Rgba::rgb(80, 230, 120),
};

const INVULNERABILITY_CHARM: PickupDef = PickupDef {
    kind: PickupKind::InvulnerabilityCharm,
    name: "Invulnerability Charm",
    effect: PickupEffect::Buff { kind: BuffKind::Invincibility, duration: 5.0 },
    color: Rgba::rgb(250, 230, 90),
};
