use crate::types::PrestigeClassId;

/// Damage dealt to nearby enemies when an enemy dies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosiveDeath {
    pub radius: f32,
    /// Fraction of the dying enemy's max health.
    pub damage_fraction: f32,
}

/// Damage jumping from a dying enemy to its nearest neighbors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainBonus {
    pub targets: usize,
    pub radius: f32,
    pub damage: f32,
}

/// Numeric and boolean bonus fields. Multipliers default to 1.0 and stack
/// multiplicatively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassBonuses {
    pub damage_multiplier: f32,
    /// Applies only to elemental abilities.
    pub elemental_multiplier: f32,
    pub all_stats_multiplier: f32,
    pub speed_multiplier: f32,
    /// Replaces the upgrade-derived crit chance when present.
    pub crit_chance: Option<f32>,
    /// Replaces the upgrade-derived life-steal fraction when present.
    pub life_steal: Option<f32>,
    pub heal_on_kill: f32,
    pub explosive_death: Option<ExplosiveDeath>,
    pub summon_chance: f32,
    pub chain: Option<ChainBonus>,
}

impl ClassBonuses {
    pub const NEUTRAL: Self = Self {
        damage_multiplier: 1.0,
        elemental_multiplier: 1.0,
        all_stats_multiplier: 1.0,
        speed_multiplier: 1.0,
        crit_chance: None,
        life_steal: None,
        heal_on_kill: 0.0,
        explosive_death: None,
        summon_chance: 0.0,
        chain: None,
    };
}

impl Default for ClassBonuses {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrestigeClass {
    pub id: PrestigeClassId,
    pub name: &'static str,
    pub flavor: &'static str,
    pub bonuses: ClassBonuses,
}

pub fn class_def(id: PrestigeClassId) -> &'static PrestigeClass {
    match id {
        PrestigeClassId::Pyromancer => &PYROMANCER,
        PrestigeClassId::Necromancer => &NECROMANCER,
        PrestigeClassId::Stormcaller => &STORMCALLER,
        PrestigeClassId::Assassin => &ASSASSIN,
        PrestigeClassId::Paladin => &PALADIN,
    }
}

/// Bonus table for an optional active class.
pub fn active_bonuses(active: Option<PrestigeClassId>) -> ClassBonuses {
    active.map_or(ClassBonuses::NEUTRAL, |id| class_def(id).bonuses)
}

const PYROMANCER: PrestigeClass = PrestigeClass {
    id: PrestigeClassId::Pyromancer,
    name: "Pyromancer",
    flavor: "Every foe is kindling.",
    bonuses: ClassBonuses {
        elemental_multiplier: 1.5,
        explosive_death: Some(ExplosiveDeath { radius: 2.5, damage_fraction: 0.3 }),
        ..ClassBonuses::NEUTRAL
    },
};

const NECROMANCER: PrestigeClass = PrestigeClass {
    id: PrestigeClassId::Necromancer,
    name: "Necromancer",
    flavor: "The fallen rise to serve.",
    bonuses: ClassBonuses {
        life_steal: Some(0.15),
        heal_on_kill: 5.0,
        summon_chance: 0.25,
        ..ClassBonuses::NEUTRAL
    },
};

const STORMCALLER: PrestigeClass = PrestigeClass {
    id: PrestigeClassId::Stormcaller,
    name: "Stormcaller",
    flavor: "Lightning never strikes once.",
    bonuses: ClassBonuses {
        elemental_multiplier: 1.2,
        chain: Some(ChainBonus { targets: 2, radius: 4.0, damage: 20.0 }),
        ..ClassBonuses::NEUTRAL
    },
};

const ASSASSIN: PrestigeClass = PrestigeClass {
    id: PrestigeClassId::Assassin,
    name: "Assassin",
    flavor: "Strike first, strike true.",
    bonuses: ClassBonuses {
        damage_multiplier: 1.25,
        speed_multiplier: 1.2,
        crit_chance: Some(0.35),
        ..ClassBonuses::NEUTRAL
    },
};

const PALADIN: PrestigeClass = PrestigeClass {
    id: PrestigeClassId::Paladin,
    name: "Paladin",
    flavor: "Steadfast in every way.",
    bonuses: ClassBonuses { all_stats_multiplier: 1.2, ..ClassBonuses::NEUTRAL },
};
