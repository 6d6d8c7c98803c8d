//! Weapon, turret and ability stat tables.

use bastion_core::components::{SlowEffect, Turret};
use bastion_core::constants::*;
use bastion_core::enums::{AbilityKind, TurretKind, WeaponKind};

/// Player weapon stats before upgrades.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub damage: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    /// Ground speed of straight projectiles. Unused for arcing weapons.
    pub projectile_speed: f32,
    pub pierce: u32,
    pub splash_radius: f32,
    pub slow: Option<SlowEffect>,
    /// Lobbed shell that lands on the aim point.
    pub arcing: bool,
}

pub fn weapon_spec(kind: WeaponKind) -> WeaponSpec {
    match kind {
        WeaponKind::Rifle => WeaponSpec {
            damage: 12.0,
            fire_interval: 0.15,
            projectile_speed: 60.0,
            pierce: 0,
            splash_radius: 0.0,
            slow: None,
            arcing: false,
        },
        WeaponKind::Railgun => WeaponSpec {
            damage: 45.0,
            fire_interval: 0.9,
            projectile_speed: 120.0,
            pierce: 2,
            splash_radius: 0.0,
            slow: None,
            arcing: false,
        },
        WeaponKind::Launcher => WeaponSpec {
            damage: 40.0,
            fire_interval: 1.1,
            projectile_speed: ARC_SPEED,
            pierce: 0,
            splash_radius: 4.0,
            slow: None,
            arcing: true,
        },
        WeaponKind::Cryo => WeaponSpec {
            damage: 6.0,
            fire_interval: 0.25,
            projectile_speed: 45.0,
            pierce: 0,
            splash_radius: 0.0,
            slow: Some(SlowEffect {
                factor: 0.5,
                duration: 2.0,
            }),
            arcing: false,
        },
    }
}

/// Turret stats and placement cost.
#[derive(Debug, Clone, Copy)]
pub struct TurretSpec {
    pub cost: u32,
    pub damage: f32,
    pub fire_interval: f32,
    pub range: f32,
    pub slow: Option<SlowEffect>,
    pub splash_radius: f32,
}

pub fn turret_spec(kind: TurretKind) -> TurretSpec {
    match kind {
        TurretKind::Basic => TurretSpec {
            cost: 75,
            damage: 10.0,
            fire_interval: 0.5,
            range: 14.0,
            slow: None,
            splash_radius: 0.0,
        },
        TurretKind::Slow => TurretSpec {
            cost: 90,
            damage: 4.0,
            fire_interval: 0.8,
            range: 12.0,
            slow: Some(SlowEffect {
                factor: 0.5,
                duration: 1.5,
            }),
            splash_radius: 0.0,
        },
        TurretKind::Explosive => TurretSpec {
            cost: 140,
            damage: 25.0,
            fire_interval: 1.6,
            range: 16.0,
            slow: None,
            splash_radius: 3.5,
        },
    }
}

/// Fresh turret component, ready to fire.
pub fn build_turret(kind: TurretKind) -> Turret {
    let spec = turret_spec(kind);
    Turret {
        kind,
        damage: spec.damage,
        fire_interval: spec.fire_interval,
        range: spec.range,
        slow: spec.slow,
        splash_radius: spec.splash_radius,
        cooldown: 0.0,
        target: None,
    }
}

/// Ability timing and price.
#[derive(Debug, Clone, Copy)]
pub struct AbilitySpec {
    pub cooldown: f32,
    /// 0.0 for instantaneous abilities.
    pub duration: f32,
    pub cost: u32,
}

pub fn ability_spec(kind: AbilityKind) -> AbilitySpec {
    match kind {
        AbilityKind::Airstrike => AbilitySpec {
            cooldown: AIRSTRIKE_COOLDOWN,
            duration: 0.0,
            cost: AIRSTRIKE_COST,
        },
        AbilityKind::Freeze => AbilitySpec {
            cooldown: FREEZE_COOLDOWN,
            duration: FREEZE_DURATION,
            cost: FREEZE_COST,
        },
        AbilityKind::Rage => AbilitySpec {
            cooldown: RAGE_COOLDOWN,
            duration: RAGE_DURATION,
            cost: RAGE_COST,
        },
        AbilityKind::Repair => AbilitySpec {
            cooldown: REPAIR_COOLDOWN,
            duration: 0.0,
            cost: REPAIR_COST,
        },
    }
}
