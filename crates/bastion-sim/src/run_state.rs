//! Per-run state owned by the engine: player, structure, wave, abilities,
//! economy and upgrades. Replaced wholesale when a run starts or resets.

use std::collections::BTreeMap;

use glam::Vec2;

use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::GameEvent;
use bastion_core::upgrades::Upgrades;

use crate::loadout::ability_spec;
use crate::systems::wave_director::WaveComposition;

/// The player avatar.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    /// Facing angle (radians, 0 = +Z).
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub weapon: WeaponKind,
    pub fire_cooldown: f32,
    pub fire_held: bool,
    /// x = strafe, y = forward, each in [-1, 1].
    pub move_intent: Vec2,
    pub aim_point: Vec2,
    pub inside: bool,
}

impl Default for Player {
    fn default() -> Self {
        let position = Vec2::new(0.0, PLAYER_START_Z);
        Self {
            position,
            facing: 0.0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            weapon: WeaponKind::default(),
            fire_cooldown: 0.0,
            fire_held: false,
            move_intent: Vec2::ZERO,
            aim_point: position + Vec2::new(0.0, 10.0),
            inside: false,
        }
    }
}

impl Player {
    pub fn alive(&self) -> bool {
        self.health > 0.0
    }
}

/// The defended structure at the origin.
#[derive(Debug, Clone)]
pub struct Structure {
    pub health: f32,
    pub max_health: f32,
}

impl Structure {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.max_health
        }
    }

    /// Apply raw damage scaled by the armor factor. Returns damage taken.
    pub fn take_damage(&mut self, raw: f32, armor_factor: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - raw * armor_factor).max(0.0);
        before - self.health
    }

    /// Restore health, capped at max. Returns health restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Change max health, carrying the gained (or lost) headroom into health.
    pub fn set_max_health(&mut self, max_health: f32) {
        let delta = max_health - self.max_health;
        self.max_health = max_health;
        self.health = (self.health + delta).clamp(0.0, max_health);
    }

    pub fn missing(&self) -> f32 {
        (self.max_health - self.health).max(0.0)
    }
}

/// A wave in progress.
#[derive(Debug, Clone)]
pub struct ActiveWave {
    pub index: u32,
    pub composition: WaveComposition,
    /// Per-type quota still to spawn.
    pub remaining: BTreeMap<EnemyKind, u32>,
    pub spawned: BTreeMap<EnemyKind, u32>,
    pub spawn_timer: f32,
    /// Structure took damage during this wave.
    pub damage_taken: bool,
}

impl ActiveWave {
    pub fn new(composition: WaveComposition) -> Self {
        let remaining = composition.counts.clone();
        Self {
            index: composition.wave,
            composition,
            remaining,
            spawned: BTreeMap::new(),
            spawn_timer: FIRST_SPAWN_DELAY,
            damage_taken: false,
        }
    }

    pub fn remaining_to_spawn(&self) -> u32 {
        self.remaining.values().sum()
    }
}

/// A cooldown-gated ability.
#[derive(Debug, Clone)]
pub struct Ability {
    pub kind: AbilityKind,
    pub cooldown: f32,
    pub duration: f32,
    pub cost: u32,
    pub cooldown_remaining: f32,
    pub duration_remaining: f32,
}

impl Ability {
    pub fn new(kind: AbilityKind) -> Self {
        let spec = ability_spec(kind);
        Self {
            kind,
            cooldown: spec.cooldown,
            duration: spec.duration,
            cost: spec.cost,
            cooldown_remaining: 0.0,
            duration_remaining: 0.0,
        }
    }

    pub fn state(&self) -> AbilityState {
        if self.duration_remaining > 0.0 {
            AbilityState::Active
        } else if self.cooldown_remaining > 0.0 {
            AbilityState::Cooling
        } else {
            AbilityState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.duration_remaining > 0.0
    }
}

/// An airstrike waiting to land.
#[derive(Debug, Clone, Copy)]
pub struct PendingAirstrike {
    pub position: Vec2,
    pub delay: f32,
}

/// Turret placement in progress.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub kind: TurretKind,
    pub cursor: Vec2,
}

/// Everything that belongs to one run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub endless: bool,
    pub player: Player,
    pub structure: Structure,
    pub upgrades: Upgrades,
    pub abilities: Vec<Ability>,
    pub currency: u32,
    pub score: u64,
    pub active_wave: Option<ActiveWave>,
    pub upcoming_wave: u32,
    /// Seconds until the next endless wave starts itself.
    pub intermission: Option<f32>,
    pub pending_airstrikes: Vec<PendingAirstrike>,
    pub placement: Option<Placement>,
    /// Structure is currently below the low-health threshold.
    pub low_health: bool,
    pub banner: String,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(false, Upgrades::default())
    }
}

impl RunState {
    pub fn new(endless: bool, upgrades: Upgrades) -> Self {
        let upgrades = upgrades.clamped();
        Self {
            endless,
            player: Player::default(),
            structure: Structure::new(upgrades.structure_max_health()),
            upgrades,
            abilities: AbilityKind::ALL.iter().map(|k| Ability::new(*k)).collect(),
            currency: STARTING_CURRENCY,
            score: 0,
            active_wave: None,
            upcoming_wave: 1,
            intermission: None,
            pending_airstrikes: Vec::new(),
            placement: None,
            low_health: false,
            banner: String::new(),
        }
    }

    pub fn ability(&self, kind: AbilityKind) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.kind == kind)
    }

    pub fn ability_mut(&mut self, kind: AbilityKind) -> Option<&mut Ability> {
        self.abilities.iter_mut().find(|a| a.kind == kind)
    }

    /// Enemy speed multiplier from an active freeze.
    pub fn freeze_factor(&self) -> f32 {
        match self.ability(AbilityKind::Freeze) {
            Some(a) if a.is_active() => FREEZE_SPEED_FACTOR,
            _ => 1.0,
        }
    }

    /// Player damage and fire-rate multiplier from an active rage.
    pub fn rage_multiplier(&self) -> f32 {
        match self.ability(AbilityKind::Rage) {
            Some(a) if a.is_active() => RAGE_MULTIPLIER,
            _ => 1.0,
        }
    }

    /// Spend currency if there is enough of it.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.currency < cost {
            return false;
        }
        self.currency -= cost;
        true
    }

    pub fn set_banner(&mut self, text: impl Into<String>, events: &mut Vec<GameEvent>) {
        let text = text.into();
        if self.banner != text {
            self.banner = text.clone();
            events.push(GameEvent::BannerChanged { text });
        }
    }

    /// Emit `LowHealth` when the structure crosses the threshold either way.
    pub fn check_low_health(&mut self, events: &mut Vec<GameEvent>) {
        let below = self.structure.fraction() < LOW_HEALTH_THRESHOLD;
        if below != self.low_health {
            self.low_health = below;
            events.push(GameEvent::LowHealth {
                crossed_below: below,
            });
        }
    }

    /// Whether `StartWave` is allowed right now.
    pub fn can_start_wave(&self) -> bool {
        self.active_wave.is_none() && (self.endless || self.upcoming_wave <= FINAL_WAVE)
    }

    pub fn start_wave_label(&self) -> String {
        match (&self.active_wave, self.intermission) {
            (Some(w), _) => format!("Wave {} in progress", w.index),
            (None, Some(t)) => format!("Start Wave {} ({}s)", self.upcoming_wave, t.ceil() as u32),
            (None, None) => format!("Start Wave {}", self.upcoming_wave),
        }
    }
}
