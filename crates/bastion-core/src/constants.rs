//! Simulation constants and tuning parameters.
//!
//! Distances are in world units (roughly meters), times in seconds.

/// Host loop tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the host tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Upper bound on a single frame's delta time.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Seconds between `PerformanceSample` events.
pub const PERFORMANCE_SAMPLE_INTERVAL: f32 = 1.0;

// --- Arena ---

/// Radius of the defended structure's footprint.
pub const STRUCTURE_RADIUS: f32 = 4.0;

/// Player counts as inside the structure within this radius.
pub const STRUCTURE_INTERIOR_RADIUS: f32 = 3.0;

/// Radius of the spawn ring around the structure.
pub const SPAWN_RING_RADIUS: f32 = 60.0;

/// The player cannot walk further than this from the structure.
pub const ARENA_RADIUS: f32 = 50.0;

// --- Structure ---

pub const STRUCTURE_BASE_HEALTH: f32 = 500.0;

/// Structure health fraction below which `LowHealth` fires.
pub const LOW_HEALTH_THRESHOLD: f32 = 0.25;

/// A wave completed at or below this structure health fraction is a clutch win.
pub const CLUTCH_HEALTH_THRESHOLD: f32 = 0.15;

/// Repair cost per missing health point (rounded up).
pub const REPAIR_COST_PER_HP: f32 = 0.5;

/// Cost of the next structure tier is this times the next tier number.
pub const STRUCTURE_TIER_COST: u32 = 300;

/// Max health bonus per structure tier.
pub const STRUCTURE_TIER_HEALTH_BONUS: f32 = 0.5;

/// Armor bonus (damage reduction) per structure tier.
pub const STRUCTURE_TIER_ARMOR_BONUS: f32 = 0.05;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 12.0;
/// Muzzle height above the ground.
pub const PLAYER_MUZZLE_HEIGHT: f32 = 1.2;
/// Eye height in first-person mode.
pub const PLAYER_EYE_HEIGHT: f32 = 1.7;
/// Enemies within this distance (plus half their scale) can strike the player.
pub const PLAYER_CONTACT_RADIUS: f32 = 1.2;
/// Fraction of an enemy's contact damage applied to the player.
pub const PLAYER_DAMAGE_RATIO: f32 = 0.5;
/// Player spawn point, just outside the structure.
pub const PLAYER_START_Z: f32 = 6.0;

// --- Economy ---

pub const STARTING_CURRENCY: u32 = 150;
/// Score gained per point of enemy value on kill.
pub const SCORE_PER_VALUE: u32 = 10;
/// Wave completion bonus: `WAVE_BONUS_BASE + wave * WAVE_BONUS_PER_WAVE`.
pub const WAVE_BONUS_BASE: u32 = 30;
pub const WAVE_BONUS_PER_WAVE: u32 = 15;

// --- Waves ---

/// Normal mode ends in victory after this wave.
pub const FINAL_WAVE: u32 = 20;
/// Every multiple of this (from the first) is a boss wave.
pub const BOSS_WAVE_INTERVAL: u32 = 5;
/// Seconds between waves in endless mode before the next one starts itself.
pub const ENDLESS_INTERMISSION: f32 = 8.0;

pub const STANDARD_BASE: f32 = 4.0;
pub const STANDARD_PER_WAVE: f32 = 2.0;

pub const RUNNER_UNLOCK_WAVE: u32 = 3;
pub const TANK_UNLOCK_WAVE: u32 = 5;
pub const HEALER_UNLOCK_WAVE: u32 = 7;
pub const SPLITTER_UNLOCK_WAVE: u32 = 9;

pub const RUNNER_PER_WAVE: f32 = 0.8;
pub const TANK_PER_WAVE: f32 = 0.5;
pub const HEALER_PER_WAVE: f32 = 0.35;
pub const SPLITTER_PER_WAVE: f32 = 0.5;

/// Trash volume multiplier on boss waves.
pub const BOSS_WAVE_RHYTHM: f32 = 0.6;
/// Volume multiplier on the wave right after a boss wave.
pub const BREATHER_RHYTHM: f32 = 0.7;
/// Volume multiplier on the wave right before a boss wave.
pub const BUILDUP_RHYTHM: f32 = 1.2;

/// First spawn of a wave happens after this delay.
pub const FIRST_SPAWN_DELAY: f32 = 0.5;
pub const SPAWN_DELAY_BASE: f32 = 1.6;
pub const SPAWN_DELAY_PER_WAVE: f32 = 0.05;
pub const SPAWN_DELAY_MIN: f32 = 0.35;
/// Spawn delay is randomized by +/- this fraction.
pub const SPAWN_DELAY_JITTER: f32 = 0.2;

/// Enemy health multiplier growth per wave after the first.
pub const ENEMY_HEALTH_PER_WAVE: f32 = 0.12;

// --- Enemies ---

/// Seconds between an engaged enemy's attacks.
pub const ENEMY_ATTACK_INTERVAL: f32 = 1.0;
/// Body height per unit of scale.
pub const ENEMY_HEIGHT_PER_SCALE: f32 = 0.5;
/// Healer aura radius and heal rate (health per second).
pub const HEALER_RADIUS: f32 = 6.0;
pub const HEALER_RATE: f32 = 6.0;
/// Boss speed gain per boss phase.
pub const BOSS_PHASE_SPEED_BONUS: f32 = 0.25;
/// Number of phases a boss passes through (health thirds).
pub const BOSS_PHASES: u32 = 2;

/// Splitters at or below this scale never split.
pub const SPLIT_MIN_SCALE: f32 = 0.6;
/// Each child is worth this fraction of the parent (rounded down).
pub const SPLIT_CHILD_VALUE_RATIO: f32 = 0.35;
/// Each child's max health as a fraction of the parent's max health.
pub const SPLIT_CHILD_HEALTH_RATIO: f32 = 0.4;
/// Children appear within this distance of the parent.
pub const SPLIT_OFFSET: f32 = 1.0;

// --- Projectiles & combat ---

/// Base collision radius, scaled by enemy scale.
pub const CONTACT_RADIUS: f32 = 0.8;
/// Projectiles are removed after this many seconds regardless of pierce.
pub const PROJECTILE_MAX_LIFETIME: f32 = 3.0;
/// Indirect splash strength relative to the direct hit.
pub const SPLASH_INDIRECT_RATIO: f32 = 0.5;
/// Peak height of an arcing shell.
pub const ARC_PEAK_HEIGHT: f32 = 6.0;
/// Arcing shells collide directly only below this height.
pub const ARC_HIT_HEIGHT: f32 = 1.5;
/// Arcing shells travel at this horizontal speed.
pub const ARC_SPEED: f32 = 25.0;
/// Minimum flight time of an arcing shell.
pub const ARC_MIN_DURATION: f32 = 0.3;
/// Farthest an arcing shell can be lobbed. Flight must end inside the
/// projectile lifetime so the shell always detonates.
pub const ARC_MAX_RANGE: f32 = ARC_SPEED * (PROJECTILE_MAX_LIFETIME - 0.1);

/// Damage multiplier gain per weapon-damage level.
pub const DAMAGE_PER_LEVEL: f32 = 0.15;
/// Fire-rate multiplier gain per fire-rate level.
pub const FIRE_RATE_PER_LEVEL: f32 = 0.10;
/// Structure damage reduction per armor level.
pub const ARMOR_PER_LEVEL: f32 = 0.08;
/// Structure max-health gain per max-health level.
pub const MAX_HEALTH_PER_LEVEL: f32 = 0.2;
/// Armor can never reduce damage by more than this.
pub const ARMOR_REDUCTION_CAP: f32 = 0.75;

// --- Turrets ---

pub const TURRET_PROJECTILE_SPEED: f32 = 40.0;
/// Turret muzzle height.
pub const TURRET_MUZZLE_HEIGHT: f32 = 1.0;
/// Turrets cannot be placed closer than this to the structure center.
pub const PLACEMENT_MIN_RADIUS: f32 = 6.0;
/// Turrets cannot be placed further than this from the structure center.
pub const PLACEMENT_MAX_RADIUS: f32 = 30.0;
/// Minimum spacing between turrets.
pub const TURRET_SPACING: f32 = 2.0;
pub const MAX_TURRETS: usize = 12;

// --- Abilities ---

pub const AIRSTRIKE_COOLDOWN: f32 = 45.0;
pub const AIRSTRIKE_COST: u32 = 50;
pub const AIRSTRIKE_DAMAGE: f32 = 150.0;
pub const AIRSTRIKE_RADIUS: f32 = 12.0;
/// Delay between calling the strike and its impact.
pub const AIRSTRIKE_DELAY: f32 = 0.75;

pub const FREEZE_COOLDOWN: f32 = 30.0;
pub const FREEZE_COST: u32 = 40;
pub const FREEZE_DURATION: f32 = 5.0;
/// Enemy speed multiplier while frozen.
pub const FREEZE_SPEED_FACTOR: f32 = 0.05;

pub const RAGE_COOLDOWN: f32 = 40.0;
pub const RAGE_COST: u32 = 40;
pub const RAGE_DURATION: f32 = 8.0;
/// Player damage and fire-rate multiplier while raging.
pub const RAGE_MULTIPLIER: f32 = 1.5;

pub const REPAIR_COOLDOWN: f32 = 35.0;
pub const REPAIR_COST: u32 = 60;
/// Fraction of structure max health restored.
pub const REPAIR_FRACTION: f32 = 0.25;

// --- Camera ---

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 500.0;
/// Third-person follow distance behind and height above the player.
pub const FOLLOW_DISTANCE: f32 = 8.0;
pub const FOLLOW_HEIGHT: f32 = 5.0;
/// Top-down camera height.
pub const TOP_DOWN_HEIGHT: f32 = 30.0;
/// Exponential smoothing rate of the camera eye (per second).
pub const CAMERA_SMOOTHING: f32 = 8.0;
/// First-person pitch clamp (radians).
pub const FIRST_PERSON_PITCH_LIMIT: f32 = 1.45;
/// Aim distance used when the first-person view ray misses the ground.
pub const FIRST_PERSON_AIM_DISTANCE: f32 = 50.0;
/// Radians of yaw/pitch per pointer-delta unit at sensitivity 1.0.
pub const POINTER_RADIANS_PER_UNIT: f32 = 0.0025;

// --- Progression thresholds ---

pub const CENTURION_KILLS: u64 = 100;
pub const EXTERMINATOR_KILLS: u64 = 1000;
pub const SURVIVOR_WAVE: u32 = 10;
pub const VETERAN_WAVE: u32 = 20;
pub const TYCOON_CURRENCY: u32 = 1000;
pub const ARCHITECT_TURRETS: u64 = 10;
pub const TACTICIAN_ABILITIES: u64 = 25;
pub const FLAWLESS_PERFECT_WAVES: u64 = 5;
pub const ENDLESS_WAVE: u32 = 15;

/// Current persisted profile schema version.
pub const PROFILE_SCHEMA_VERSION: u32 = 1;
