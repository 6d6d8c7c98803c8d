//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline grunt, present in every wave.
    Standard,
    /// Fast and fragile.
    Runner,
    /// Slow, heavily armored.
    Tank,
    /// Restores health to nearby enemies.
    Healer,
    /// Breaks into two smaller splitters when killed.
    Splitter,
    /// One per boss wave (more in endless mode). Speeds up as it loses health.
    Boss,
}

impl EnemyKind {
    /// All kinds in composition order.
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Standard,
        EnemyKind::Runner,
        EnemyKind::Tank,
        EnemyKind::Healer,
        EnemyKind::Splitter,
        EnemyKind::Boss,
    ];
}

/// Player weapon selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Rapid single-target fire.
    #[default]
    Rifle,
    /// Slow, heavy, pierces through two extra enemies.
    Railgun,
    /// Lobbed explosive shell.
    Launcher,
    /// Low damage, slows what it hits.
    Cryo,
}

impl WeaponKind {
    /// Resolve a weapon from a number key or a name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "1" | "rifle" => Some(Self::Rifle),
            "2" | "railgun" => Some(Self::Railgun),
            "3" | "launcher" => Some(Self::Launcher),
            "4" | "cryo" => Some(Self::Cryo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rifle => "rifle",
            Self::Railgun => "railgun",
            Self::Launcher => "launcher",
            Self::Cryo => "cryo",
        }
    }
}

/// Placeable turret type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurretKind {
    Basic,
    Slow,
    Explosive,
}

impl TurretKind {
    /// Resolve a turret from a hotkey or a name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "t" | "basic" => Some(Self::Basic),
            "y" | "slow" => Some(Self::Slow),
            "u" | "explosive" => Some(Self::Explosive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Slow => "slow",
            Self::Explosive => "explosive",
        }
    }
}

/// Cooldown-gated player ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    Airstrike,
    Freeze,
    Rage,
    Repair,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 4] = [
        AbilityKind::Airstrike,
        AbilityKind::Freeze,
        AbilityKind::Rage,
        AbilityKind::Repair,
    ];

    /// Resolve an ability from a hotkey or a name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "q" | "airstrike" => Some(Self::Airstrike),
            "e" | "freeze" => Some(Self::Freeze),
            "r" | "rage" => Some(Self::Rage),
            "f" | "repair" => Some(Self::Repair),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Airstrike => "airstrike",
            Self::Freeze => "freeze",
            Self::Rage => "rage",
            Self::Repair => "repair",
        }
    }
}

/// Ability lifecycle state, derived from its timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityState {
    /// Ready to use.
    #[default]
    Idle,
    /// Effect finished (or instantaneous), waiting for the cooldown.
    Cooling,
    /// Sustained effect in progress.
    Active,
}

/// Purchasable upgrade category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeCategory {
    WeaponDamage,
    FireRate,
    StructureArmor,
    MaxHealth,
    StructureTier,
}

impl UpgradeCategory {
    pub const ALL: [UpgradeCategory; 5] = [
        UpgradeCategory::WeaponDamage,
        UpgradeCategory::FireRate,
        UpgradeCategory::StructureArmor,
        UpgradeCategory::MaxHealth,
        UpgradeCategory::StructureTier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeaponDamage => "weapon_damage",
            Self::FireRate => "fire_rate",
            Self::StructureArmor => "structure_armor",
            Self::MaxHealth => "max_health",
            Self::StructureTier => "structure_tier",
        }
    }
}

/// Camera mode. Cycled in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    ThirdPersonFollow,
    TopDown,
    FirstPerson,
}

impl CameraMode {
    /// Next mode in the fixed cycle.
    pub fn next(self) -> Self {
        match self {
            Self::ThirdPersonFollow => Self::TopDown,
            Self::TopDown => Self::FirstPerson,
            Self::FirstPerson => Self::ThirdPersonFollow,
        }
    }
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOrigin {
    Player,
    Turret,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    /// A run is in progress (between waves or during one).
    Active,
    Paused,
    GameOver,
    Victory,
    /// An internal fault halted the simulation; waiting for a reset.
    Faulted,
}

/// Result of validating a turret placement point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementFeedback {
    Valid,
    /// Inside the structure's exclusion radius.
    TooClose,
    /// Beyond the buildable annulus.
    TooFar,
    /// Overlaps an existing turret.
    Occupied,
    InsufficientFunds,
    LimitReached,
}

impl PlacementFeedback {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::TooClose => "too close to the structure",
            Self::TooFar => "too far from the structure",
            Self::Occupied => "space occupied",
            Self::InsufficientFunds => "not enough currency",
            Self::LimitReached => "turret limit reached",
        }
    }
}

/// Achievement identifiers. Persisted by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementId {
    FirstBlood,
    Centurion,
    Exterminator,
    BossSlayer,
    Survivor,
    Veteran,
    Tycoon,
    Architect,
    Tactician,
    Clutch,
    Flawless,
    Endless,
}

impl AchievementId {
    pub const ALL: [AchievementId; 12] = [
        AchievementId::FirstBlood,
        AchievementId::Centurion,
        AchievementId::Exterminator,
        AchievementId::BossSlayer,
        AchievementId::Survivor,
        AchievementId::Veteran,
        AchievementId::Tycoon,
        AchievementId::Architect,
        AchievementId::Tactician,
        AchievementId::Clutch,
        AchievementId::Flawless,
        AchievementId::Endless,
    ];
}
