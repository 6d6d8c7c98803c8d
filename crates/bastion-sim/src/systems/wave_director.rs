//! Wave director: wave composition, spawn pacing and completion.

use std::collections::BTreeMap;

use glam::Vec2;
use log::{debug, info};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::constants::*;
use bastion_core::enums::EnemyKind;
use bastion_core::events::GameEvent;

use bastion_enemy_ai::profiles::{build_enemy, get_profile};

use crate::run_state::{ActiveWave, RunState};
use crate::store::EntityStore;

/// What a wave will spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveComposition {
    pub wave: u32,
    pub boss: bool,
    pub counts: BTreeMap<EnemyKind, u32>,
}

impl WaveComposition {
    pub fn count(&self, kind: EnemyKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total enemies to spawn.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Unlockable types: (kind, unlock wave, per-wave rate, intro minimum,
/// normal cap, endless cap).
const UNLOCKS: [(EnemyKind, u32, f32, u32, u32, u32); 4] = [
    (EnemyKind::Runner, RUNNER_UNLOCK_WAVE, RUNNER_PER_WAVE, 2, 12, 30),
    (EnemyKind::Tank, TANK_UNLOCK_WAVE, TANK_PER_WAVE, 1, 8, 20),
    (EnemyKind::Healer, HEALER_UNLOCK_WAVE, HEALER_PER_WAVE, 1, 4, 10),
    (EnemyKind::Splitter, SPLITTER_UNLOCK_WAVE, SPLITTER_PER_WAVE, 1, 6, 15),
];

const STANDARD_CAP_NORMAL: u32 = 40;
const STANDARD_CAP_ENDLESS: u32 = 120;

pub fn is_boss_wave(wave: u32) -> bool {
    wave > 0 && wave % BOSS_WAVE_INTERVAL == 0
}

/// Volume multiplier for a wave given its position around boss waves.
pub fn rhythm(wave: u32) -> f32 {
    if is_boss_wave(wave) {
        BOSS_WAVE_RHYTHM
    } else if wave > 1 && is_boss_wave(wave - 1) {
        BREATHER_RHYTHM
    } else if is_boss_wave(wave + 1) {
        BUILDUP_RHYTHM
    } else {
        1.0
    }
}

/// Compose a wave. Pure; the same inputs always give the same composition.
pub fn begin_wave(wave: u32, endless: bool) -> WaveComposition {
    let wave = wave.max(1);
    let r = rhythm(wave);
    let mut counts = BTreeMap::new();

    let standard_cap = if endless {
        STANDARD_CAP_ENDLESS
    } else {
        STANDARD_CAP_NORMAL
    };
    let standard = ((STANDARD_BASE + STANDARD_PER_WAVE * wave as f32) * r).round() as u32;
    counts.insert(EnemyKind::Standard, standard.max(1).min(standard_cap));

    for (kind, unlock, rate, intro, normal_cap, endless_cap) in UNLOCKS {
        if wave < unlock {
            continue;
        }
        let mut n = (rate * (wave - unlock + 1) as f32 * r).round() as u32;
        if wave == unlock {
            n = n.max(intro);
        }
        let cap = if endless { endless_cap } else { normal_cap };
        let n = n.min(cap);
        if n > 0 {
            counts.insert(kind, n);
        }
    }

    let boss = is_boss_wave(wave);
    if boss {
        let bosses = if endless {
            1 + (wave - BOSS_WAVE_INTERVAL) / 10
        } else {
            1
        };
        counts.insert(EnemyKind::Boss, bosses);
    }

    WaveComposition { wave, boss, counts }
}

/// Randomized delay before the next spawn.
pub fn spawn_delay(wave: u32, rng: &mut ChaCha8Rng) -> f32 {
    let base = (SPAWN_DELAY_BASE - SPAWN_DELAY_PER_WAVE * wave as f32).max(SPAWN_DELAY_MIN);
    let jitter = rng.gen_range(-SPAWN_DELAY_JITTER..=SPAWN_DELAY_JITTER);
    base * (1.0 + jitter)
}

/// Pick the next type to spawn, weighted by base weight times remaining quota.
pub fn pick_kind(remaining: &BTreeMap<EnemyKind, u32>, rng: &mut ChaCha8Rng) -> Option<EnemyKind> {
    let weighted: Vec<(EnemyKind, f32)> = remaining
        .iter()
        .filter(|(_, n)| **n > 0)
        .map(|(k, n)| (*k, get_profile(*k).spawn_weight * *n as f32))
        .collect();
    let total: f32 = weighted.iter().map(|(_, w)| w).sum();
    if weighted.is_empty() || total <= 0.0 {
        return None;
    }
    let mut roll = rng.gen_range(0.0..total);
    for (kind, w) in &weighted {
        if roll < *w {
            return Some(*kind);
        }
        roll -= w;
    }
    weighted.last().map(|(k, _)| *k)
}

/// Begin the upcoming wave.
pub fn start_wave(run: &mut RunState, events: &mut Vec<GameEvent>) {
    let composition = begin_wave(run.upcoming_wave, run.endless);
    info!(
        "wave {} started: {} enemies{}",
        composition.wave,
        composition.total(),
        if composition.boss { " (boss)" } else { "" }
    );
    events.push(GameEvent::WaveStarted {
        wave: composition.wave,
        boss: composition.boss,
        enemy_count: composition.total(),
    });
    let banner = if composition.boss {
        format!("Wave {} - Boss incoming", composition.wave)
    } else {
        format!("Wave {}", composition.wave)
    };
    run.set_banner(banner, events);
    run.intermission = None;
    run.active_wave = Some(ActiveWave::new(composition));
}

/// Spawn pacing for the active wave.
pub fn run(store: &mut EntityStore, run: &mut RunState, rng: &mut ChaCha8Rng, dt: f32) {
    let Some(wave) = run.active_wave.as_mut() else {
        return;
    };
    if wave.remaining_to_spawn() == 0 {
        return;
    }

    wave.spawn_timer -= dt;
    if wave.spawn_timer > 0.0 {
        return;
    }

    let Some(kind) = pick_kind(&wave.remaining, rng) else {
        return;
    };
    if let Some(n) = wave.remaining.get_mut(&kind) {
        *n -= 1;
    }
    *wave.spawned.entry(kind).or_insert(0) += 1;

    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let at = Vec2::new(angle.sin(), angle.cos()) * SPAWN_RING_RADIUS;
    let entity = store.spawn_enemy(build_enemy(kind, wave.index), at);
    debug!("spawned {:?} {} at {:?}", kind, EntityStore::id_of(entity), at);

    wave.spawn_timer = spawn_delay(wave.index, rng);
}

/// Result of checking the active wave for completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveProgress {
    InProgress,
    Completed,
    /// The final wave of a normal run was cleared.
    Victory,
}

/// Complete the active wave once its quota is spawned and nothing is left alive.
pub fn check_completion(
    store: &EntityStore,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
) -> WaveProgress {
    let done = match &run.active_wave {
        Some(w) => w.remaining_to_spawn() == 0 && store.enemy_count() == 0,
        None => false,
    };
    if !done {
        return WaveProgress::InProgress;
    }
    let Some(wave) = run.active_wave.take() else {
        return WaveProgress::InProgress;
    };

    let bonus = WAVE_BONUS_BASE + wave.index * WAVE_BONUS_PER_WAVE;
    let perfect = !wave.damage_taken;
    let clutch = run.structure.fraction() <= CLUTCH_HEALTH_THRESHOLD;
    run.currency += bonus;
    run.upcoming_wave = wave.index + 1;
    info!(
        "wave {} complete: bonus {} perfect={} clutch={}",
        wave.index, bonus, perfect, clutch
    );
    events.push(GameEvent::WaveCompleted {
        wave: wave.index,
        bonus,
        perfect,
        clutch,
    });

    if !run.endless && wave.index >= FINAL_WAVE {
        return WaveProgress::Victory;
    }
    if run.endless {
        run.intermission = Some(ENDLESS_INTERMISSION);
    }
    run.set_banner(format!("Wave {} cleared", wave.index), events);
    WaveProgress::Completed
}

/// Count down the endless intermission. Returns true when the next wave
/// should start.
pub fn tick_intermission(run: &mut RunState, dt: f32) -> bool {
    match run.intermission.as_mut() {
        Some(t) => {
            *t -= dt;
            *t <= 0.0
        }
        None => false,
    }
}
