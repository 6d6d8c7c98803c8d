//! Entity store: exclusive owner of every enemy, projectile and turret.
//!
//! Wraps a `hecs::World`. Systems never despawn while iterating; they take a
//! handle snapshot, collect removals, and apply them after the pass.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::constants::{ENEMY_HEIGHT_PER_SCALE, SPLIT_OFFSET};
use bastion_core::enums::ProjectileOrigin;
use bastion_core::error::SimError;

use bastion_enemy_ai::profiles::{can_split, split_child};

/// What `remove_enemy` took out of the store.
#[derive(Debug, Clone)]
pub struct RemovedEnemy {
    pub id: EntityId,
    pub enemy: Enemy,
    pub position: Vec2,
    /// Split children spawned in the parent's place.
    pub children: Vec<EntityId>,
}

/// Owns all simulated entities.
#[derive(Default)]
pub struct EntityStore {
    world: World,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for systems that edit components in place.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Stable id for a handle.
    pub fn id_of(entity: Entity) -> EntityId {
        EntityId(entity.to_bits().get())
    }

    /// Resolve an id back to a live handle. Stale ids resolve to `None`.
    pub fn resolve(&self, id: EntityId) -> Option<Entity> {
        Entity::from_bits(id.0).filter(|e| self.world.contains(*e))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    // --- Spawning ---

    pub fn spawn_enemy(&mut self, enemy: Enemy, ground: Vec2) -> Entity {
        let height = enemy.scale * ENEMY_HEIGHT_PER_SCALE;
        self.world
            .spawn((Position::new(ground, height), Velocity::default(), enemy))
    }

    pub fn spawn_projectile(
        &mut self,
        projectile: Projectile,
        position: Position,
        velocity: Vec2,
    ) -> Entity {
        match projectile.origin {
            ProjectileOrigin::Player => {
                self.world
                    .spawn((position, Velocity(velocity), projectile, PlayerShot))
            }
            ProjectileOrigin::Turret => {
                self.world
                    .spawn((position, Velocity(velocity), projectile, TurretShot))
            }
        }
    }

    pub fn spawn_turret(&mut self, turret: Turret, ground: Vec2) -> Entity {
        self.world.spawn((Position::new(ground, 0.0), turret))
    }

    // --- Removal ---

    /// Remove an enemy. A splitter that may still split spawns two children
    /// near its position before it is despawned. Stale handles are a no-op.
    pub fn remove_enemy(&mut self, entity: Entity, rng: &mut ChaCha8Rng) -> Option<RemovedEnemy> {
        let (enemy, position) = {
            let enemy = self.world.get::<&Enemy>(entity).ok()?;
            let pos = self.world.get::<&Position>(entity).ok()?;
            ((*enemy).clone(), pos.ground)
        };

        let mut children = Vec::new();
        if can_split(&enemy) {
            for _ in 0..2 {
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                let dist = rng.gen_range(0.0..=SPLIT_OFFSET);
                let at = position + Vec2::new(angle.sin(), angle.cos()) * dist;
                let child = self.spawn_enemy(split_child(&enemy), at);
                children.push(Self::id_of(child));
            }
        }

        let _ = self.world.despawn(entity);
        Some(RemovedEnemy {
            id: Self::id_of(entity),
            enemy,
            position,
            children,
        })
    }

    /// Remove a projectile. Returns false for stale handles.
    pub fn remove_projectile(&mut self, entity: Entity) -> bool {
        if self.world.get::<&Projectile>(entity).is_err() {
            return false;
        }
        self.world.despawn(entity).is_ok()
    }

    /// Despawn everything.
    pub fn clear(&mut self) {
        self.world.clear();
    }

    // --- Snapshots and counts ---

    /// Handles of all enemies, including ones marked dead this pass.
    pub fn enemy_handles(&self) -> Vec<Entity> {
        self.world
            .query::<&Enemy>()
            .iter()
            .map(|(e, _)| e)
            .collect()
    }

    /// Handles, positions and scales of enemies not marked dead.
    pub fn live_enemies(&self) -> Vec<(Entity, Vec2, f32)> {
        self.world
            .query::<(&Enemy, &Position)>()
            .iter()
            .filter(|(_, (enemy, _))| !enemy.dead)
            .map(|(e, (enemy, pos))| (e, pos.ground, enemy.scale))
            .collect()
    }

    pub fn projectile_handles(&self, origin: ProjectileOrigin) -> Vec<Entity> {
        match origin {
            ProjectileOrigin::Player => self
                .world
                .query::<(&Projectile, &PlayerShot)>()
                .iter()
                .map(|(e, _)| e)
                .collect(),
            ProjectileOrigin::Turret => self
                .world
                .query::<(&Projectile, &TurretShot)>()
                .iter()
                .map(|(e, _)| e)
                .collect(),
        }
    }

    pub fn turret_handles(&self) -> Vec<Entity> {
        self.world
            .query::<&Turret>()
            .iter()
            .map(|(e, _)| e)
            .collect()
    }

    pub fn turret_positions(&self) -> Vec<Vec2> {
        self.world
            .query::<(&Turret, &Position)>()
            .iter()
            .map(|(_, (_, pos))| pos.ground)
            .collect()
    }

    pub fn is_live_enemy(&self, entity: Entity) -> bool {
        self.world
            .get::<&Enemy>(entity)
            .map(|e| !e.dead)
            .unwrap_or(false)
    }

    pub fn enemy_count(&self) -> usize {
        self.world
            .query::<&Enemy>()
            .iter()
            .filter(|(_, e)| !e.dead)
            .count()
    }

    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    pub fn turret_count(&self) -> usize {
        self.world.query::<&Turret>().iter().count()
    }

    pub fn entity_count(&self) -> usize {
        self.world.len() as usize
    }

    /// Check component invariants on every stored entity.
    pub fn validate(&self) -> Result<(), SimError> {
        for (entity, (enemy, pos)) in self.world.query::<(&Enemy, &Position)>().iter() {
            if !pos.ground.is_finite() || !pos.height.is_finite() {
                return Err(SimError::NonFinite {
                    what: "position",
                    entity: Self::id_of(entity).to_string(),
                });
            }
            if !enemy.health.is_finite() {
                return Err(SimError::NonFinite {
                    what: "health",
                    entity: Self::id_of(entity).to_string(),
                });
            }
            if enemy.health > enemy.max_health + 1e-3 {
                return Err(SimError::HealthAboveMax {
                    entity: Self::id_of(entity).to_string(),
                    health: enemy.health,
                    max: enemy.max_health,
                });
            }
        }
        for (entity, (_proj, pos)) in self.world.query::<(&Projectile, &Position)>().iter() {
            if !pos.ground.is_finite() || !pos.height.is_finite() {
                return Err(SimError::NonFinite {
                    what: "projectile position",
                    entity: Self::id_of(entity).to_string(),
                });
            }
        }
        Ok(())
    }
}
