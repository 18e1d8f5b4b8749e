//! ECS adapter: drives [`Spawner`]s attached to entities.

use bevy::prelude::*;
use ss_core::{Anchor, SurfaceHit, SurfaceProbe};

use crate::config::{SpawnConfig, SpawnSettings};
use crate::sampler::EntityFactory;
use crate::schedule::{RepeatToken, SpawnTimer};
use crate::spawner::{Spawner, TickOutcome};

/// Spawner attached to an entity. Its `GlobalTransform` is the anchor.
#[derive(Component, Debug)]
#[require(Transform, SpawnTimer)]
pub struct SurfaceSpawner {
    spawner: Spawner<Entity, RepeatToken>,
}

impl SurfaceSpawner {
    pub fn new(settings: SpawnSettings, seed: u64) -> Self {
        Self {
            spawner: Spawner::new(SpawnConfig::new(Anchor::IDENTITY, settings), seed),
        }
    }

    pub fn spawner(&self) -> &Spawner<Entity, RepeatToken> {
        &self.spawner
    }
}

/// What a spawner creates.
#[derive(Component, Debug, Clone)]
pub struct SpawnTarget {
    /// Name given to spawned entities. Empty means nothing is configured.
    pub label: String,
    /// Minimum distance to the spawner's other live entities; closer spots
    /// are rejected.
    pub clearance: f32,
}

impl SpawnTarget {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            clearance: 0.0,
        }
    }

    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance;
        self
    }
}

/// Marks an entity created by the spawner entity it points to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedBy(pub Entity);

/// World geometry used to find ground. Reports no surface by default.
#[derive(Resource)]
pub struct GroundProbe(Box<dyn SurfaceProbe + Send + Sync>);

impl GroundProbe {
    pub fn new(probe: impl SurfaceProbe + Send + Sync + 'static) -> Self {
        Self(Box::new(probe))
    }
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self::new(|_start: Vec3, _end: Vec3| -> Option<SurfaceHit> { None })
    }
}

/// Creates entities through `Commands` for one spawner during one system run.
struct CommandFactory<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    owner: Entity,
    target: Option<&'a SpawnTarget>,
    /// Live entities of this spawner, including ones created this run.
    occupied: Vec<(Entity, Vec3)>,
}

impl<'a, 'w, 's> CommandFactory<'a, 'w, 's> {
    fn new(
        commands: &'a mut Commands<'w, 's>,
        owner: Entity,
        target: Option<&'a SpawnTarget>,
        spawner: &Spawner<Entity, RepeatToken>,
        spawned: &Query<&Transform, With<SpawnedBy>>,
    ) -> Self {
        let occupied = spawner
            .ledger()
            .iter()
            .filter_map(|entity| {
                spawned
                    .get(*entity)
                    .ok()
                    .map(|transform| (*entity, transform.translation))
            })
            .collect();
        Self {
            commands,
            owner,
            target,
            occupied,
        }
    }
}

impl EntityFactory for CommandFactory<'_, '_, '_> {
    type Handle = Entity;

    fn create(&mut self, location: Vec3, rotation: Quat) -> Option<Entity> {
        let target = self.target?;
        if self
            .occupied
            .iter()
            .any(|(_, other)| other.distance(location) < target.clearance)
        {
            return None;
        }

        let entity = self
            .commands
            .spawn((
                Name::new(target.label.clone()),
                Transform::from_translation(location).with_rotation(rotation),
                SpawnedBy(self.owner),
            ))
            .id();
        self.occupied.push((entity, location));
        Some(entity)
    }

    fn is_live(&self, handle: &Entity) -> bool {
        self.occupied.iter().any(|(entity, _)| entity == handle)
    }

    fn has_target(&self) -> bool {
        self.target.is_some_and(|target| !target.label.is_empty())
    }
}

/// Activate newly added spawners.
pub fn activate_spawners(
    mut commands: Commands,
    mut probe: ResMut<GroundProbe>,
    mut spawners: Query<
        (
            Entity,
            &mut SurfaceSpawner,
            &mut SpawnTimer,
            &GlobalTransform,
            Option<&SpawnTarget>,
        ),
        Added<SurfaceSpawner>,
    >,
    spawned: Query<&Transform, With<SpawnedBy>>,
) {
    for (owner, mut surface, mut timer, transform, target) in &mut spawners {
        let surface = &mut *surface;
        surface.spawner.set_anchor(Anchor::from(transform));
        let mut factory =
            CommandFactory::new(&mut commands, owner, target, &surface.spawner, &spawned);
        // Errors are already logged by the spawner, which stays inert.
        let _ = surface.spawner.activate(&mut *probe.0, &mut factory, &mut *timer);
    }
}

/// Advance spawn timers and tick every spawner whose interval came due.
pub fn tick_spawners(
    time: Res<Time>,
    mut commands: Commands,
    mut probe: ResMut<GroundProbe>,
    mut spawners: Query<(
        Entity,
        &mut SurfaceSpawner,
        &mut SpawnTimer,
        &GlobalTransform,
        Option<&SpawnTarget>,
    )>,
    spawned: Query<&Transform, With<SpawnedBy>>,
) {
    for (owner, mut surface, mut timer, transform, target) in &mut spawners {
        let due = ticks_this_frame(timer.advance(time.delta()), surface.spawner.settings());
        if due == 0 {
            continue;
        }

        let surface = &mut *surface;
        surface.spawner.set_anchor(Anchor::from(transform));
        let mut factory =
            CommandFactory::new(&mut commands, owner, target, &surface.spawner, &spawned);
        for _ in 0..due {
            match surface.spawner.tick(&mut *probe.0, &mut factory, &mut *timer) {
                TickOutcome::Failed => debug!("Spawner {}: no free spot this tick", owner),
                TickOutcome::LimitReached => debug!("Spawner {}: limit reached", owner),
                TickOutcome::Spawned(_) | TickOutcome::Idle => {}
            }
        }
    }
}

/// Ticks to run for `due` elapsed intervals.
///
/// More than `max_spawn_count + 1` ticks in one frame can never change the
/// outcome, so a long frame catches up with at most that many.
fn ticks_this_frame(due: u32, settings: &SpawnSettings) -> u32 {
    due.min(settings.max_spawn_count.saturating_add(1))
}

/// Forward despawns of spawned entities to their spawners eagerly.
pub fn forget_despawned(
    mut removed: RemovedComponents<SpawnedBy>,
    mut spawners: Query<&mut SurfaceSpawner>,
) {
    for entity in removed.read() {
        for mut surface in &mut spawners {
            surface.spawner.on_entity_destroyed(&entity);
        }
    }
}
