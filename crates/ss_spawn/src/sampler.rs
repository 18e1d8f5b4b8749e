//! Placement sampler: one bounded run of probe-then-create attempts.

use bevy::prelude::*;
use rand::Rng;
use ss_core::{sample_disk, surface_aligned_rotation, SurfaceHit, SurfaceProbe, WORLD_UP};

use crate::config::{SpawnConfig, SURFACE_NUDGE};

/// Creates entities on behalf of a spawner and answers whether they still
/// exist.
///
/// The spawner never owns what it creates. Hosts that only notify about
/// destruction (see [`Spawner::on_entity_destroyed`](crate::Spawner::on_entity_destroyed))
/// can keep the default `is_live`.
pub trait EntityFactory {
    type Handle: Clone + PartialEq;

    /// Place a new entity. `None` means placement was rejected.
    fn create(&mut self, location: Vec3, rotation: Quat) -> Option<Self::Handle>;

    fn is_live(&self, _handle: &Self::Handle) -> bool {
        true
    }

    /// Whether there is anything configured to create at all.
    fn has_target(&self) -> bool {
        true
    }
}

/// Result of one placement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnOutcome<H> {
    Spawned(H),
    Failed,
}

impl<H> SpawnOutcome<H> {
    pub fn is_spawned(&self) -> bool {
        matches!(self, Self::Spawned(_))
    }

    pub fn handle(self) -> Option<H> {
        match self {
            Self::Spawned(handle) => Some(handle),
            Self::Failed => None,
        }
    }
}

/// Vertical probe segment above a horizontal offset from the anchor.
pub fn probe_segment(config: &SpawnConfig, offset: Vec2) -> (Vec3, Vec3) {
    let height = config.settings.probe_height;
    let start = config.anchor.translation + offset.extend(height);
    let end = start - WORLD_UP * (2.0 * height);
    (start, end)
}

/// Location and rotation for an entity placed at `hit`.
pub fn spawn_pose(config: &SpawnConfig, hit: &SurfaceHit) -> (Vec3, Quat) {
    let location = hit.point + WORLD_UP * SURFACE_NUDGE;
    let rotation = if config.settings.align_to_surface {
        surface_aligned_rotation(hit.normal, config.anchor.forward(), config.anchor.rotation)
    } else {
        config.anchor.rotation
    };
    (location, rotation)
}

/// Try up to `max_probe_attempts` random spots around the anchor and create
/// an entity at the first one that both hits ground and accepts placement.
///
/// A rejected creation consumes an attempt just like a missed probe.
pub fn try_spawn_once<R, P, F>(
    config: &SpawnConfig,
    rng: &mut R,
    probe: &mut P,
    factory: &mut F,
) -> SpawnOutcome<F::Handle>
where
    R: Rng + ?Sized,
    P: SurfaceProbe + ?Sized,
    F: EntityFactory + ?Sized,
{
    let attempts = config.settings.max_probe_attempts;

    for _ in 0..attempts {
        let offset = sample_disk(rng, config.settings.spawn_radius);
        let (start, end) = probe_segment(config, offset);

        let Some(hit) = probe.probe(start, end) else {
            continue;
        };

        let (location, rotation) = spawn_pose(config, &hit);
        if let Some(handle) = factory.create(location, rotation) {
            return SpawnOutcome::Spawned(handle);
        }
    }

    debug!("No free surface location found after {} attempts", attempts);
    SpawnOutcome::Failed
}
