use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod config;
pub mod ecs;
pub mod ledger;
pub mod sampler;
pub mod schedule;
pub mod spawner;

pub use config::{
    ConfigError, SpawnConfig, SpawnSettings, DEFAULT_MAX_PROBE_ATTEMPTS, MIN_REPEAT_INTERVAL,
    SURFACE_NUDGE,
};
pub use ecs::{GroundProbe, SpawnTarget, SpawnedBy, SurfaceSpawner};
pub use ledger::SpawnLedger;
pub use sampler::{try_spawn_once, EntityFactory, SpawnOutcome};
pub use schedule::{RepeatToken, SpawnScheduler, SpawnTimer};
pub use spawner::{Activation, Spawner, SpawnerError, SpawnerState, TickOutcome};

/// Entity spawn plugin.
/// Places entities on ground found by downward probes around each
/// [`SurfaceSpawner`] and keeps them under their spawner's limit.
pub struct SsSpawnPlugin;

impl Plugin for SsSpawnPlugin {
    fn build(&self, app: &mut App) {
        // Anchors come from GlobalTransform, so run once it is up to date.
        app.init_resource::<GroundProbe>().add_systems(
            PostUpdate,
            (
                ecs::activate_spawners,
                ecs::forget_despawned,
                ecs::tick_spawners,
            )
                .chain()
                .after(TransformSystem::TransformPropagate),
        );
    }
}
