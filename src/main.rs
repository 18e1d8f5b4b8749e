use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use ss_persistence::{load_presets, PRESETS_DIR};
use ss_spawn::{GroundProbe, SpawnTarget, SpawnedBy, SurfaceSpawner};
use ss_terrain::{HeightfieldProbe, NoiseTerrain};
use std::path::Path;
use std::time::Duration;

const TERRAIN_SEED: u32 = 42;
const RUN_SECONDS: f32 = 6.0;

/// Distance between neighbouring spawners along X.
const SPAWNER_SPACING: f32 = 1500.0;

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            LogPlugin::default(),
            TransformPlugin,
        ))
        .add_plugins((
            ss_core::SsCorePlugin,
            ss_terrain::SsTerrainPlugin,
            ss_spawn::SsSpawnPlugin,
        ))
        .insert_resource(GroundProbe::new(HeightfieldProbe::new(NoiseTerrain::new(
            TERRAIN_SEED,
        ))))
        .add_systems(Startup, setup_spawners)
        .add_systems(Update, (report_spawns, exit_after_run))
        .run();
}

fn setup_spawners(mut commands: Commands) {
    let presets = match load_presets(Path::new(PRESETS_DIR)) {
        Ok(presets) => presets,
        Err(err) => {
            warn!("Could not load presets from {}: {}", PRESETS_DIR, err);
            Vec::new()
        }
    };
    if presets.is_empty() {
        warn!("No spawner presets found in {}", PRESETS_DIR);
    }

    for (index, preset) in presets.into_iter().enumerate() {
        info!("Placing spawner for preset '{}'", preset.name);
        commands.spawn((
            SurfaceSpawner::new(preset.settings, index as u64 + 1),
            SpawnTarget::new(preset.name).with_clearance(25.0),
            Transform::from_xyz(index as f32 * SPAWNER_SPACING, 0.0, 0.0),
        ));
    }
}

fn report_spawns(spawned: Query<(&Name, &Transform, &SpawnedBy), Added<SpawnedBy>>) {
    for (name, transform, by) in &spawned {
        info!("{} spawned at {} by {}", name, transform.translation, by.0);
    }
}

fn exit_after_run(
    time: Res<Time>,
    spawners: Query<(Entity, &SurfaceSpawner)>,
    mut exit: EventWriter<AppExit>,
) {
    if time.elapsed_secs() < RUN_SECONDS {
        return;
    }

    for (entity, spawner) in &spawners {
        let spawner = spawner.spawner();
        info!(
            "Spawner {}: {:?}, tracking {} entities",
            entity,
            spawner.state(),
            spawner.tracked_count()
        );
    }
    exit.send(AppExit::Success);
}
