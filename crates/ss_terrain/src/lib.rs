use bevy::prelude::*;

pub mod heightfield;
pub mod probe;

pub use heightfield::{FlatGround, Heightfield, NoiseTerrain};
pub use probe::HeightfieldProbe;

/// Terrain plugin for the surface spawner.
/// Terrain is queried through probes only; no systems to register.
pub struct SsTerrainPlugin;

impl Plugin for SsTerrainPlugin {
    fn build(&self, _app: &mut App) {}
}
