use bevy::prelude::*;

pub mod anchor;
pub mod sampling;
pub mod surface;

pub use anchor::{Anchor, WORLD_UP};
pub use sampling::sample_disk;
pub use surface::{surface_aligned_rotation, SurfaceHit, SurfaceProbe};

/// Core plugin providing foundational types for the surface spawner.
pub struct SsCorePlugin;

impl Plugin for SsCorePlugin {
    fn build(&self, _app: &mut App) {
        // Core types are used by other crates; no systems to register here.
    }
}
