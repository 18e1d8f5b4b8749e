use bevy::prelude::*;
use ss_core::{SurfaceHit, SurfaceProbe};

use crate::heightfield::Heightfield;

/// Horizontal drift below which a segment is treated as vertical.
const VERTICAL_EPSILON: f32 = 1e-4;

/// Samples taken along a slanted segment before refinement.
const MARCH_STEPS: u32 = 64;

/// Bisection rounds used to refine a slanted hit.
const REFINE_STEPS: u32 = 20;

/// Probe that reports where a segment first enters a heightfield.
///
/// A segment that starts below the surface is already inside the ground
/// and reports no hit.
pub struct HeightfieldProbe<H> {
    terrain: H,
}

impl<H: Heightfield> HeightfieldProbe<H> {
    pub fn new(terrain: H) -> Self {
        Self { terrain }
    }

    pub fn terrain(&self) -> &H {
        &self.terrain
    }

    /// Signed height of `point` above the surface.
    fn clearance(&self, point: Vec3) -> f32 {
        point.z - self.terrain.height(point.x, point.y)
    }

    fn hit_at(&self, x: f32, y: f32) -> SurfaceHit {
        SurfaceHit::new(
            Vec3::new(x, y, self.terrain.height(x, y)),
            self.terrain.normal(x, y),
        )
    }

    fn probe_vertical(&self, start: Vec3, end: Vec3) -> Option<SurfaceHit> {
        let ground = self.terrain.height(start.x, start.y);
        let (low, high) = if start.z <= end.z {
            (start.z, end.z)
        } else {
            (end.z, start.z)
        };
        if ground < low || ground > high {
            return None;
        }
        Some(self.hit_at(start.x, start.y))
    }

    fn probe_slanted(&self, start: Vec3, end: Vec3) -> Option<SurfaceHit> {
        let mut prev_t = 0.0;
        for step in 1..=MARCH_STEPS {
            let t = step as f32 / MARCH_STEPS as f32;
            if self.clearance(start.lerp(end, t)) > 0.0 {
                prev_t = t;
                continue;
            }

            let (mut above, mut below) = (prev_t, t);
            for _ in 0..REFINE_STEPS {
                let mid = (above + below) * 0.5;
                if self.clearance(start.lerp(end, mid)) > 0.0 {
                    above = mid;
                } else {
                    below = mid;
                }
            }
            let point = start.lerp(end, below);
            return Some(self.hit_at(point.x, point.y));
        }
        None
    }
}

impl<H: Heightfield> SurfaceProbe for HeightfieldProbe<H> {
    fn probe(&mut self, start: Vec3, end: Vec3) -> Option<SurfaceHit> {
        if self.clearance(start) < 0.0 {
            return None;
        }
        if start.truncate().distance(end.truncate()) <= VERTICAL_EPSILON {
            self.probe_vertical(start, end)
        } else {
            self.probe_slanted(start, end)
        }
    }
}
