use bevy::prelude::*;
use noise::{NoiseFn, Perlin};

/// Step used for finite-difference normals.
const NORMAL_EPSILON: f32 = 0.5;

/// Terrain described by a single height value per horizontal position.
///
/// Heights are measured along world `+Z`.
pub trait Heightfield: Send + Sync {
    fn height(&self, x: f32, y: f32) -> f32;

    /// Surface normal at `(x, y)`, from central differences by default.
    fn normal(&self, x: f32, y: f32) -> Vec3 {
        let dx = self.height(x + NORMAL_EPSILON, y) - self.height(x - NORMAL_EPSILON, y);
        let dy = self.height(x, y + NORMAL_EPSILON) - self.height(x, y - NORMAL_EPSILON);
        Vec3::new(-dx, -dy, 2.0 * NORMAL_EPSILON).normalize()
    }
}

/// Infinite horizontal plane.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatGround {
    pub height: f32,
}

impl FlatGround {
    pub const fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Heightfield for FlatGround {
    fn height(&self, _x: f32, _y: f32) -> f32 {
        self.height
    }

    fn normal(&self, _x: f32, _y: f32) -> Vec3 {
        Vec3::Z
    }
}

/// Rolling terrain from seeded Perlin fBm.
///
/// Output range: approximately `base_height ± amplitude`.
pub struct NoiseTerrain {
    noise: Perlin,
    base_height: f64,
    amplitude: f64,
    scale: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
}

impl NoiseTerrain {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            base_height: 0.0,
            amplitude: 120.0,
            scale: 800.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    pub fn with_params(
        seed: u32,
        base_height: f64,
        amplitude: f64,
        scale: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> Self {
        Self {
            noise: Perlin::new(seed),
            base_height,
            amplitude,
            scale,
            octaves,
            persistence,
            lacunarity,
        }
    }

    /// Fractal Brownian motion normalized to [-1, 1].
    fn fbm(&self, x: f64, y: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            let nx = x * frequency / self.scale;
            let ny = y * frequency / self.scale;
            value += self.noise.get([nx, ny]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        value / max_amplitude
    }
}

impl Heightfield for NoiseTerrain {
    fn height(&self, x: f32, y: f32) -> f32 {
        (self.base_height + self.fbm(x as f64, y as f64) * self.amplitude) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_ground_normal_is_up() {
        let ground = FlatGround::new(12.0);
        assert_eq!(ground.height(-40.0, 3.0), 12.0);
        assert_eq!(ground.normal(5.0, 5.0), Vec3::Z);
    }

    #[test]
    fn noise_terrain_stays_in_range() {
        let terrain = NoiseTerrain::new(42);
        for i in 0..200 {
            let h = terrain.height(i as f32 * 37.0, i as f32 * -11.0);
            assert!(h.abs() <= 180.0, "height {} out of range", h);
        }
    }

    #[test]
    fn noise_terrain_is_deterministic() {
        let a = NoiseTerrain::new(7);
        let b = NoiseTerrain::new(7);
        assert_eq!(a.height(100.0, 200.0), b.height(100.0, 200.0));
    }

    #[test]
    fn default_normal_points_up_hill_side() {
        struct Ramp;
        impl Heightfield for Ramp {
            fn height(&self, x: f32, _y: f32) -> f32 {
                x
            }
        }
        let normal = Ramp.normal(0.0, 0.0);
        // Slope of 1 along +X tilts the normal back towards -X.
        assert!((normal - Vec3::new(-1.0, 0.0, 1.0).normalize()).length() < 1e-4);
    }
}
