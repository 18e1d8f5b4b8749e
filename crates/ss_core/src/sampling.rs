use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Draw a point uniformly by area inside a disk of the given radius.
///
/// Uses `r = R * sqrt(u)` so samples are not biased towards the center.
/// A non-positive radius always yields the zero vector.
pub fn sample_disk<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }

    let distance = radius * rng.gen::<f32>().sqrt();
    let angle = rng.gen::<f32>() * TAU;
    // Rounding in sin/cos can push the point a hair past the rim.
    (Vec2::from_angle(angle) * distance).clamp_length_max(radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn samples_stay_inside_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for radius in [0.5, 1.0, 100.0, 2500.0] {
            for _ in 0..2000 {
                let offset = sample_disk(&mut rng, radius);
                assert!(offset.length() <= radius, "{:?} outside {}", offset, radius);
            }
        }
    }

    #[test]
    fn zero_radius_is_exactly_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(sample_disk(&mut rng, 0.0), Vec2::ZERO);
        }
    }

    #[test]
    fn samples_are_area_uniform() {
        // Half the area of a disk lies outside radius R / sqrt(2).
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let radius = 10.0;
        let inner = radius / 2.0_f32.sqrt();
        let total = 20_000;
        let outside = (0..total)
            .filter(|_| sample_disk(&mut rng, radius).length() > inner)
            .count();
        let fraction = outside as f32 / total as f32;
        assert!((fraction - 0.5).abs() < 0.03, "outer fraction {}", fraction);
    }

    #[test]
    fn sampling_is_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(sample_disk(&mut a, 100.0), sample_disk(&mut b, 100.0));
        }
    }
}
