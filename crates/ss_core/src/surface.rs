use bevy::prelude::*;

/// First blocking surface reported by a probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    /// Impact point in world space.
    pub point: Vec3,
    /// Surface normal at the impact point. Not necessarily normalized.
    pub normal: Vec3,
}

impl SurfaceHit {
    pub const fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }
}

/// Segment query against the environment.
///
/// Implementations report the first blocking surface met when travelling
/// from `start` to `end`, or `None` if the segment is clear.
pub trait SurfaceProbe {
    fn probe(&mut self, start: Vec3, end: Vec3) -> Option<SurfaceHit>;
}

impl<F> SurfaceProbe for F
where
    F: FnMut(Vec3, Vec3) -> Option<SurfaceHit>,
{
    fn probe(&mut self, start: Vec3, end: Vec3) -> Option<SurfaceHit> {
        self(start, end)
    }
}

/// Build an orientation whose up (`+Z`) axis is `normal` and whose forward
/// (`+X`) axis is `forward` projected onto the surface plane.
///
/// A degenerate normal returns `fallback` unchanged. When `forward` is
/// parallel to the normal an arbitrary perpendicular forward is chosen.
pub fn surface_aligned_rotation(normal: Vec3, forward: Vec3, fallback: Quat) -> Quat {
    let up = normal.normalize_or_zero();
    if up == Vec3::ZERO {
        return fallback;
    }

    // Gram-Schmidt: strip the normal component from forward.
    let projected = forward - up * forward.dot(up);
    let x_axis = projected
        .try_normalize()
        .unwrap_or_else(|| up.any_orthonormal_vector());
    let y_axis = up.cross(x_axis);

    Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, up)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn flat_ground_keeps_identity() {
        let rotation = surface_aligned_rotation(Vec3::Z, Vec3::X, Quat::IDENTITY);
        assert_vec_close(rotation * Vec3::X, Vec3::X);
        assert_vec_close(rotation * Vec3::Z, Vec3::Z);
    }

    #[test]
    fn up_axis_matches_normal() {
        let normal = Vec3::new(0.3, -0.2, 1.0);
        let rotation = surface_aligned_rotation(normal, Vec3::X, Quat::IDENTITY);
        assert_vec_close(rotation * Vec3::Z, normal.normalize());

        let forward = rotation * Vec3::X;
        assert!(forward.dot(normal.normalize()).abs() < 1e-4);
        // Forward keeps the heading it had before projection.
        assert!(forward.dot(Vec3::X) > 0.9);
    }

    #[test]
    fn unnormalized_normal_is_normalized() {
        let rotation = surface_aligned_rotation(Vec3::new(0.0, 0.0, 5.0), Vec3::Y, Quat::IDENTITY);
        assert_vec_close(rotation * Vec3::Z, Vec3::Z);
        assert_vec_close(rotation * Vec3::X, Vec3::Y);
    }

    #[test]
    fn zero_normal_falls_back() {
        let fallback = Quat::from_rotation_z(1.0);
        assert_eq!(surface_aligned_rotation(Vec3::ZERO, Vec3::X, fallback), fallback);
    }

    #[test]
    fn forward_parallel_to_normal_still_orthonormal() {
        let rotation = surface_aligned_rotation(Vec3::X, Vec3::X, Quat::IDENTITY);
        assert_vec_close(rotation * Vec3::Z, Vec3::X);
        let forward = rotation * Vec3::X;
        assert!(forward.dot(Vec3::X).abs() < 1e-4);
        assert!((forward.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn closures_are_probes() {
        let mut calls = 0;
        let mut probe = |start: Vec3, _end: Vec3| {
            calls += 1;
            Some(SurfaceHit::new(start.with_z(0.0), Vec3::Z))
        };
        let hit = probe.probe(Vec3::new(1.0, 2.0, 10.0), Vec3::new(1.0, 2.0, -10.0));
        assert_eq!(hit.map(|h| h.point), Some(Vec3::new(1.0, 2.0, 0.0)));
        assert_eq!(calls, 1);
    }
}
