use bevy::prelude::*;

/// Vertical axis of the world frame. Probes travel along it and spawned
/// entities are lifted along it.
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Reference position and orientation that spawn offsets are measured from.
///
/// The forward axis is the local `+X` axis, so an identity anchor faces
/// world `+X` with `+Z` up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Anchor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Anchor {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub const fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::IDENTITY)
    }

    /// Forward direction in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

impl From<&GlobalTransform> for Anchor {
    fn from(transform: &GlobalTransform) -> Self {
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        Self::new(translation, rotation)
    }
}

impl From<Transform> for Anchor {
    fn from(transform: Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }
}
