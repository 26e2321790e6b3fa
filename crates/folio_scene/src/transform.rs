use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Transform component
///
/// Rotation is kept as XYZ Euler angles in radians rather than a quaternion:
/// gestures add to `rotation.x`/`rotation.y` directly and must stay additive
/// and unbounded, which a quaternion round-trip would not preserve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles, XYZ order, radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    /// Rotation as a quaternion (XYZ order).
    #[inline]
    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Sets the rotation from a quaternion, e.g. an animation sample.
    pub fn set_quaternion(&mut self, q: Quat) {
        let (x, y, z) = q.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Sets the same scale on all three axes.
    #[inline]
    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
