use folio_core::Ray;
use glam::{Affine3A, Mat4, Vec2, Vec3, Vec4};

/// Perspective camera as supplied by the tracking engine.
///
/// The tracking engine owns the pose; the core only needs it to turn a
/// normalized device coordinate into a pick ray.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view, radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    world_matrix: Affine3A,
    projection_matrix: Mat4,
    view_matrix: Mat4,
}

impl Camera {
    /// `fov` is given in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            world_matrix: Affine3A::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    /// Places the camera; the view matrix is the inverse of `world`.
    pub fn set_world_matrix(&mut self, world: Affine3A) {
        self.world_matrix = world;
        self.view_matrix = Mat4::from(world).inverse();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Ray from the camera through `ndc` (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        // glam's perspective_rh maps the far plane to depth 1.
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        let origin = self.position();
        Ray::new(origin, far - origin)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(45.0, 1.0, 0.01, 100.0)
    }
}
