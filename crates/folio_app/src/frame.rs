use folio_core::{Clock, FrameClock};
use folio_scene::{Camera, Scene};

use crate::world::World;

/// External drawing backend.
pub trait Renderer {
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// Per-frame animation advance and render trigger.
///
/// Each [`frame`](Self::frame) reads one delta from the clock, advances every
/// model's mixer by it, refreshes world matrices and hands the scene to the
/// renderer.
#[derive(Debug, Default)]
pub struct FrameDriver<C = FrameClock> {
    clock: C,
    frame_count: u64,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            frame_count: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Runs one frame and returns the delta it consumed, in seconds.
    pub fn frame(&mut self, world: &mut World, renderer: &mut impl Renderer) -> f32 {
        let dt = self.clock.delta_seconds();
        world.update_mixers(dt);
        world.scene.update_matrix_world();
        renderer.render(&world.scene, &world.camera);
        self.frame_count += 1;
        dt
    }
}
