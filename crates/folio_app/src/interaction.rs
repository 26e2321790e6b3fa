//! Gesture interpretation for the model under the user's finger.
//!
//! One [`InteractionEngine`] serves the whole experience. A press picks the
//! nearest visible model and toggles its playback; dragging rotates it; two
//! fingers or the wheel scale it. Gesture phases:
//!
//! ```text
//! Idle ──down──▶ Picking ──hit──▶ Dragging ──up──▶ Idle
//!   │               └──miss──▶ (previous phase)
//!   └──two-finger down/move──▶ Pinching ──up, < 2 touches left──▶ Idle
//! ```
//!
//! The wheel works in any phase.

use folio_assets::ModelInstance;
use folio_assets::audio::play_ignoring_policy;
use folio_scene::{NodeHandle, RayPicker, SceneRaycaster};
use glam::Vec2;

use crate::input::{PointerEvent, PointerSample};
use crate::world::{ModelKey, World};

/// Radians of rotation per pixel of drag.
pub const ROTATE_SPEED: f32 = 0.01;
/// Scale change per unit of wheel `delta_y`.
pub const WHEEL_ZOOM_SPEED: f32 = -0.0005;
pub const MIN_SCALE: f32 = 0.05;
pub const MAX_SCALE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Picking,
    Dragging,
    Pinching,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    /// Last model picked; always a registered interactable
    pub current_model: Option<ModelKey>,
    pub dragging: bool,
    pub previous_position: Vec2,
    /// Finger distance at pinch start, 0 when no pinch is in progress
    pub initial_pinch_distance: f32,
    /// Model scale at pinch start
    pub initial_scale: f32,
    pub phase: GesturePhase,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            current_model: None,
            dragging: false,
            previous_position: Vec2::ZERO,
            initial_pinch_distance: 0.0,
            initial_scale: 1.0,
            phase: GesturePhase::Idle,
        }
    }
}

#[inline]
fn clamp_scale(s: f32) -> f32 {
    s.clamp(MIN_SCALE, MAX_SCALE)
}

/// Turns pointer gestures into picks, rotations and scale changes on the world's models.
pub struct InteractionEngine<P = SceneRaycaster> {
    state: InteractionState,
    viewport: Vec2,
    picker: P,
}

impl InteractionEngine<SceneRaycaster> {
    /// Engine using the built-in bounding-box picker. `viewport` is the
    /// canvas size in pixels.
    #[must_use]
    pub fn new(viewport: Vec2) -> Self {
        Self::with_picker(SceneRaycaster::new(), viewport)
    }
}

impl<P: RayPicker> InteractionEngine<P> {
    pub fn with_picker(picker: P, viewport: Vec2) -> Self {
        Self {
            state: InteractionState::default(),
            viewport,
            picker,
        }
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn current_model(&self) -> Option<ModelKey> {
        self.state.current_model
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.state.phase
    }

    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Screen pixels (origin top-left, y down) to normalized device
    /// coordinates (origin center, y up).
    #[must_use]
    pub fn to_ndc(&self, position: Vec2) -> Vec2 {
        let size = self.viewport.max(Vec2::ONE);
        Vec2::new(position.x / size.x * 2.0 - 1.0, -(position.y / size.y) * 2.0 + 1.0)
    }

    pub fn handle_event(&mut self, world: &mut World, event: &PointerEvent) {
        match event {
            PointerEvent::Down(sample) => self.pointer_down(world, sample),
            PointerEvent::Move(sample) => self.pointer_move(world, sample),
            PointerEvent::Up { remaining } => self.pointer_up(remaining.len()),
            PointerEvent::Wheel { delta_y } => self.wheel(world, *delta_y),
        }
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    pub fn pointer_down(&mut self, world: &mut World, sample: &PointerSample) {
        if let Some(distance) = sample.pinch_distance() {
            self.state.previous_position = sample.position;
            self.begin_pinch(world, distance);
            return;
        }

        // A miss leaves the whole state as it was before the press.
        let before = self.state;
        self.state.phase = GesturePhase::Picking;

        let Some(key) = self.pick(world, sample.position) else {
            self.state = before;
            return;
        };

        self.state.previous_position = sample.position;
        self.state.current_model = Some(key);
        self.state.dragging = true;
        self.state.phase = GesturePhase::Dragging;
        log::debug!("Picked model {key:?}");

        if let Some(model) = world.model_mut(key) {
            toggle_playback(model);
        }
    }

    pub fn pointer_move(&mut self, world: &mut World, sample: &PointerSample) {
        if let Some(distance) = sample.pinch_distance() {
            if self.state.phase == GesturePhase::Pinching {
                self.apply_pinch(world, distance);
            } else {
                self.begin_pinch(world, distance);
            }
            return;
        }

        if !self.state.dragging {
            return;
        }
        let Some(root) = self.visible_current_root(world) else {
            return;
        };
        let Some(node) = world.scene.get_node_mut(root) else {
            return;
        };

        let delta = sample.position - self.state.previous_position;
        node.transform.rotation.y += delta.x * ROTATE_SPEED;
        node.transform.rotation.x += delta.y * ROTATE_SPEED;
        self.state.previous_position = sample.position;
    }

    /// Release with `remaining_touches` fingers still down.
    pub fn pointer_up(&mut self, remaining_touches: usize) {
        self.state.dragging = false;

        if self.state.phase == GesturePhase::Pinching {
            if remaining_touches >= 2 {
                return;
            }
            self.state.initial_pinch_distance = 0.0;
            self.state.initial_scale = 1.0;
            log::debug!("Pinch ended");
        }
        self.state.phase = GesturePhase::Idle;
    }

    pub fn wheel(&mut self, world: &mut World, delta_y: f32) {
        let Some(root) = self.state.current_model.and_then(|key| world.model(key)).map(|m| m.root) else {
            return;
        };
        if let Some(node) = world.scene.get_node_mut(root) {
            let s = clamp_scale(node.transform.scale.x + delta_y * WHEEL_ZOOM_SPEED);
            node.transform.set_uniform_scale(s);
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Nearest hit among registered models, resolved to its model. Only the
    /// nearest hit counts: if its model is hidden, nothing is picked.
    fn pick(&self, world: &World, position: Vec2) -> Option<ModelKey> {
        let ray = world.camera.ray_from_ndc(self.to_ndc(position));
        let roots = world.interactable_roots();
        let hits = self.picker.intersect(&world.scene, &ray, &roots, true);

        let nearest = hits.first()?;
        let root = world.scene.interactable_root(nearest.node)?;
        let key = world.model_by_root(root)?;
        world.model(key)?.is_visible(&world.scene).then_some(key)
    }

    fn begin_pinch(&mut self, world: &World, distance: f32) {
        self.state.initial_pinch_distance = distance;
        if let Some(scale) = self
            .state
            .current_model
            .and_then(|key| world.model(key))
            .and_then(|m| m.scale(&world.scene))
        {
            self.state.initial_scale = scale;
        }
        self.state.dragging = false;
        self.state.phase = GesturePhase::Pinching;
        log::debug!("Pinch started at {distance:.1}px");
    }

    fn apply_pinch(&mut self, world: &mut World, distance: f32) {
        if self.state.initial_pinch_distance <= 0.0 {
            return;
        }
        let Some(root) = self.visible_current_root(world) else {
            return;
        };
        let zoom = distance / self.state.initial_pinch_distance;
        let s = clamp_scale(self.state.initial_scale * zoom);
        if let Some(node) = world.scene.get_node_mut(root) {
            node.transform.set_uniform_scale(s);
        }
    }

    fn visible_current_root(&self, world: &World) -> Option<NodeHandle> {
        let model = world.model(self.state.current_model?)?;
        model.is_visible(&world.scene).then_some(model.root)
    }
}

/// Click interaction: flips every action's pause flag and toggles narration.
fn toggle_playback(model: &mut ModelInstance) {
    for action in model.mixer.actions_mut() {
        action.paused = !action.paused;
    }
    if model.audio.is_paused() {
        play_ignoring_policy(model.audio.as_mut());
    } else {
        model.audio.pause();
    }
}
