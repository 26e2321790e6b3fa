use std::fmt;

use folio_core::BindError;
use folio_assets::ModelInstance;
use folio_scene::{Camera, Node, NodeHandle, Scene};
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::anchor::{Anchor, AnchorController};

new_key_type! {
    /// Weak reference to a model registered in a [`World`].
    pub struct ModelKey;
}

/// Index of an image target in the tracking engine's target set.
///
/// Page `n` (1-based) is tracked as target `n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetIndex(pub usize);

impl fmt::Display for TargetIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recognition signal delivered by the tracking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingEvent {
    Found(TargetIndex),
    Lost(TargetIndex),
}

/// Everything the tracking engine and the interaction layer share.
///
/// Models are stored in an arena and referenced by [`ModelKey`]. The
/// interactable registry is an append-only list of those keys, in the order
/// pages finished setting up.
pub struct World {
    pub scene: Scene,
    pub camera: Camera,
    models: SlotMap<ModelKey, ModelInstance>,
    interactables: Vec<ModelKey>,
    anchors: FxHashMap<TargetIndex, AnchorController>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl World {
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            scene: Scene::new(),
            camera,
            models: SlotMap::with_key(),
            interactables: Vec::new(),
            anchors: FxHashMap::default(),
        }
    }

    // ========================================================================
    // Anchors
    // ========================================================================

    /// Creates the anchor group for `target`, or returns the existing one.
    pub fn add_anchor(&mut self, target: TargetIndex) -> Anchor {
        if let Some(controller) = self.anchors.get(&target) {
            return controller.anchor();
        }
        let group = self.scene.add_node(Node::new(format!("anchor-{target}")));
        let anchor = Anchor { target, group };
        self.anchors.insert(target, AnchorController::new(anchor));
        log::debug!("Added anchor for target {target}");
        anchor
    }

    #[must_use]
    pub fn anchor(&self, target: TargetIndex) -> Option<&AnchorController> {
        self.anchors.get(&target)
    }

    /// Binds `model` to `target` and registers it as interactable.
    ///
    /// The model root is attached under the anchor group. A target accepts a
    /// single model; the anchor is created if it does not exist yet.
    pub fn bind_model(
        &mut self,
        target: TargetIndex,
        model: ModelInstance,
    ) -> Result<ModelKey, BindError> {
        let anchor = self.add_anchor(target);
        if self.anchors.get(&target).is_some_and(AnchorController::is_bound) {
            return Err(BindError::TargetAlreadyBound(target.0));
        }
        if self.scene.get_node(model.root).is_none() {
            return Err(BindError::MissingRoot);
        }

        self.scene.attach(model.root, anchor.group);
        let key = self.models.insert(model);
        if let Some(controller) = self.anchors.get_mut(&target) {
            controller.set_model(key);
        }
        self.interactables.push(key);

        log::info!("Target {target} bound ({} interactable models)", self.interactables.len());
        Ok(key)
    }

    /// Routes a tracking signal to the controller of its target.
    pub fn handle_tracking_event(&mut self, event: TrackingEvent) {
        let target = match event {
            TrackingEvent::Found(t) | TrackingEvent::Lost(t) => t,
        };
        let Some(controller) = self.anchors.get(&target) else {
            log::debug!("Tracking event for unknown target {target}");
            return;
        };
        let Some(model) = controller.model().and_then(|key| self.models.get_mut(key)) else {
            log::debug!("Target {target} has no model; ignoring {event:?}");
            return;
        };

        match event {
            TrackingEvent::Found(_) => controller.on_target_found(&mut self.scene, model),
            TrackingEvent::Lost(_) => controller.on_target_lost(&mut self.scene, model),
        }
    }

    // ========================================================================
    // Models
    // ========================================================================

    #[must_use]
    pub fn model(&self, key: ModelKey) -> Option<&ModelInstance> {
        self.models.get(key)
    }

    pub fn model_mut(&mut self, key: ModelKey) -> Option<&mut ModelInstance> {
        self.models.get_mut(key)
    }

    /// The model bound to `target`, if its page loaded.
    #[must_use]
    pub fn model_for_target(&self, target: TargetIndex) -> Option<ModelKey> {
        self.anchors.get(&target).and_then(AnchorController::model)
    }

    #[must_use]
    pub fn interactables(&self) -> &[ModelKey] {
        &self.interactables
    }

    /// Scene roots of every registered model, in registry order.
    #[must_use]
    pub fn interactable_roots(&self) -> Vec<NodeHandle> {
        self.interactables
            .iter()
            .filter_map(|&key| self.models.get(key).map(|m| m.root))
            .collect()
    }

    /// Reverse lookup from a model root node to its registry key.
    #[must_use]
    pub fn model_by_root(&self, root: NodeHandle) -> Option<ModelKey> {
        self.interactables
            .iter()
            .copied()
            .find(|&key| self.models.get(key).is_some_and(|m| m.root == root))
    }

    /// Advances every model's mixer by `dt` seconds.
    pub fn update_mixers(&mut self, dt: f32) {
        for model in self.models.values_mut() {
            model.mixer.update(dt, &mut self.scene);
        }
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("nodes", &self.scene.nodes.len())
            .field("models", &self.models.len())
            .field("anchors", &self.anchors.len())
            .finish_non_exhaustive()
    }
}
