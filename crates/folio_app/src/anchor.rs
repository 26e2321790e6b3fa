//! Per-target model lifecycle.
//!
//! An [`Anchor`] is the scene group the tracking engine moves to follow one
//! image target. Its [`AnchorController`] owns the binding to at most one
//! model and reacts to the target appearing and disappearing.

use folio_assets::ModelInstance;
use folio_assets::audio::play_ignoring_policy;
use folio_scene::{NodeHandle, Scene};
use glam::Affine3A;

use crate::world::{ModelKey, TargetIndex};

/// A tracked image target and the group node that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub target: TargetIndex,
    pub group: NodeHandle,
}

impl Anchor {
    /// Places the anchor group at the pose reported by the tracker.
    pub fn set_pose(&self, scene: &mut Scene, pose: Affine3A) {
        let Some(node) = scene.get_node_mut(self.group) else {
            log::warn!("Anchor group for target {} is missing", self.target);
            return;
        };
        let (scale, rotation, translation) = pose.to_scale_rotation_translation();
        node.transform.position = translation;
        node.transform.set_quaternion(rotation);
        node.transform.scale = scale;
    }
}

/// Shows and starts a target's model when the page is found, hides and holds it when lost.
#[derive(Debug, Clone)]
pub struct AnchorController {
    anchor: Anchor,
    model: Option<ModelKey>,
}

impl AnchorController {
    #[must_use]
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            model: None,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub fn model(&self) -> Option<ModelKey> {
        self.model
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.model.is_some()
    }

    pub(crate) fn set_model(&mut self, key: ModelKey) {
        debug_assert!(self.model.is_none(), "anchor already bound");
        self.model = Some(key);
    }

    /// Shows the model, resumes its animations and restarts narration from
    /// the beginning. A refused audio start is ignored.
    pub fn on_target_found(&self, scene: &mut Scene, model: &mut ModelInstance) {
        log::debug!("Target {} found", self.anchor.target);
        model.set_visible(scene, true);

        for action in model.mixer.actions_mut() {
            action.paused = false;
            if !action.is_running() {
                action.play();
            }
        }

        model.audio.set_current_time(0.0);
        play_ignoring_policy(model.audio.as_mut());
    }

    /// Hides the model and holds animation and narration where they are.
    pub fn on_target_lost(&self, scene: &mut Scene, model: &mut ModelInstance) {
        log::debug!("Target {} lost", self.anchor.target);
        model.set_visible(scene, false);

        for action in model.mixer.actions_mut() {
            action.paused = true;
        }
        model.audio.pause();
    }
}
