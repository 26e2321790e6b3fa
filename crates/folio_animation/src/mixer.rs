use std::sync::Arc;

use folio_scene::{NodeHandle, Scene};

use crate::action::{AnimationAction, PropertyBinding};
use crate::clip::{AnimationClip, TargetPath, TrackData};

/// Drives every action of one model.
///
/// Tracks are resolved by node name inside the subtree at `root` when an
/// action is created; tracks naming a node that does not exist are skipped.
#[derive(Debug, Clone)]
pub struct AnimationMixer {
    root: NodeHandle,
    actions: Vec<AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new(root: NodeHandle) -> Self {
        Self {
            root,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Creates an action for `clip`, bound to this mixer's subtree, and
    /// returns its index.
    pub fn clip_action(&mut self, scene: &Scene, clip: Arc<AnimationClip>) -> usize {
        let mut action = AnimationAction::new(clip);
        action.bindings = bind(scene, self.root, action.clip());
        if action.bindings.len() < action.clip().tracks.len() {
            log::warn!(
                "Clip '{}': {} of {} tracks target unknown nodes",
                action.clip().name,
                action.clip().tracks.len() - action.bindings.len(),
                action.clip().tracks.len()
            );
        }
        self.actions.push(action);
        self.actions.len() - 1
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut [AnimationAction] {
        &mut self.actions
    }

    /// Advances every action by `dt` and writes the sampled values into the
    /// bound nodes. Paused actions keep contributing their held pose.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for action in &mut self.actions {
            action.update(dt);
        }

        for action in &self.actions {
            if !action.is_playing() || !action.enabled || action.weight <= 0.0 {
                continue;
            }
            let clip = action.clip();
            for binding in action.bindings() {
                let Some(track) = clip.tracks.get(binding.track_index) else {
                    continue;
                };
                let Some(node) = scene.get_node_mut(binding.node) else {
                    continue;
                };
                match (&track.data, binding.target) {
                    (TrackData::Vector3(t), TargetPath::Translation) => {
                        if let Some(v) = t.sample(action.time) {
                            node.transform.position = v;
                        }
                    }
                    (TrackData::Vector3(t), TargetPath::Scale) => {
                        if let Some(v) = t.sample(action.time) {
                            node.transform.scale = v;
                        }
                    }
                    (TrackData::Quaternion(t), TargetPath::Rotation) => {
                        if let Some(q) = t.sample(action.time) {
                            node.transform.set_quaternion(q);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

fn bind(scene: &Scene, root: NodeHandle, clip: &AnimationClip) -> Vec<PropertyBinding> {
    clip.tracks
        .iter()
        .enumerate()
        .filter_map(|(track_index, track)| {
            scene
                .find_by_name(root, &track.meta.node_name)
                .map(|node| PropertyBinding {
                    track_index,
                    node,
                    target: track.meta.target,
                })
        })
        .collect()
}
