//! Per-page asset binding.
//!
//! Loading and scene construction are split: [`AssetBinder::fetch`] only
//! awaits the loader and touches no shared state, so many pages can be in
//! flight at once; [`AssetBinder::instantiate`] then builds the model in the
//! scene synchronously on the interaction thread.

use folio_core::LoadError;
use folio_animation::AnimationMixer;
use folio_scene::{NodeHandle, Scene};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioBackend, AudioTrack};
use crate::loader::{LoadedAsset, Loader};

pub const DEFAULT_SCALE: Vec3 = Vec3::splat(0.15);
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, -0.4, 0.0);

/// Placement applied to a freshly loaded model root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub scale: Vec3,
    pub position: Vec3,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            position: DEFAULT_POSITION,
        }
    }
}

/// A page's model with its animation and narration state.
///
/// Transform and visibility live on the `root` scene node; the mixer owns the
/// animation actions in clip order.
pub struct ModelInstance {
    pub root: NodeHandle,
    pub mixer: AnimationMixer,
    pub audio: Box<dyn AudioTrack>,
    pub model_path: String,
}

impl ModelInstance {
    pub fn is_visible(&self, scene: &Scene) -> bool {
        scene.get_node(self.root).is_some_and(|n| n.visible)
    }

    pub fn set_visible(&self, scene: &mut Scene, visible: bool) {
        if let Some(node) = scene.get_node_mut(self.root) {
            node.visible = visible;
        }
    }

    /// Uniform scale of the root (its x component).
    pub fn scale(&self, scene: &Scene) -> Option<f32> {
        scene.get_node(self.root).map(|n| n.transform.scale.x)
    }
}

impl std::fmt::Debug for ModelInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelInstance")
            .field("root", &self.root)
            .field("actions", &self.mixer.actions().len())
            .field("audio_paused", &self.audio.is_paused())
            .field("model_path", &self.model_path)
            .finish()
    }
}

pub struct AssetBinder<'a, L, A> {
    loader: &'a L,
    audio: &'a A,
}

impl<'a, L: Loader, A: AudioBackend> AssetBinder<'a, L, A> {
    pub fn new(loader: &'a L, audio: &'a A) -> Self {
        Self { loader, audio }
    }

    /// Requests the model from the loader.
    pub async fn fetch(&self, model_path: &str) -> Result<LoadedAsset, LoadError> {
        self.loader.load(model_path).await
    }

    /// Builds a [`ModelInstance`] from a loaded asset.
    ///
    /// The model subtree is created detached; attaching it to an anchor and
    /// registering it for interaction is the anchor controller's job. Every
    /// clip gets an action that starts playing immediately.
    pub fn instantiate(
        &self,
        scene: &mut Scene,
        asset: &LoadedAsset,
        model_path: &str,
        audio_path: &str,
        config: &ModelConfig,
    ) -> ModelInstance {
        let root = asset.prefab.instantiate(scene);
        if let Some(node) = scene.get_node_mut(root) {
            node.transform.scale = config.scale;
            node.transform.position = config.position;
            node.interactable = true;
        }

        let audio = self.audio.create(audio_path);

        let mut mixer = AnimationMixer::new(root);
        for clip in &asset.animations {
            let index = mixer.clip_action(scene, clip.clone());
            mixer.actions_mut()[index].play();
        }

        log::debug!(
            "Instantiated '{model_path}' with {} animation(s)",
            mixer.actions().len()
        );

        ModelInstance {
            root,
            mixer,
            audio,
            model_path: model_path.to_string(),
        }
    }

    /// [`fetch`](Self::fetch) followed by [`instantiate`](Self::instantiate).
    pub async fn bind(
        &self,
        scene: &mut Scene,
        model_path: &str,
        audio_path: &str,
        config: &ModelConfig,
    ) -> Result<ModelInstance, LoadError> {
        let asset = self.fetch(model_path).await?;
        Ok(self.instantiate(scene, &asset, model_path, audio_path, config))
    }
}
