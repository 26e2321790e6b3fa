//! Folio AR
//!
//! Image-anchored 3D models and narration for printed picture books. Each
//! page's model appears when the tracker recognizes the page, animates and
//! narrates, and can be tapped, rotated and zoomed.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`core`]: errors, clocks, rays and boxes
//! - [`scene`]: node arena, transforms, camera, ray picking
//! - [`animation`]: keyframe clips, actions and mixers
//! - [`assets`]: loaders, prefabs, audio and the per-page asset binder
//! - [`app`]: anchors, interaction, frame driving and experience setup

pub use folio_animation as animation;
pub use folio_app as app;
pub use folio_assets as assets;
pub use folio_core as core;
pub use folio_scene as scene;
pub use glam;

pub use folio_animation::{AnimationAction, AnimationClip, AnimationMixer, LoopMode};
pub use folio_app::{
    Anchor, AnchorController, Experience, ExperienceConfig, FrameDriver, GesturePhase,
    InteractionEngine, ModelKey, PointerEvent, RawPointer, Renderer, SetupReport, TargetIndex,
    TrackingEvent, World, setup_pages,
};
pub use folio_assets::{
    AssetBinder, AudioBackend, AudioTrack, LoadedAsset, Loader, MemoryLoader, ModelConfig,
    ModelInstance, Prefab, PrefabNode, VirtualAudio, VirtualAudioBackend,
};
pub use folio_core::{
    BindError, Clock, ConfigError, FolioError, FrameClock, LoadError, ManualClock, PlaybackError,
};
pub use folio_scene::{Camera, Node, NodeHandle, RayPicker, Scene, SceneRaycaster, Transform};

#[cfg(feature = "winit")]
pub use folio_app::WinitPointerAdapter;
