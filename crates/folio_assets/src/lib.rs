//! Asset Module
//!
//! Everything a page needs before it can be bound to an anchor:
//!
//! - [`Loader`]: the external model source (async, may fail with
//!   [`LoadError`](folio_core::LoadError))
//! - [`Prefab`]: the loader's scene-independent node template
//! - [`AudioTrack`] / [`AudioBackend`]: the narration primitive
//! - [`AssetBinder`]: turns a loaded asset into a configured [`ModelInstance`]

pub mod audio;
pub mod binder;
pub mod loader;
pub mod prefab;

pub use audio::{AudioBackend, AudioTrack, VirtualAudio, VirtualAudioBackend};
pub use binder::{AssetBinder, ModelConfig, ModelInstance};
pub use loader::{LoadedAsset, Loader, MemoryLoader};
pub use prefab::{Prefab, PrefabNode};
