//! Folio application layer
//!
//! Wires loaded models to tracked image targets and to the user's fingers:
//!
//! - [`world`]: scene, camera, model registry and per-target anchors
//! - [`anchor`]: found/lost lifecycle of one target's model
//! - [`input`]: mouse and touch payloads normalized into [`PointerEvent`]s
//! - [`interaction`]: picking plus the drag / pinch / wheel / click-toggle state machine
//! - [`frame`]: per-frame animation advance and render trigger
//! - [`config`]: page paths, language and default model placement
//! - [`experience`]: concurrent page setup and the top-level [`Experience`]
//! - [`winit_adapter`] (feature `winit`): window event adapter

pub mod anchor;
pub mod config;
pub mod experience;
pub mod frame;
pub mod input;
pub mod interaction;
pub mod world;

#[cfg(feature = "winit")]
pub mod winit_adapter;

pub use anchor::{Anchor, AnchorController};
pub use config::{ExperienceConfig, PageSpec, language_from_query, language_from_url};
pub use experience::{Experience, SetupReport, setup_pages};
pub use frame::{FrameDriver, Renderer};
pub use input::{PointerEvent, PointerSample, RawPointer, TouchList};
pub use interaction::{GesturePhase, InteractionEngine, InteractionState};
pub use world::{ModelKey, TargetIndex, TrackingEvent, World};

#[cfg(feature = "winit")]
pub use winit_adapter::{AdapterEvent, WinitPointerAdapter};
