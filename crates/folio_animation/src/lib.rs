pub mod action;
pub mod clip;
pub mod mixer;
pub mod tracks;

pub use action::{AnimationAction, LoopMode};
pub use clip::{AnimationClip, TargetPath, Track, TrackData, TrackMeta};
pub use mixer::AnimationMixer;
pub use tracks::{Interpolatable, InterpolationMode, KeyframeTrack};
