use std::sync::Arc;

use folio_scene::NodeHandle;

use crate::clip::{AnimationClip, TargetPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// A track resolved against a concrete node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node: NodeHandle,
    pub target: TargetPath,
}

/// Playback state of one clip on one model.
///
/// Two independent switches decide whether time advances:
/// - `playing`: the action has been started with [`play`](Self::play) and not
///   stopped or finished
/// - `paused`: a temporary hold that keeps the current pose
///
/// [`is_running`](Self::is_running) is true only when both allow progress.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    playing: bool,
    pub(crate) bindings: Vec<PropertyBinding>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
            playing: false,
            bindings: Vec::new(),
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn bindings(&self) -> &[PropertyBinding] {
        &self.bindings
    }

    /// Schedules the action. A `Once` action that already reached its end
    /// starts over from the beginning.
    pub fn play(&mut self) {
        if self.loop_mode == LoopMode::Once && self.time >= self.clip.duration {
            self.time = 0.0;
        }
        self.enabled = true;
        self.playing = true;
    }

    /// Unschedules the action and rewinds it.
    pub fn stop(&mut self) {
        self.playing = false;
        self.time = 0.0;
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.playing && self.enabled && !self.paused && self.time_scale != 0.0
    }

    /// Advances local time by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.playing = false;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.playing = false;
                }
            }
            LoopMode::Loop => {
                self.time = self.time.rem_euclid(duration);
            }
            LoopMode::PingPong => {
                let double = duration * 2.0;
                let t = self.time.rem_euclid(double);
                self.time = if t > duration { double - t } else { t };
            }
        }
    }
}
