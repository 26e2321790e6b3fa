//! Narration audio primitive.
//!
//! Mirrors what a browser `HTMLAudioElement` offers the core: start (which the
//! host may refuse), pause, a settable playhead and a paused flag. Decoding and
//! output are the host's business.

use folio_core::PlaybackError;

pub trait AudioTrack {
    /// Starts or resumes playback. The host may refuse, e.g. outside a user
    /// gesture.
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn current_time(&self) -> f32;
    fn set_current_time(&mut self, seconds: f32);
}

/// Constructs audio tracks from paths.
pub trait AudioBackend {
    fn create(&self, path: &str) -> Box<dyn AudioTrack>;
}

/// Attempts playback and drops a refusal.
///
/// A rejected start leaves the track paused; the next user-triggered attempt
/// may succeed.
pub fn play_ignoring_policy(track: &mut dyn AudioTrack) {
    if let Err(err) = track.play() {
        log::debug!("Audio playback not started: {err}");
    }
}

/// State-only audio track.
///
/// Tracks the playhead and paused flag without producing sound. With
/// `autoplay_blocked` every `play` is refused until [`unlock`](Self::unlock)
/// is called, which is how browsers behave before the first user gesture.
#[derive(Debug, Clone)]
pub struct VirtualAudio {
    pub path: String,
    paused: bool,
    current_time: f32,
    autoplay_blocked: bool,
    /// Number of `play` calls, accepted or not
    pub play_attempts: u32,
}

impl VirtualAudio {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            paused: true,
            current_time: 0.0,
            autoplay_blocked: false,
            play_attempts: 0,
        }
    }

    #[must_use]
    pub fn blocked(mut self) -> Self {
        self.autoplay_blocked = true;
        self
    }

    pub fn unlock(&mut self) {
        self.autoplay_blocked = false;
    }

    /// Moves the playhead forward while playing.
    pub fn advance(&mut self, seconds: f32) {
        if !self.paused {
            self.current_time += seconds;
        }
    }
}

impl AudioTrack for VirtualAudio {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.play_attempts += 1;
        if self.autoplay_blocked {
            return Err(PlaybackError::PolicyRejected);
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f32 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f32) {
        self.current_time = seconds.max(0.0);
    }
}

/// Backend producing [`VirtualAudio`] tracks.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualAudioBackend {
    pub autoplay_blocked: bool,
}

impl AudioBackend for VirtualAudioBackend {
    fn create(&self, path: &str) -> Box<dyn AudioTrack> {
        let track = VirtualAudio::new(path);
        if self.autoplay_blocked {
            Box::new(track.blocked())
        } else {
            Box::new(track)
        }
    }
}
