use glam::{Quat, Vec3};

/// Values a keyframe track can blend between.
pub trait Interpolatable: Clone {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(*other, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.slerp(*other, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
}

/// Sorted keyframe times with one value per time.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        debug_assert_eq!(times.len(), values.len(), "one value per keyframe");
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Time of the last keyframe, or 0 for an empty track.
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples the track at `time`, clamping outside the keyed range.
    ///
    /// Returns `None` only for an empty track.
    pub fn sample(&self, time: f32) -> Option<T> {
        let len = self.times.len().min(self.values.len());
        if len == 0 {
            return None;
        }

        // First index whose time is strictly after `time`.
        let next = self.times[..len].partition_point(|&t| t <= time);
        if next == 0 {
            return Some(self.values[0].clone());
        }
        if next >= len {
            return Some(self.values[len - 1].clone());
        }

        let prev = next - 1;
        match self.interpolation {
            InterpolationMode::Step => Some(self.values[prev].clone()),
            InterpolationMode::Linear => {
                let t0 = self.times[prev];
                let t1 = self.times[next];
                let span = t1 - t0;
                let alpha = if span > 0.0 { (time - t0) / span } else { 0.0 };
                Some(self.values[prev].interpolate(&self.values[next], alpha))
            }
        }
    }
}
