//! Platform-agnostic pointer input
//!
//! Mouse and touch payloads arrive in different shapes. They are normalized
//! here, once, into [`PointerEvent`]s carrying a single primary position plus
//! the list of active touch points. Platform adapters produce [`RawPointer`]s.

use glam::Vec2;
use smallvec::SmallVec;

/// Active touch points in screen pixels, in contact order.
pub type TouchList = SmallVec<[Vec2; 4]>;

/// Pointer payload as delivered by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointer {
    Mouse(Vec2),
    Touches(TouchList),
}

/// A pointer position sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSample {
    /// First active touch, or the mouse position
    pub position: Vec2,
    /// Empty for mouse input
    pub touches: TouchList,
}

impl PointerSample {
    #[must_use]
    pub fn mouse(position: Vec2) -> Self {
        Self {
            position,
            touches: TouchList::new(),
        }
    }

    /// `None` when no touch point is active.
    #[must_use]
    pub fn from_raw(raw: RawPointer) -> Option<Self> {
        match raw {
            RawPointer::Mouse(position) => Some(Self::mouse(position)),
            RawPointer::Touches(touches) => {
                let position = *touches.first()?;
                Some(Self { position, touches })
            }
        }
    }

    /// Distance between the two touch points of a two-finger gesture.
    #[must_use]
    pub fn pinch_distance(&self) -> Option<f32> {
        match self.touches.as_slice() {
            [a, b] => Some(a.distance(*b)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down(PointerSample),
    Move(PointerSample),
    /// Release; `remaining` lists touches still in contact
    Up { remaining: TouchList },
    /// Scroll, positive `delta_y` meaning away from the user
    Wheel { delta_y: f32 },
}

impl PointerEvent {
    #[must_use]
    pub fn down(raw: RawPointer) -> Option<Self> {
        PointerSample::from_raw(raw).map(Self::Down)
    }

    #[must_use]
    pub fn moved(raw: RawPointer) -> Option<Self> {
        PointerSample::from_raw(raw).map(Self::Move)
    }

    #[must_use]
    pub fn up(raw: RawPointer) -> Self {
        let remaining = match raw {
            RawPointer::Mouse(_) => TouchList::new(),
            RawPointer::Touches(touches) => touches,
        };
        Self::Up { remaining }
    }

    #[must_use]
    pub fn wheel(delta_y: f32) -> Self {
        Self::Wheel { delta_y }
    }
}
