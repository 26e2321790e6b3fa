//! Winit input adapter
//!
//! Translates winit window events into [`PointerEvent`]s. Winit reports
//! touches one finger at a time, so the adapter keeps the set of fingers in
//! contact to produce the full touch list every gesture needs.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};

use folio_core::Clock;
use folio_scene::RayPicker;

use crate::experience::Experience;
use crate::input::{PointerEvent, RawPointer, TouchList};

/// Pixels per scroll line, matching what browsers report for `deltaY`.
const LINE_HEIGHT: f32 = 100.0;

/// Result of translating one window event.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterEvent {
    Pointer(PointerEvent),
    Resized { width: f32, height: f32 },
}

#[derive(Debug, Default)]
pub struct WinitPointerAdapter {
    cursor: Vec2,
    /// Fingers in contact, in contact order
    touches: Vec<(u64, Vec2)>,
}

impl WinitPointerAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn touch_list(&self) -> TouchList {
        self.touches.iter().map(|&(_, p)| p).collect()
    }

    fn on_touch(&mut self, touch: &Touch) -> Option<PointerEvent> {
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        self.track_touch(touch.id, touch.phase, position)
    }

    /// Updates the finger set and reports the gesture it now forms. A move
    /// for a finger that never started is dropped.
    fn track_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Started => {
                self.touches.push((id, position));
                PointerEvent::down(RawPointer::Touches(self.touch_list()))
            }
            TouchPhase::Moved => {
                let slot = self.touches.iter_mut().find(|(finger, _)| *finger == id)?;
                slot.1 = position;
                PointerEvent::moved(RawPointer::Touches(self.touch_list()))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.retain(|(finger, _)| *finger != id);
                Some(PointerEvent::up(RawPointer::Touches(self.touch_list())))
            }
        }
    }

    /// Translates `event`; events unrelated to pointers yield `None`.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> Option<AdapterEvent> {
        let pointer = match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                PointerEvent::moved(RawPointer::Mouse(self.cursor))
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => PointerEvent::down(RawPointer::Mouse(self.cursor)),
                ElementState::Released => Some(PointerEvent::up(RawPointer::Mouse(self.cursor))),
            },

            WindowEvent::MouseWheel { delta, .. } => Some(PointerEvent::wheel(wheel_delta_y(delta))),

            WindowEvent::Touch(touch) => self.on_touch(touch),

            WindowEvent::Resized(size) => {
                return Some(AdapterEvent::Resized {
                    width: size.width as f32,
                    height: size.height as f32,
                });
            }

            _ => None,
        };
        pointer.map(AdapterEvent::Pointer)
    }
}

/// Winit reports scrolling up as positive, browsers as negative.
fn wheel_delta_y(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32),
    }
}

impl<C: Clock, P: RayPicker> Experience<C, P> {
    /// Feeds a winit window event through `adapter` into the session.
    pub fn handle_window_event(&mut self, adapter: &mut WinitPointerAdapter, event: &WindowEvent) {
        match adapter.process_window_event(event) {
            Some(AdapterEvent::Pointer(pointer)) => self.handle_pointer(&pointer),
            Some(AdapterEvent::Resized { width, height }) => self.resize(width, height),
            None => {}
        }
    }
}
