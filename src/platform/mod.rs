//! Platform abstraction layer
//!
//! The engine never touches a window, font, or audio device directly. It
//! consumes input events and emits draw primitives through the [`Frontend`]
//! trait; a real frontend wraps a windowing/rendering stack, while
//! [`ScriptedFrontend`] drives headless runs for tests and the demo binary.

use glam::Vec2;

use crate::engine::InputEvent;

/// RGB color for draw primitives
pub type Color = [u8; 3];

/// Render/input adapter the engine runs against
pub trait Frontend {
    /// Drain input events that arrived since the previous frame, in order
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Current pointer position in playfield coordinates
    fn mouse_position(&self) -> Vec2;

    /// Draw a circle; `stroke == 0` means filled
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, stroke: f32);

    /// Draw a line segment
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    /// Yield to frame pacing; returns elapsed milliseconds since last tick
    fn tick(&mut self, target_fps: u32) -> u64;
}

/// Headless frontend driven by pre-scripted event frames.
///
/// Each call to `poll_events` pops the next scripted frame; `tick` advances a
/// synthetic clock by a fixed step. Draw calls are counted, not rendered.
pub struct ScriptedFrontend {
    frames: Vec<Vec<InputEvent>>,
    cursor: usize,
    step_ms: u64,
    mouse: Vec2,
    pub circles_drawn: usize,
    pub lines_drawn: usize,
}

impl ScriptedFrontend {
    pub fn new(step_ms: u64) -> Self {
        Self {
            frames: Vec::new(),
            cursor: 0,
            step_ms,
            mouse: Vec2::ZERO,
            circles_drawn: 0,
            lines_drawn: 0,
        }
    }

    /// Queue a frame's worth of events
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push(events);
    }

    pub fn set_mouse(&mut self, pos: Vec2) {
        self.mouse = pos;
    }

    /// True once every scripted frame has been consumed
    pub fn exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl Frontend for ScriptedFrontend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let events = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        events
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _stroke: f32) {
        self.circles_drawn += 1;
    }

    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color, _width: f32) {
        self.lines_drawn += 1;
    }

    fn tick(&mut self, _target_fps: u32) -> u64 {
        self.step_ms
    }
}
