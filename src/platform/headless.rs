//! In-memory platform: scripted input, a recording render surface and a
//! cursor flag. Used by tests and the headless demo.

use std::collections::VecDeque;

use super::{CursorControl, InputEvent, InputSource, RenderSurface, Sprite};
use crate::Color;
use crate::sim::Rect;
use crate::ui::{Button, TextLabel};

/// Input fed from a queue, one batch per frame
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events for the next unscripted frame
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    pub fn push(&mut self, event: InputEvent) {
        self.push_frame(vec![event]);
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// A single draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Sprite(Sprite, Rect),
    Fill(Rect, Color),
    Text(TextLabel),
    Button(String),
}

/// Records draw calls; keeps the last presented frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pending: Vec<DrawCall>,
    pub last_frame: Vec<DrawCall>,
    pub frames_presented: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_sprites(&self, sprite: Sprite) -> usize {
        self.last_frame
            .iter()
            .filter(|c| matches!(c, DrawCall::Sprite(s, _) if *s == sprite))
            .count()
    }

    pub fn button_drawn(&self) -> bool {
        self.last_frame.iter().any(|c| matches!(c, DrawCall::Button(_)))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(label) => Some(label.text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCall::Clear(color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, bounds: &Rect) {
        self.pending.push(DrawCall::Sprite(sprite, *bounds));
    }

    fn fill_rect(&mut self, bounds: &Rect, color: Color) {
        self.pending.push(DrawCall::Fill(*bounds, color));
    }

    fn draw_text(&mut self, label: &TextLabel) {
        self.pending.push(DrawCall::Text(label.clone()));
    }

    fn draw_button(&mut self, button: &Button) {
        self.pending.push(DrawCall::Button(button.label.text.clone()));
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

/// Tracks cursor visibility
#[derive(Debug)]
pub struct CursorFlag {
    pub visible: bool,
    pub toggles: u32,
}

impl Default for CursorFlag {
    fn default() -> Self {
        Self {
            visible: true,
            toggles: 0,
        }
    }
}

impl CursorControl for CursorFlag {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.toggles += 1;
    }
}
