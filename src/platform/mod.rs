//! Platform abstraction layer
//!
//! The game core talks to the window system only through these traits:
//! - `InputSource`: discrete input events, polled once per frame
//! - `RenderSurface`: draw calls, issued once per frame after simulation
//! - `CursorControl`: pointer visibility toggled on start / game over
//!
//! `headless` provides in-memory implementations for tests and the demo.

pub mod headless;

use glam::Vec2;

use crate::Color;
use crate::sim::Rect;
use crate::ui::{Button, TextLabel};

/// A recognised input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MoveLeft { pressed: bool },
    MoveRight { pressed: bool },
    Fire,
    Quit,
    /// Pointer button pressed at a screen position
    Click(Vec2),
    /// Anything the platform saw but the game has no binding for
    Other,
}

/// Images the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Invader,
}

pub trait InputSource {
    /// Events that arrived since the last poll, oldest first
    fn poll(&mut self) -> Vec<InputEvent>;
}

pub trait RenderSurface {
    fn clear(&mut self, color: Color);
    fn draw_sprite(&mut self, sprite: Sprite, bounds: &Rect);
    fn fill_rect(&mut self, bounds: &Rect, color: Color);
    fn draw_text(&mut self, label: &TextLabel);
    fn draw_button(&mut self, button: &Button);
    /// Make the finished frame visible
    fn present(&mut self);
}

pub trait CursorControl {
    fn set_visible(&mut self, visible: bool);
}
