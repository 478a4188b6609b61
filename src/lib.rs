//! Alien Invasion - a fixed-formation arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, collisions, game state)
//! - `game`: Per-frame orchestration (input -> simulation -> render)
//! - `platform`: Render/input/cursor interfaces and a headless implementation
//! - `ui`: Play button and scoreboard
//! - `settings`: Tunables and configuration loading

pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::{FrameOutcome, Game};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Frames per second the simulation is tuned for
    pub const FRAME_RATE: u32 = 60;

    /// Pause after losing a life (half a second)
    pub const LIFE_LOST_PAUSE_TICKS: u64 = FRAME_RATE as u64 / 2;

    /// Play button geometry
    pub const BUTTON_WIDTH: f32 = 200.0;
    pub const BUTTON_HEIGHT: f32 = 50.0;
    pub const BUTTON_COLOR: Color = Color::rgb(0, 255, 0);

    /// HUD text
    pub const TEXT_COLOR: Color = Color::rgb(30, 30, 30);
    pub const BUTTON_TEXT_COLOR: Color = Color::rgb(255, 255, 255);
    /// Margin between HUD labels and the screen edge
    pub const HUD_MARGIN: f32 = 20.0;
    /// Nominal label height used for stacking HUD rows
    pub const HUD_LINE_HEIGHT: f32 = 48.0;

    pub use crate::Color;
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
