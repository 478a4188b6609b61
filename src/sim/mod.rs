//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One update per frame, speeds in pixels per frame
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod formation;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, ProjectileHit};
pub use entity::{Invader, Projectile, Ship};
pub use formation::{Formation, grid_dimensions};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, GameStats};
pub use tick::{TickInput, TickOutcome, tick};
