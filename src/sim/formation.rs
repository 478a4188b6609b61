//! Invader formation: grid layout and the shared side-to-side sweep
//!
//! The whole fleet moves as one: every invader shares a single direction,
//! and an edge contact by any member drops and reverses all of them.

use glam::Vec2;

use super::entity::Invader;
use super::rect::Rect;

/// Number of (columns, rows) that fit on screen with one-invader spacing
///
/// Zero in either dimension when the screen is too small; an empty fleet is
/// a valid result.
pub fn grid_dimensions(ship_height: f32, invader_size: Vec2, screen: Vec2) -> (u32, u32) {
    let (w, h) = (invader_size.x, invader_size.y);

    let available_x = screen.x - 2.0 * w;
    let cols = (available_x / (2.0 * w)).floor().max(0.0) as u32;

    let available_y = screen.y - 3.0 * h - ship_height;
    let rows = (available_y / (2.0 * h)).floor().max(0.0) as u32;

    (cols, rows)
}

/// The set of live invaders, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Formation {
    pub invaders: Vec<Invader>,
    next_id: u32,
}

impl Formation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fleet with a freshly laid out grid
    ///
    /// Invader (row, col) sits at `x = w + 2w * col`, `y = h + 2h * row`.
    pub fn build(&mut self, ship: &Rect, invader_size: Vec2, screen: Vec2) -> usize {
        self.invaders.clear();

        let (cols, rows) = grid_dimensions(ship.height(), invader_size, screen);
        let (w, h) = (invader_size.x, invader_size.y);

        self.invaders.reserve((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Vec2::new(w + 2.0 * w * col as f32, h + 2.0 * h * row as f32);
                let id = self.next_entity_id();
                self.invaders.push(Invader::new(id, pos, invader_size));
            }
        }

        log::debug!("Built formation: {} cols x {} rows", cols, rows);
        self.invaders.len()
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Move every invader horizontally by `speed * direction`
    pub fn advance(&mut self, direction: f32, speed: f32) {
        for invader in &mut self.invaders {
            invader.advance(speed, direction);
        }
    }

    /// True if any invader touches or passes either side of the screen
    pub fn check_edge_contact(&self, screen_width: f32) -> bool {
        self.invaders.iter().any(|inv| inv.at_edge(screen_width))
    }

    /// Drop the whole fleet and flip the shared direction
    pub fn reverse_and_drop(&mut self, direction: &mut f32, drop_distance: f32) {
        for invader in &mut self.invaders {
            invader.rect.pos.y += drop_distance;
        }
        *direction = -*direction;
    }

    /// One frame of fleet movement: advance, then reverse at most once
    ///
    /// Returns true if the fleet dropped this frame.
    pub fn step(
        &mut self,
        direction: &mut f32,
        speed: f32,
        drop_distance: f32,
        screen_width: f32,
    ) -> bool {
        self.advance(*direction, speed);
        if self.check_edge_contact(screen_width) {
            self.reverse_and_drop(direction, drop_distance);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.invaders.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }
}
