//! Ship, projectile and invader entities
//!
//! Entities hold only their own geometry and motion. Speeds and screen
//! bounds are passed in by the caller each update.

use glam::Vec2;

use super::rect::Rect;

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// Create a ship centred on the bottom edge of the screen
    pub fn new(size: Vec2, screen: Vec2) -> Self {
        let mut ship = Self {
            rect: Rect::from_size(size),
            moving_left: false,
            moving_right: false,
        };
        ship.center(screen);
        ship
    }

    /// Re-centre on the bottom edge (on new game or life loss)
    pub fn center(&mut self, screen: Vec2) {
        self.rect.set_mid_bottom(Vec2::new(screen.x / 2.0, screen.y));
    }

    /// Apply movement intents, clamped to the screen
    pub fn update(&mut self, speed: f32, screen_width: f32) {
        let right = self.moving_right && self.rect.right() < screen_width;
        let left = self.moving_left && self.rect.left() > 0.0;
        let step = right as i8 - left as i8;
        if step == 0 {
            return;
        }

        let x = self.rect.pos.x + step as f32 * speed;
        let max_x = (screen_width - self.rect.width()).max(0.0);
        self.rect.pos.x = x.clamp(0.0, max_x);
    }
}

/// A player projectile travelling straight up
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    /// Upward speed in pixels per frame, fixed at launch
    pub speed: f32,
}

impl Projectile {
    /// Spawn a projectile at the ship's nose
    pub fn fire_from(id: u32, ship: &Ship, size: Vec2, speed: f32) -> Self {
        let mut rect = Rect::from_size(size);
        rect.set_mid_top(ship.rect.mid_top());
        Self { id, rect, speed }
    }

    pub fn update(&mut self) {
        self.rect.pos.y -= self.speed;
    }

    /// Fully above the top of the screen
    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0.0
    }
}

/// A single enemy in the formation
#[derive(Debug, Clone)]
pub struct Invader {
    pub id: u32,
    pub rect: Rect,
}

impl Invader {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            rect: Rect { pos, size },
        }
    }

    /// Horizontal step; sign of `direction` picks left or right
    pub fn advance(&mut self, speed: f32, direction: f32) {
        self.rect.pos.x += speed * direction;
    }

    /// True when touching or past either side of the screen
    pub fn at_edge(&self, screen_width: f32) -> bool {
        self.rect.right() >= screen_width || self.rect.left() <= 0.0
    }
}
