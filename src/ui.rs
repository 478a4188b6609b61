//! Play button and scoreboard
//!
//! Layout only: these types decide what text goes where. Drawing is done by
//! the platform's `RenderSurface`.

use glam::Vec2;

use crate::Color;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameStats, Rect};

/// Which point of a label its position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
}

/// A prepared line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    pub anchor: Anchor,
    pub color: Color,
}

/// The Play button shown while no game is running
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub color: Color,
    pub label: TextLabel,
}

impl Button {
    /// A button centred on the screen
    pub fn new(screen: Vec2, text: &str) -> Self {
        let mut rect = Rect::from_size(Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT));
        rect.set_center(screen * 0.5);
        Self {
            rect,
            color: BUTTON_COLOR,
            label: TextLabel {
                text: text.to_string(),
                pos: rect.center(),
                anchor: Anchor::Center,
                color: BUTTON_TEXT_COLOR,
            },
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains_point(point)
    }
}

/// Score, high score, level and remaining-ship labels
#[derive(Debug, Clone)]
pub struct Scoreboard {
    screen: Vec2,
    ship_size: Vec2,
    pub score: TextLabel,
    pub high_score: TextLabel,
    pub level: TextLabel,
    /// One ship icon per remaining life
    pub ships: Vec<Rect>,
}

impl Scoreboard {
    pub fn new(settings: &Settings, stats: &GameStats) -> Self {
        let screen = settings.screen_size();
        let label = |pos: Vec2, anchor: Anchor| TextLabel {
            text: String::new(),
            pos,
            anchor,
            color: TEXT_COLOR,
        };

        let mut board = Self {
            screen,
            ship_size: settings.ship_size,
            score: label(Vec2::new(screen.x - HUD_MARGIN, HUD_MARGIN), Anchor::TopRight),
            high_score: label(Vec2::new(screen.x / 2.0, HUD_MARGIN), Anchor::TopCenter),
            level: label(
                Vec2::new(screen.x - HUD_MARGIN, HUD_MARGIN + HUD_LINE_HEIGHT),
                Anchor::TopRight,
            ),
            ships: Vec::new(),
        };
        board.refresh_all(stats);
        board
    }

    pub fn prep_score(&mut self, score: u64) {
        self.score.text = format_score(score);
    }

    pub fn prep_high_score(&mut self, high_score: u64) {
        self.high_score.text = format_score(high_score);
    }

    pub fn prep_level(&mut self, level: u32) {
        self.level.text = level.to_string();
    }

    /// Lay out one ship icon per life along the top-left
    pub fn prep_ships(&mut self, lives: u32) {
        let margin = HUD_MARGIN / 2.0;
        self.ships = (0..lives)
            .map(|i| {
                Rect::new(
                    margin + i as f32 * self.ship_size.x,
                    margin,
                    self.ship_size.x,
                    self.ship_size.y,
                )
            })
            .filter(|r| r.right() <= self.screen.x)
            .collect();
    }

    pub fn refresh_all(&mut self, stats: &GameStats) {
        self.prep_score(stats.score);
        self.prep_high_score(stats.high_score);
        self.prep_level(stats.level);
        self.prep_ships(stats.lives_left);
    }

    /// Update whichever labels an event affects
    pub fn apply(&mut self, event: &GameEvent, stats: &GameStats) {
        match event {
            GameEvent::GameStarted => self.refresh_all(stats),
            GameEvent::ScoreChanged(score) => self.prep_score(*score),
            GameEvent::HighScoreChanged(high) => self.prep_high_score(*high),
            GameEvent::LevelCleared { level } => self.prep_level(*level),
            GameEvent::LifeLost { lives_left } => self.prep_ships(*lives_left),
            GameEvent::GameOver { .. } | GameEvent::CursorVisible(_) => {}
        }
    }

    /// Labels in draw order
    pub fn labels(&self) -> [&TextLabel; 3] {
        [&self.score, &self.high_score, &self.level]
    }
}

/// Round to the nearest ten and group thousands: `12345` -> `"12,350"`
pub fn format_score(score: u64) -> String {
    let rounded = score.saturating_add(5) / 10 * 10;
    let digits = rounded.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
