//! Game state and the session state machine
//!
//! `GameState` owns every entity plus the stats and settings. All
//! transitions (start, scoring, level clear, life loss) go through the
//! methods here; side effects on the outside world are queued as
//! `GameEvent`s for the orchestrator to apply.

use super::collision::CollisionReport;
use super::entity::{Projectile, Ship};
use super::formation::Formation;
use crate::consts::LIFE_LOST_PAUSE_TICKS;
use crate::settings::Settings;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Play button showing, nothing moves
    Idle,
    /// Simulation runs every frame
    Active,
}

/// Externally visible consequences of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    ScoreChanged(u64),
    HighScoreChanged(u64),
    LevelCleared { level: u32 },
    LifeLost { lives_left: u32 },
    GameOver { score: u64 },
    /// Show or hide the pointer cursor
    CursorVisible(bool),
}

/// Score, level and lives for the current session
#[derive(Debug, Clone)]
pub struct GameStats {
    pub lives_left: u32,
    pub score: u64,
    /// Best score seen in this process; survives `reset`
    pub high_score: u64,
    pub level: u32,
    pub active: bool,
}

impl GameStats {
    pub fn new(settings: &Settings) -> Self {
        let mut stats = Self {
            lives_left: 0,
            score: 0,
            high_score: 0,
            level: 1,
            active: false,
        };
        stats.reset(settings);
        stats
    }

    /// Fresh stats for a new game (high score kept)
    pub fn reset(&mut self, settings: &Settings) {
        self.lives_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }

    /// Raise the high score if beaten; returns true if it changed
    pub fn check_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub stats: GameStats,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub formation: Formation,
    /// Frames simulated or waited since startup
    pub time_ticks: u64,
    /// Simulation is suspended until this tick (life-loss pause)
    pub resume_at: Option<u64>,
    /// Pending side effects, drained by the orchestrator
    pub events: Vec<GameEvent>,
    next_projectile_id: u32,
}

impl GameState {
    /// Create an idle session with a fleet already on screen
    pub fn new(settings: Settings) -> Self {
        let screen = settings.screen_size();
        let ship = Ship::new(settings.ship_size, screen);
        let mut formation = Formation::new();
        formation.build(&ship.rect, settings.invader_size, screen);

        Self {
            stats: GameStats::new(&settings),
            settings,
            ship,
            projectiles: Vec::new(),
            formation,
            time_ticks: 0,
            resume_at: None,
            events: Vec::new(),
            next_projectile_id: 1,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.stats.active {
            GamePhase::Active
        } else {
            GamePhase::Idle
        }
    }

    /// Waiting out the life-loss pause
    pub fn is_suspended(&self) -> bool {
        self.resume_at.is_some_and(|t| self.time_ticks < t)
    }

    /// IDLE -> ACTIVE. No-op while a game is running.
    pub fn start_game(&mut self) -> bool {
        if self.stats.active {
            return false;
        }

        self.settings.reset_dynamic();
        self.stats.reset(&self.settings);
        self.stats.active = true;
        self.resume_at = None;

        self.projectiles.clear();
        self.rebuild_field();

        log::info!("Game started with {} lives", self.stats.lives_left);
        self.events.push(GameEvent::GameStarted);
        self.events.push(GameEvent::ScoreChanged(self.stats.score));
        self.events.push(GameEvent::CursorVisible(false));
        true
    }

    /// Spawn a projectile unless the live-count cap is reached
    pub fn fire(&mut self) -> bool {
        if !self.stats.active || self.projectiles.len() >= self.settings.projectiles_allowed {
            return false;
        }

        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        let size = glam::Vec2::new(self.settings.projectile_width, self.settings.projectile_height);
        self.projectiles.push(Projectile::fire_from(
            id,
            &self.ship,
            size,
            self.settings.dynamic.projectile_speed,
        ));
        log::debug!("Fired projectile {} ({} live)", id, self.projectiles.len());
        true
    }

    /// Feed one frame's collision results through the state machine
    pub fn resolve_collisions(&mut self, report: &CollisionReport) {
        if !self.stats.active {
            return;
        }

        if !report.hits.is_empty() {
            self.award_hits(report);
        }

        if self.formation.is_empty() {
            self.level_cleared();
        }

        if report.life_lost() {
            self.ship_hit();
        }
    }

    /// Score every invader destroyed this frame
    fn award_hits(&mut self, report: &CollisionReport) {
        let points = self.settings.dynamic.invader_points;
        for hit in &report.hits {
            let earned = points.saturating_mul(hit.invaders.len() as u64);
            self.stats.score = self.stats.score.saturating_add(earned);
        }
        self.events.push(GameEvent::ScoreChanged(self.stats.score));
        if self.stats.check_high_score() {
            self.events.push(GameEvent::HighScoreChanged(self.stats.high_score));
        }
    }

    /// Fleet destroyed: new fleet, faster game, next level
    fn level_cleared(&mut self) {
        self.projectiles.clear();
        let screen = self.settings.screen_size();
        self.formation
            .build(&self.ship.rect, self.settings.invader_size, screen);
        self.settings.increase_speed();
        self.stats.level = self.stats.level.saturating_add(1);

        log::info!(
            "Level cleared, now level {} (speed x{:.2})",
            self.stats.level,
            self.settings.dynamic.speed_multiplier
        );
        self.events.push(GameEvent::LevelCleared {
            level: self.stats.level,
        });
    }

    /// Ship struck or fleet landed: lose a life, or end the game on the last one
    pub fn ship_hit(&mut self) {
        if !self.stats.active {
            return;
        }

        self.stats.lives_left = self.stats.lives_left.saturating_sub(1);

        if self.stats.lives_left > 0 {
            self.projectiles.clear();
            self.rebuild_field();
            self.resume_at = Some(self.time_ticks + LIFE_LOST_PAUSE_TICKS);

            log::info!("Life lost, {} remaining", self.stats.lives_left);
            self.events.push(GameEvent::LifeLost {
                lives_left: self.stats.lives_left,
            });
        } else {
            self.stats.active = false;
            self.resume_at = None;
            self.ship.moving_left = false;
            self.ship.moving_right = false;

            log::info!(
                "Game over at level {} with score {}",
                self.stats.level,
                self.stats.score
            );
            self.events.push(GameEvent::LifeLost { lives_left: 0 });
            self.events.push(GameEvent::GameOver {
                score: self.stats.score,
            });
            self.events.push(GameEvent::CursorVisible(true));
        }
    }

    /// New fleet and a re-centred ship
    fn rebuild_field(&mut self) {
        let screen = self.settings.screen_size();
        self.formation
            .build(&self.ship.rect, self.settings.invader_size, screen);
        self.ship.center(screen);
    }

    /// Take the queued side effects
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::ProjectileHit;
    use crate::sim::entity::Invader;
    use glam::Vec2;

    fn small_settings() -> Settings {
        Settings::from_json(
            r#"{ "screen_width": 800, "screen_height": 600,
                 "invader_size": [40, 25], "ship_size": [60, 50] }"#,
        )
        .unwrap()
    }

    fn fake_hit(n: usize) -> ProjectileHit {
        let ship = Ship::new(Vec2::new(60.0, 50.0), Vec2::new(800.0, 600.0));
        ProjectileHit {
            projectile: Projectile::fire_from(99, &ship, Vec2::new(3.0, 15.0), 1.5),
            invaders: (0..n)
                .map(|i| Invader::new(1000 + i as u32, Vec2::ZERO, Vec2::new(40.0, 25.0)))
                .collect(),
        }
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(small_settings());
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.stats.lives_left, 3);
        assert_eq!(state.formation.len(), 81);
    }

    #[test]
    fn test_start_game() {
        let mut state = GameState::new(small_settings());
        state.settings.increase_speed();
        state.stats.score = 500;
        state.stats.level = 4;
        state.formation.clear();

        assert!(state.start_game());
        assert_eq!(state.phase(), GamePhase::Active);
        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.level, 1);
        assert_eq!(state.settings.dynamic.speed_multiplier, 1.0);
        assert_eq!(state.formation.len(), 81);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameStarted));
        assert!(events.contains(&GameEvent::CursorVisible(false)));
    }

    #[test]
    fn test_start_while_active_is_noop() {
        let mut state = GameState::new(small_settings());
        state.start_game();
        state.stats.score = 250;
        state.drain_events();

        assert!(!state.start_game());
        assert_eq!(state.stats.score, 250);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_fire_respects_cap() {
        let mut state = GameState::new(small_settings());
        assert!(!state.fire(), "cannot fire while idle");

        state.start_game();
        assert!(state.fire());
        assert!(state.fire());
        assert!(state.fire());
        assert!(!state.fire());
        assert_eq!(state.projectiles.len(), 3);
    }

    #[test]
    fn test_score_counts_every_invader() {
        let mut state = GameState::new(small_settings());
        state.start_game();
        state.drain_events();

        let report = CollisionReport {
            hits: vec![fake_hit(2), fake_hit(1)],
            ..Default::default()
        };
        state.resolve_collisions(&report);

        assert_eq!(state.stats.score, 150);
        assert_eq!(state.stats.high_score, 150);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(150)));
        assert!(events.contains(&GameEvent::HighScoreChanged(150)));
    }

    #[test]
    fn test_level_clear() {
        let mut state = GameState::new(small_settings());
        state.start_game();
        state.fire();
        state.formation.clear();

        state.resolve_collisions(&CollisionReport::default());

        assert_eq!(state.stats.level, 2);
        assert_eq!(state.formation.len(), 81);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.settings.dynamic.invader_points, 75);
        assert!(state.drain_events().contains(&GameEvent::LevelCleared { level: 2 }));
    }

    #[test]
    fn test_score_saturates_over_many_levels() {
        let mut state = GameState::new(small_settings());
        state.start_game();

        let mut last = 0;
        for _ in 0..200 {
            state.resolve_collisions(&CollisionReport {
                hits: vec![fake_hit(2)],
                ..Default::default()
            });
            assert!(state.stats.score >= last);
            last = state.stats.score;

            state.formation.clear();
            state.resolve_collisions(&CollisionReport::default());
        }

        assert_eq!(state.settings.dynamic.invader_points, u64::MAX);
        assert_eq!(state.stats.score, u64::MAX);
        assert_eq!(state.stats.high_score, u64::MAX);
        assert_eq!(state.stats.level, 201);
    }

    #[test]
    fn test_life_lost_with_lives_remaining() {
        let mut state = GameState::new(small_settings());
        state.start_game();
        state.fire();
        state.ship.rect.pos.x = 10.0;
        state.formation.invaders.truncate(5);

        state.ship_hit();

        assert_eq!(state.stats.lives_left, 2);
        assert!(state.stats.active);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.formation.len(), 81);
        assert_eq!(state.ship.rect.center().x, 400.0);
        assert!(state.is_suspended());
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = GameState::new(small_settings());
        state.start_game();
        state.stats.lives_left = 1;
        state.stats.score = 300;
        state.drain_events();

        state.ship_hit();

        assert_eq!(state.stats.lives_left, 0);
        assert!(!state.stats.active);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert!(!state.is_suspended());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 300 }));
        assert!(events.contains(&GameEvent::CursorVisible(true)));

        // Further hits change nothing
        state.ship_hit();
        assert_eq!(state.stats.lives_left, 0);
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut state = GameState::new(small_settings());
        state.start_game();
        state.resolve_collisions(&CollisionReport {
            hits: vec![fake_hit(4)],
            ..Default::default()
        });
        state.stats.lives_left = 1;
        state.ship_hit();

        state.start_game();
        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.high_score, 200);
    }
}
