//! Alien Invasion headless runner
//!
//! Plays the game with an autopilot against the in-memory platform and logs
//! how it went. Usage: `alien-invasion [settings.json] [seed]`.
//! Set `RUST_LOG=debug` to see every hit.

use alien_invasion::platform::InputEvent;
use alien_invasion::platform::headless::{CursorFlag, RecordingSurface, ScriptedInput};
use alien_invasion::sim::GameState;
use alien_invasion::{FrameOutcome, Game, Settings};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Give up after this many frames (10 minutes at 60 Hz)
const MAX_FRAMES: u64 = 60 * 60 * 10;

/// Dead zone around the target column, in pixels
const AIM_TOLERANCE: f32 = 4.0;

/// Scripted player: clicks Play, chases the lowest invader and fires
struct Autopilot {
    rng: Pcg32,
    holding_left: bool,
    holding_right: bool,
    started: bool,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            holding_left: false,
            holding_right: false,
            started: false,
        }
    }

    /// Decide this frame's input from what is on screen
    fn plan(&mut self, game: &Game) -> Vec<InputEvent> {
        let state = game.state();
        let mut events = Vec::new();

        if !state.stats.active {
            if !self.started {
                self.started = true;
                events.push(InputEvent::Click(game.play_button().rect.center()));
            }
            return events;
        }

        let target_x = self.target_column(state);
        let ship_x = state.ship.rect.center().x;
        let want_right = target_x > ship_x + AIM_TOLERANCE;
        let want_left = target_x < ship_x - AIM_TOLERANCE;

        if want_left != self.holding_left {
            self.holding_left = want_left;
            events.push(InputEvent::MoveLeft { pressed: want_left });
        }
        if want_right != self.holding_right {
            self.holding_right = want_right;
            events.push(InputEvent::MoveRight { pressed: want_right });
        }

        if !want_left && !want_right && self.rng.random_bool(0.25) {
            events.push(InputEvent::Fire);
        }
        events
    }

    /// Column of the invader closest to the ship, with a little jitter
    fn target_column(&mut self, state: &GameState) -> f32 {
        let lowest = state
            .formation
            .invaders
            .iter()
            .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

        match lowest {
            Some(invader) => invader.rect.center().x + self.rng.random_range(-10.0..10.0),
            None => state.ship.rect.center().x,
        }
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Using default settings: {}", e);
            Settings::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Alien Invasion (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let settings = load_settings(args.get(1).map(String::as_str));
    let seed = args
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x1A11E);
    log::info!(
        "Screen {}x{}, seed {}",
        settings.screen_width,
        settings.screen_height,
        seed
    );

    let mut game = Game::new(settings);
    let mut autopilot = Autopilot::new(seed);
    let mut input = ScriptedInput::new();
    let mut surface = RecordingSurface::new();
    let mut cursor = CursorFlag::default();

    let mut frames = 0;
    while frames < MAX_FRAMES {
        input.push_frame(autopilot.plan(&game));
        if game.frame(&mut input, &mut surface, &mut cursor) == FrameOutcome::Quit {
            break;
        }
        frames += 1;

        if autopilot.started && !game.state().stats.active {
            log::info!("Game over after {} frames", frames);
            break;
        }
    }

    let stats = &game.state().stats;
    log::info!(
        "Final score {} (high {}), level {}, lives left {}",
        stats.score,
        stats.high_score,
        stats.level,
        stats.lives_left
    );
    println!(
        "score={} high_score={} level={} frames={}",
        stats.score, stats.high_score, stats.level, frames
    );
}
