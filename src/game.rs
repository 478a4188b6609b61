//! Frame orchestration
//!
//! One call to `Game::frame` is one tick of the main loop:
//! poll input -> simulate (when active) -> apply side effects -> render.
//! Rendering always happens so the idle screen stays visible.

use crate::platform::{CursorControl, InputEvent, InputSource, RenderSurface, Sprite};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, TickOutcome, tick};
use crate::ui::{Button, Scoreboard};

/// Whether the main loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// A game session plus its HUD
pub struct Game {
    state: GameState,
    scoreboard: Scoreboard,
    play_button: Button,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let play_button = Button::new(settings.screen_size(), "Play");
        let state = GameState::new(settings);
        let scoreboard = Scoreboard::new(&state.settings, &state.stats);
        Self {
            state,
            scoreboard,
            play_button,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn play_button(&self) -> &Button {
        &self.play_button
    }

    /// Run one frame
    pub fn frame(
        &mut self,
        input: &mut impl InputSource,
        surface: &mut impl RenderSurface,
        cursor: &mut impl CursorControl,
    ) -> FrameOutcome {
        let Some(tick_input) = self.gather_input(input.poll()) else {
            log::info!("Quit requested");
            return FrameOutcome::Quit;
        };

        if let TickOutcome::Simulated(report) = tick(&mut self.state, &tick_input) {
            if report.life_lost() {
                log::debug!(
                    "Life lost (ship hit: {}, reached bottom: {})",
                    report.ship_hit,
                    report.reached_bottom
                );
            }
        }

        for event in self.state.drain_events() {
            self.scoreboard.apply(&event, &self.state.stats);
            if let GameEvent::CursorVisible(visible) = event {
                cursor.set_visible(visible);
            }
        }

        self.render(surface);
        FrameOutcome::Continue
    }

    /// Map raw events to this frame's commands; `None` means quit
    fn gather_input(&self, events: Vec<InputEvent>) -> Option<TickInput> {
        let mut input = TickInput::default();
        for event in events {
            match event {
                InputEvent::MoveLeft { pressed } => input.moving_left = Some(pressed),
                InputEvent::MoveRight { pressed } => input.moving_right = Some(pressed),
                InputEvent::Fire => input.fire += 1,
                InputEvent::Click(pos) => {
                    if !self.state.stats.active && self.play_button.contains(pos) {
                        input.start = true;
                    }
                }
                InputEvent::Quit => return None,
                InputEvent::Other => {}
            }
        }
        Some(input)
    }

    fn render(&self, surface: &mut impl RenderSurface) {
        let settings = &self.state.settings;
        surface.clear(settings.bg_color);

        surface.draw_sprite(Sprite::Ship, &self.state.ship.rect);
        for projectile in &self.state.projectiles {
            surface.fill_rect(&projectile.rect, settings.projectile_color);
        }
        for invader in &self.state.formation.invaders {
            surface.draw_sprite(Sprite::Invader, &invader.rect);
        }

        for label in self.scoreboard.labels() {
            surface.draw_text(label);
        }
        for icon in &self.scoreboard.ships {
            surface.draw_sprite(Sprite::Ship, icon);
        }

        if !self.state.stats.active {
            surface.draw_button(&self.play_button);
        }

        surface.present();
    }
}
