//! The hub's top-level loop: menu, transition, game, back to the menu

use crate::context::HubContext;
use crate::error::{HubError, HubResult};
use crate::games::GameKind;
use crate::gui::{GameMenu, MenuBackground, TransitionEnd, TransitionScreen};
use crate::session::{SessionOutcome, SessionResult};
use chrono::{DateTime, Local};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sdl2::keyboard::Keycode;
use tracing::{debug, info};

/// How the last session went, shown under the menu
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub game: GameKind,
    pub result: SessionResult,
    pub score: u64,
    pub finished_at: DateTime<Local>,
}

impl SessionReport {
    pub fn new(game: GameKind, outcome: SessionOutcome) -> Self {
        Self::at(game, outcome, Local::now())
    }

    pub fn at(game: GameKind, outcome: SessionOutcome, finished_at: DateTime<Local>) -> Self {
        SessionReport {
            game,
            result: outcome.result,
            score: outcome.score,
            finished_at,
        }
    }

    /// One-line footer text
    pub fn summary(&self) -> String {
        format!(
            "Last: {} {} score {} at {}",
            self.game,
            self.result,
            self.score,
            self.finished_at.format("%H:%M:%S")
        )
    }
}

pub struct Launcher {
    menu: GameMenu,
    background: MenuBackground,
    last_report: Option<SessionReport>,
}

impl Launcher {
    pub fn new() -> Self {
        Launcher {
            menu: GameMenu::new(GameKind::ALL.to_vec()),
            background: MenuBackground::new(StdRng::seed_from_u64(rand::random())),
            last_report: None,
        }
    }

    pub fn last_report(&self) -> Option<&SessionReport> {
        self.last_report.as_ref()
    }

    /// Run the menu until the window is closed
    pub fn run(&mut self, ctx: &mut HubContext) -> HubResult<()> {
        loop {
            let input = ctx.poll_input();
            if input.quit_requested() {
                info!("quit from menu");
                return Ok(());
            }

            for key in input.keys_pressed() {
                match key {
                    Keycode::Up => {
                        self.menu.select_previous();
                        debug!(selected = self.menu.selected_index(), "menu up");
                    }
                    Keycode::Down => {
                        self.menu.select_next();
                        debug!(selected = self.menu.selected_index(), "menu down");
                    }
                    Keycode::Return => {
                        if let Some(game) = self.menu.confirm() {
                            if self.play(ctx, game)?.is_quit() {
                                return Ok(());
                            }
                            // Keys queued before the game started are stale now
                            break;
                        }
                    }
                    _ => {}
                }
            }

            self.background.step();
            self.draw(ctx).map_err(HubError::Render)?;
            ctx.present_and_tick(60);
        }
    }

    fn draw(&self, ctx: &mut HubContext) -> Result<(), String> {
        let now = ctx.elapsed_ms();
        self.background.render(&mut ctx.canvas, now)?;
        let footer = self.last_report().map(SessionReport::summary);
        self.menu.render(&mut ctx.canvas, footer.as_deref())
    }

    /// Transition into `game`, run it and record the outcome
    fn play(&mut self, ctx: &mut HubContext, game: GameKind) -> HubResult<SessionResult> {
        let transition = TransitionScreen::new(format!("Loading {}", game.name()), ctx.config.transition_ms);
        if transition.play(ctx)? == TransitionEnd::Quit {
            return Ok(SessionResult::Quit);
        }

        info!(game = %game, "session started");
        let outcome = game.launch(ctx)?;
        let report = SessionReport::new(game, outcome);
        info!(
            game = %game,
            result = %outcome.result,
            score = outcome.score,
            finished_at = %report.finished_at.to_rfc3339(),
            "session ended"
        );

        self.last_report = Some(report);
        Ok(outcome.result)
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}
