//! Mini-game sessions and the shared frame loop
//!
//! Every game implements [`Session`]: a pure `update` step driven by an
//! [`InputSnapshot`] and a `render` step that draws the current state.
//! [`run_session`] owns the loop around them, so the ordering
//! input → update → collision → render → clock wait lives in one place.

use crate::context::{FIELD_HEIGHT, FIELD_WIDTH, HubContext};
use crate::error::{HubError, HubResult};
use crate::input_system::InputSnapshot;
use crate::render::dim_overlay;
use crate::text::{draw_text, draw_text_centered};
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::fmt;

/// How long an outcome banner stays on screen
pub const BANNER_MS: u64 = 3000;

/// Terminal state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionResult {
    Lost,
    Won,
    /// The window was closed; the whole hub shuts down
    Quit,
    /// Escape pressed; back to the menu
    Back,
}

impl SessionResult {
    /// True if the process should exit
    pub fn is_quit(self) -> bool {
        self == SessionResult::Quit
    }
}

impl fmt::Display for SessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionResult::Lost => "LOST",
            SessionResult::Won => "WON",
            SessionResult::Quit => "QUIT",
            SessionResult::Back => "LEFT",
        };
        f.write_str(label)
    }
}

/// What a finished session hands back to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub result: SessionResult,
    pub score: u64,
}

impl SessionOutcome {
    /// Outcome for a session that ended before it started
    pub fn unplayed(result: SessionResult) -> Self {
        SessionOutcome { result, score: 0 }
    }
}

/// Message shown over the final frame before returning to the menu
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub color: Color,
}

/// One mini-game
pub trait Session {
    /// Ticks per second this game runs at
    fn tick_rate(&self) -> u32 {
        60
    }

    /// Advance one tick. Returns `Some` once a terminal rule fires.
    ///
    /// `now_ms` is the hub's frame clock, for games that time things in
    /// milliseconds rather than ticks.
    fn update(&mut self, input: &InputSnapshot, now_ms: u64) -> Option<SessionResult>;

    /// Draw the full frame, background included
    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String>;

    fn score(&self) -> u64;

    /// Optional banner for a terminal result
    fn banner(&self, _result: SessionResult) -> Option<Banner> {
        None
    }
}

/// One tick's decision: quit first, then Escape, then the game's own rules
///
/// A quit in the same tick as a terminal game event still yields `Quit`.
pub fn step<S: Session>(session: &mut S, input: &InputSnapshot, now_ms: u64) -> Option<SessionResult> {
    if input.quit_requested() {
        return Some(SessionResult::Quit);
    }
    if input.key_pressed(Keycode::Escape) {
        return Some(SessionResult::Back);
    }
    session.update(input, now_ms)
}

/// Drive `session` until it reaches a terminal state
pub fn run_session<S: Session>(ctx: &mut HubContext, session: &mut S) -> HubResult<SessionOutcome> {
    loop {
        let input = ctx.poll_input();
        let now = ctx.elapsed_ms();

        if let Some(mut result) = step(session, &input, now) {
            if let Some(banner) = session.banner(result) {
                if !show_banner(ctx, session, &banner)? {
                    result = SessionResult::Quit;
                }
            }
            return Ok(SessionOutcome {
                result,
                score: session.score(),
            });
        }

        session.render(&mut ctx.canvas).map_err(HubError::Render)?;
        if ctx.config.show_fps {
            let fps = format!("{} FPS", ctx.measured_fps());
            draw_text(&mut ctx.canvas, &fps, FIELD_WIDTH as i32 - 90, 10, Color::RGB(255, 255, 0), 2)
                .map_err(HubError::Render)?;
        }
        ctx.present_and_tick(session.tick_rate());
    }
}

/// Hold `banner` over the final frame for [`BANNER_MS`]
///
/// Returns `false` if the window was closed meanwhile.
fn show_banner<S: Session>(ctx: &mut HubContext, session: &S, banner: &Banner) -> HubResult<bool> {
    let start = ctx.elapsed_ms();

    while ctx.elapsed_ms() - start < BANNER_MS {
        if ctx.poll_input().quit_requested() {
            return Ok(false);
        }

        session.render(&mut ctx.canvas).map_err(HubError::Render)?;
        dim_overlay(&mut ctx.canvas, 120).map_err(HubError::Render)?;
        draw_text_centered(
            &mut ctx.canvas,
            &banner.text,
            FIELD_WIDTH as i32 / 2,
            FIELD_HEIGHT as i32 / 2 - 21,
            banner.color,
            6,
        )
        .map_err(HubError::Render)?;
        ctx.present_and_tick(60);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::SnakeSession;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_only_quit_exits() {
        assert!(SessionResult::Quit.is_quit());
        assert!(!SessionResult::Lost.is_quit());
        assert!(!SessionResult::Won.is_quit());
        assert!(!SessionResult::Back.is_quit());
    }

    #[test]
    fn test_result_labels() {
        assert_eq!(SessionResult::Lost.to_string(), "LOST");
        assert_eq!(SessionResult::Won.to_string(), "WON");
        assert_eq!(SessionResult::Back.to_string(), "LEFT");
    }

    /// Counts updates and loses on the first one when `doomed`
    struct Scripted {
        updates: u32,
        doomed: bool,
    }

    impl Session for Scripted {
        fn update(&mut self, _input: &InputSnapshot, _now_ms: u64) -> Option<SessionResult> {
            self.updates += 1;
            self.doomed.then_some(SessionResult::Lost)
        }

        fn render(&self, _canvas: &mut Canvas<Window>) -> Result<(), String> {
            Ok(())
        }

        fn score(&self) -> u64 {
            u64::from(self.updates)
        }
    }

    #[test]
    fn test_step_runs_update_without_control_input() {
        let mut session = Scripted { updates: 0, doomed: false };
        assert_eq!(step(&mut session, &InputSnapshot::default(), 0), None);
        assert_eq!(step(&mut session, &InputSnapshot::default(), 16), None);
        assert_eq!(session.updates, 2);
    }

    #[test]
    fn test_step_quit_skips_update() {
        let mut session = Scripted { updates: 0, doomed: false };
        let input = InputSnapshot::default().with_quit();
        assert_eq!(step(&mut session, &input, 0), Some(SessionResult::Quit));
        assert_eq!(session.updates, 0);
    }

    #[test]
    fn test_step_escape_goes_back() {
        let mut session = Scripted { updates: 0, doomed: true };
        let input = InputSnapshot::default().with_key_down(Keycode::Escape);
        assert_eq!(step(&mut session, &input, 0), Some(SessionResult::Back));
        assert_eq!(session.updates, 0);
    }

    #[test]
    fn test_step_quit_beats_escape() {
        let mut session = Scripted { updates: 0, doomed: false };
        let input = InputSnapshot::default()
            .with_key_down(Keycode::Escape)
            .with_quit();
        assert_eq!(step(&mut session, &input, 0), Some(SessionResult::Quit));
    }

    #[test]
    fn test_step_quit_wins_over_collision_in_same_tick() {
        let mut snake = SnakeSession::new(StdRng::seed_from_u64(3));
        // Heading right from the middle; the 20th move leaves the field
        for _ in 0..19 {
            assert_eq!(step(&mut snake, &InputSnapshot::default(), 0), None);
        }

        let quit = InputSnapshot::default().with_quit();
        assert_eq!(step(&mut snake, &quit, 0), Some(SessionResult::Quit));
        assert_eq!(step(&mut snake, &InputSnapshot::default(), 0), Some(SessionResult::Lost));
    }

    #[test]
    fn test_step_reports_game_result() {
        let mut session = Scripted { updates: 0, doomed: true };
        assert_eq!(step(&mut session, &InputSnapshot::default(), 0), Some(SessionResult::Lost));
        assert_eq!(session.updates, 1);
    }

    #[test]
    fn test_unplayed_outcome_has_no_score() {
        let outcome = SessionOutcome::unplayed(SessionResult::Back);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.result, SessionResult::Back);
    }
}
