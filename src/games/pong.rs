//! Pong against a second player or a computer paddle
//!
//! Before the match a two-step set-up screen picks the mode and, for
//! single player, the computer's difficulty. The result is a
//! [`PongConfig`] value the session is built from.

use crate::collision::{aabb_intersect, step_vertical};
use crate::context::{FIELD_HEIGHT, FIELD_WIDTH, HubContext};
use crate::error::{HubError, HubResult};
use crate::input_system::InputSnapshot;
use crate::render::{clear, fill_ellipse, fill_rect};
use crate::session::{Banner, Session, SessionResult};
use crate::text::{draw_text, draw_text_centered};
use rand::Rng;
use rand::rngs::StdRng;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::debug;

const PADDLE_WIDTH: u32 = 10;
const PADDLE_HEIGHT: u32 = 100;
const PADDLE_SPEED: i32 = 6;
const BALL_SIZE: u32 = 20;
const SERVE_SPEED: f32 = 5.0;
/// Velocity multiplier applied on every paddle hit
const SPEED_UP: f32 = 1.1;
/// Per-axis speed limit, kept under paddle width plus ball size
const MAX_BALL_SPEED: f32 = 24.0;

const WHITE: Color = Color::RGB(255, 255, 255);
const BLACK: Color = Color::RGB(0, 0, 0);

/// Computer paddle strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    /// Pixels per tick the computer paddle moves toward the ball
    pub fn ai_speed(self) -> i32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 5,
            Difficulty::Hard => 7,
            Difficulty::Impossible => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Impossible => "Impossible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongMode {
    SinglePlayer(Difficulty),
    TwoPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PongConfig {
    pub mode: PongMode,
    pub win_score: u32,
}

/// Result of feeding one key to the set-up screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Stay,
    Play(PongMode),
    Leave,
}

/// Mode menu, then (single player only) difficulty menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongSetup {
    ChoosingMode,
    ChoosingDifficulty,
}

impl PongSetup {
    pub fn new() -> Self {
        PongSetup::ChoosingMode
    }

    pub fn handle_key(&mut self, key: Keycode) -> SetupStep {
        match (*self, key) {
            (PongSetup::ChoosingMode, Keycode::Num1) => {
                *self = PongSetup::ChoosingDifficulty;
                SetupStep::Stay
            }
            (PongSetup::ChoosingMode, Keycode::Num2) => SetupStep::Play(PongMode::TwoPlayer),
            (PongSetup::ChoosingMode, Keycode::Escape) => SetupStep::Leave,
            (PongSetup::ChoosingDifficulty, Keycode::Escape) => {
                *self = PongSetup::ChoosingMode;
                SetupStep::Stay
            }
            (PongSetup::ChoosingDifficulty, key) => {
                let pick = match key {
                    Keycode::Num1 => Some(Difficulty::Easy),
                    Keycode::Num2 => Some(Difficulty::Medium),
                    Keycode::Num3 => Some(Difficulty::Hard),
                    Keycode::Num4 => Some(Difficulty::Impossible),
                    _ => None,
                };
                pick.map_or(SetupStep::Stay, |d| SetupStep::Play(PongMode::SinglePlayer(d)))
            }
            _ => SetupStep::Stay,
        }
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, BLACK);
        let center_x = FIELD_WIDTH as i32 / 2;
        let height = FIELD_HEIGHT as i32;

        match self {
            PongSetup::ChoosingMode => {
                draw_text_centered(canvas, "PONG", center_x, height / 3 - 28, WHITE, 8)?;
                draw_text_centered(canvas, "1. Single Player", center_x, height / 2, WHITE, 4)?;
                draw_text_centered(canvas, "2. Two Player", center_x, height / 2 + 60, WHITE, 4)?;
            }
            PongSetup::ChoosingDifficulty => {
                draw_text_centered(canvas, "Select AI Difficulty", center_x, height / 4, WHITE, 5)?;
                for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
                    let label = format!("{}. {}", i + 1, difficulty.name());
                    draw_text_centered(canvas, &label, center_x, height / 2 + i as i32 * 50 - 40, WHITE, 4)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for PongSetup {
    fn default() -> Self {
        Self::new()
    }
}

/// What the set-up screen produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupChoice {
    Play(PongConfig),
    Exit(SessionResult),
}

/// Run the set-up screens until a mode is chosen or the player leaves
pub fn choose_config(ctx: &mut HubContext) -> HubResult<SetupChoice> {
    let mut setup = PongSetup::new();

    loop {
        let input = ctx.poll_input();
        if input.quit_requested() {
            return Ok(SetupChoice::Exit(SessionResult::Quit));
        }

        for key in input.keys_pressed() {
            match setup.handle_key(key) {
                SetupStep::Stay => {}
                SetupStep::Play(mode) => {
                    let config = PongConfig {
                        mode,
                        win_score: ctx.config.pong_win_score,
                    };
                    debug!(?config, "pong configured");
                    return Ok(SetupChoice::Play(config));
                }
                SetupStep::Leave => return Ok(SetupChoice::Exit(SessionResult::Back)),
            }
        }

        setup.render(&mut ctx.canvas).map_err(HubError::Render)?;
        ctx.present_and_tick(60);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

pub struct PongSession {
    config: PongConfig,
    left: Rect,
    right: Rect,
    /// Ball top-left corner; kept fractional so speed-ups accumulate
    ball: (f32, f32),
    velocity: (f32, f32),
    /// Left score, right score
    scores: (u32, u32),
    winner: Option<Side>,
    rng: StdRng,
}

impl PongSession {
    pub fn new(config: PongConfig, mut rng: StdRng) -> Self {
        let paddle_y = FIELD_HEIGHT as i32 / 2 - PADDLE_HEIGHT as i32 / 2;
        let velocity = Self::serve_velocity(&mut rng);

        PongSession {
            config,
            left: Rect::new(10, paddle_y, PADDLE_WIDTH, PADDLE_HEIGHT),
            right: Rect::new(FIELD_WIDTH as i32 - 20, paddle_y, PADDLE_WIDTH, PADDLE_HEIGHT),
            ball: Self::center_ball(),
            velocity,
            scores: (0, 0),
            winner: None,
            rng,
        }
    }

    fn center_ball() -> (f32, f32) {
        let half = BALL_SIZE as f32 / 2.0;
        (FIELD_WIDTH as f32 / 2.0 - half, FIELD_HEIGHT as f32 / 2.0 - half)
    }

    fn serve_velocity(rng: &mut StdRng) -> (f32, f32) {
        let mut component = || if rng.random_bool(0.5) { SERVE_SPEED } else { -SERVE_SPEED };
        (component(), component())
    }

    fn ball_rect(&self) -> Rect {
        Rect::new(self.ball.0 as i32, self.ball.1 as i32, BALL_SIZE, BALL_SIZE)
    }

    fn reset_ball(&mut self) {
        self.ball = Self::center_ball();
        self.velocity = Self::serve_velocity(&mut self.rng);
    }

    fn move_paddles(&mut self, input: &InputSnapshot) {
        let dy = input.axis(Keycode::W, Keycode::S) * PADDLE_SPEED;
        step_vertical(&mut self.left, dy, FIELD_HEIGHT as i32);

        match self.config.mode {
            PongMode::SinglePlayer(difficulty) => {
                let ball_center = self.ball_rect().center().y();
                let paddle_center = self.right.center().y();
                let speed = difficulty.ai_speed();
                if ball_center > paddle_center {
                    step_vertical(&mut self.right, speed, FIELD_HEIGHT as i32);
                } else if ball_center < paddle_center {
                    step_vertical(&mut self.right, -speed, FIELD_HEIGHT as i32);
                }
            }
            PongMode::TwoPlayer => {
                let dy = input.axis(Keycode::Up, Keycode::Down) * PADDLE_SPEED;
                step_vertical(&mut self.right, dy, FIELD_HEIGHT as i32);
            }
        }
    }

    fn collide(&mut self) {
        let ball = self.ball_rect();

        if ball.top() <= 0 {
            self.velocity.1 = self.velocity.1.abs();
        } else if ball.bottom() >= FIELD_HEIGHT as i32 {
            self.velocity.1 = -self.velocity.1.abs();
        }

        // Only a paddle the ball is heading toward can return it
        let hits_left = self.velocity.0 < 0.0 && aabb_intersect(&ball, &self.left);
        let hits_right = self.velocity.0 > 0.0 && aabb_intersect(&ball, &self.right);
        if hits_left || hits_right {
            self.velocity.0 = (self.velocity.0 * -SPEED_UP).clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);
            self.velocity.1 = (self.velocity.1 * SPEED_UP).clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);
        }

        if ball.left() <= 0 {
            self.scores.1 += 1;
            self.reset_ball();
        } else if ball.right() >= FIELD_WIDTH as i32 {
            self.scores.0 += 1;
            self.reset_ball();
        }
    }

    fn winner_text(&self, side: Side) -> &'static str {
        match (side, self.config.mode) {
            (Side::Left, _) => "Player 1 Wins!",
            (Side::Right, PongMode::SinglePlayer(_)) => "Computer Wins!",
            (Side::Right, PongMode::TwoPlayer) => "Player 2 Wins!",
        }
    }
}

impl Session for PongSession {
    fn update(&mut self, input: &InputSnapshot, _now_ms: u64) -> Option<SessionResult> {
        self.ball.0 += self.velocity.0;
        self.ball.1 += self.velocity.1;

        self.move_paddles(input);
        self.collide();

        let win = self.config.win_score;
        self.winner = if self.scores.0 >= win {
            Some(Side::Left)
        } else if self.scores.1 >= win {
            Some(Side::Right)
        } else {
            None
        };

        match (self.winner?, self.config.mode) {
            (Side::Right, PongMode::SinglePlayer(_)) => Some(SessionResult::Lost),
            _ => Some(SessionResult::Won),
        }
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, BLACK);

        fill_rect(canvas, self.left, WHITE)?;
        fill_rect(canvas, self.right, WHITE)?;
        fill_ellipse(canvas, self.ball_rect(), WHITE)?;

        let mid = FIELD_WIDTH as i32 / 2;
        canvas.set_draw_color(WHITE);
        canvas.draw_line(Point::new(mid, 0), Point::new(mid, FIELD_HEIGHT as i32))?;

        draw_text(canvas, &self.scores.0.to_string(), mid - 50, 20, WHITE, 4)?;
        draw_text(canvas, &self.scores.1.to_string(), mid + 30, 20, WHITE, 4)
    }

    fn score(&self) -> u64 {
        u64::from(self.scores.0)
    }

    fn banner(&self, _result: SessionResult) -> Option<Banner> {
        self.winner.map(|side| Banner {
            text: self.winner_text(side).to_string(),
            color: WHITE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session(mode: PongMode) -> PongSession {
        let config = PongConfig { mode, win_score: 10 };
        PongSession::new(config, StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_setup_single_player_flow() {
        let mut setup = PongSetup::new();
        assert_eq!(setup.handle_key(Keycode::Num1), SetupStep::Stay);
        assert_eq!(setup, PongSetup::ChoosingDifficulty);
        assert_eq!(setup.handle_key(Keycode::Num9), SetupStep::Stay);
        assert_eq!(
            setup.handle_key(Keycode::Num3),
            SetupStep::Play(PongMode::SinglePlayer(Difficulty::Hard))
        );
    }

    #[test]
    fn test_setup_two_player_and_leave() {
        let mut setup = PongSetup::new();
        assert_eq!(setup.handle_key(Keycode::Num2), SetupStep::Play(PongMode::TwoPlayer));

        let mut setup = PongSetup::new();
        setup.handle_key(Keycode::Num1);
        assert_eq!(setup.handle_key(Keycode::Escape), SetupStep::Stay);
        assert_eq!(setup.handle_key(Keycode::Escape), SetupStep::Leave);
    }

    #[test]
    fn test_difficulty_speeds() {
        let speeds: Vec<i32> = Difficulty::ALL.iter().map(|d| d.ai_speed()).collect();
        assert_eq!(speeds, vec![3, 5, 7, 10]);
    }

    #[test]
    fn test_serve_from_center_at_speed_five() {
        let pong = session(PongMode::TwoPlayer);
        assert_eq!(pong.ball_rect(), Rect::new(390, 290, 20, 20));
        assert_eq!(pong.velocity.0.abs(), 5.0);
        assert_eq!(pong.velocity.1.abs(), 5.0);
    }

    #[test]
    fn test_paddle_hit_speeds_up_by_ten_percent() {
        let mut pong = session(PongMode::TwoPlayer);
        pong.ball = (22.0, 280.0);
        pong.velocity = (-5.0, 5.0);

        assert_eq!(pong.update(&InputSnapshot::default(), 0), None);
        assert!((pong.velocity.0 - 5.5).abs() < 1e-4);
        assert!((pong.velocity.1 - 5.5).abs() < 1e-4);

        // Moving away from the paddle it cannot be hit again
        pong.update(&InputSnapshot::default(), 0);
        assert!((pong.velocity.0 - 5.5).abs() < 1e-4);
    }

    #[test]
    fn test_speed_up_is_capped() {
        let mut pong = session(PongMode::TwoPlayer);
        pong.ball = (40.0, 280.0);
        pong.velocity = (-23.0, 5.0);

        pong.update(&InputSnapshot::default(), 0);
        assert_eq!(pong.velocity.0, MAX_BALL_SPEED);
        assert!((pong.velocity.1 - 5.5).abs() < 1e-4);
    }

    #[test]
    fn test_right_paddle_hit() {
        let mut pong = session(PongMode::TwoPlayer);
        pong.ball = (755.0, 280.0);
        pong.velocity = (6.0, -4.0);

        pong.update(&InputSnapshot::default(), 0);
        assert!((pong.velocity.0 + 6.6).abs() < 1e-4);
        assert!((pong.velocity.1 + 4.4).abs() < 1e-4);
    }

    #[test]
    fn test_miss_scores_for_opponent_and_reserves() {
        let mut pong = session(PongMode::TwoPlayer);
        pong.ball = (3.0, 50.0);
        pong.velocity = (-5.0, 0.0);

        pong.update(&InputSnapshot::default(), 0);
        assert_eq!(pong.scores, (0, 1));
        assert_eq!(pong.ball, PongSession::center_ball());
    }

    #[test]
    fn test_reaching_win_score_ends_match() {
        let mut pong = session(PongMode::TwoPlayer);
        pong.scores = (9, 0);
        pong.ball = (775.0, 50.0);
        pong.velocity = (5.0, 0.0);

        assert_eq!(pong.update(&InputSnapshot::default(), 0), Some(SessionResult::Won));
        let banner = pong.banner(SessionResult::Won).unwrap();
        assert_eq!(banner.text, "Player 1 Wins!");
    }

    #[test]
    fn test_computer_win_is_a_loss() {
        let mut pong = session(PongMode::SinglePlayer(Difficulty::Easy));
        pong.scores = (0, 9);
        pong.ball = (3.0, 50.0);
        pong.velocity = (-5.0, 0.0);

        assert_eq!(pong.update(&InputSnapshot::default(), 0), Some(SessionResult::Lost));
        assert_eq!(pong.banner(SessionResult::Lost).unwrap().text, "Computer Wins!");
    }

    #[test]
    fn test_player_two_banner() {
        let mut pong = session(PongMode::TwoPlayer);
        pong.scores = (0, 9);
        pong.ball = (3.0, 50.0);
        pong.velocity = (-5.0, 0.0);

        assert_eq!(pong.update(&InputSnapshot::default(), 0), Some(SessionResult::Won));
        assert_eq!(pong.banner(SessionResult::Won).unwrap().text, "Player 2 Wins!");
    }

    #[test]
    fn test_ai_tracks_ball() {
        let mut pong = session(PongMode::SinglePlayer(Difficulty::Medium));
        pong.ball = (400.0, 500.0);
        pong.velocity = (0.0, 0.0);
        let before = pong.right.y();

        pong.update(&InputSnapshot::default(), 0);
        assert_eq!(pong.right.y(), before + 5);
    }

    #[test]
    fn test_left_paddle_keys() {
        let mut pong = session(PongMode::TwoPlayer);
        pong.velocity = (0.0, 0.0);
        let before = pong.left.y();

        let input = InputSnapshot::default().with_held(Keycode::W);
        pong.update(&input, 0);
        assert_eq!(pong.left.y(), before - 6);
    }
}
