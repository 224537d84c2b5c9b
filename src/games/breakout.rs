//! Breakout: keep the ball up and clear the wall

use crate::collision::{aabb_intersect, first_collision, step_horizontal};
use crate::context::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::input_system::InputSnapshot;
use crate::render::{clear, fill_rect};
use crate::session::{Session, SessionResult};
use crate::text::draw_text;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const BALL_SIZE: u32 = 15;
const BALL_SPEED: i32 = 4;
const PADDLE_WIDTH: u32 = 120;
const PADDLE_HEIGHT: u32 = 10;
const PADDLE_SPEED: i32 = 6;

const BRICK_COLUMNS: i32 = 13;
const BRICK_ROWS: i32 = 5;

pub struct BreakoutSession {
    ball: Rect,
    velocity: (i32, i32),
    paddle: Rect,
    bricks: Vec<Rect>,
    score: u64,
}

impl BreakoutSession {
    pub fn new() -> Self {
        let bricks = (0..BRICK_COLUMNS)
            .flat_map(|col| (0..BRICK_ROWS).map(move |row| Rect::new(col * 60 + 20, row * 20 + 40, 50, 15)))
            .collect();

        BreakoutSession {
            ball: Rect::new(FIELD_WIDTH as i32 / 2, FIELD_HEIGHT as i32 / 2, BALL_SIZE, BALL_SIZE),
            velocity: (BALL_SPEED, -BALL_SPEED),
            paddle: Rect::new(
                FIELD_WIDTH as i32 / 2 - PADDLE_WIDTH as i32 / 2,
                FIELD_HEIGHT as i32 - 30,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            bricks,
            score: 0,
        }
    }

    fn bounce_off_walls(&mut self) {
        if self.ball.left() <= 0 || self.ball.right() >= FIELD_WIDTH as i32 {
            self.velocity.0 = -self.velocity.0;
        }
        if self.ball.top() <= 0 {
            self.velocity.1 = -self.velocity.1;
        }
    }
}

impl Default for BreakoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for BreakoutSession {
    fn update(&mut self, input: &InputSnapshot, _now_ms: u64) -> Option<SessionResult> {
        self.ball.offset(self.velocity.0, self.velocity.1);

        let dx = input.axis(Keycode::Left, Keycode::Right) * PADDLE_SPEED;
        step_horizontal(&mut self.paddle, dx, FIELD_WIDTH as i32);

        self.bounce_off_walls();
        if self.ball.bottom() >= FIELD_HEIGHT as i32 {
            return Some(SessionResult::Lost);
        }

        // Always send the ball upward so it cannot get stuck inside the paddle
        if aabb_intersect(&self.ball, &self.paddle) {
            self.velocity.1 = -self.velocity.1.abs();
        }

        // At most one brick per tick
        if let Some(hit) = first_collision(&self.ball, &self.bricks) {
            self.bricks.remove(hit);
            self.velocity.1 = -self.velocity.1;
            self.score += 1;
        }

        if self.bricks.is_empty() {
            return Some(SessionResult::Won);
        }
        None
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, Color::RGB(0, 0, 0));

        fill_rect(canvas, self.ball, Color::RGB(255, 255, 255))?;
        fill_rect(canvas, self.paddle, Color::RGB(200, 200, 200))?;
        for brick in &self.bricks {
            fill_rect(canvas, *brick, Color::RGB(255, 0, 0))?;
        }

        draw_text(canvas, &format!("Score: {}", self.score), 10, 10, Color::RGB(255, 255, 255), 3)
    }

    fn score(&self) -> u64 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_wall() {
        let game = BreakoutSession::new();
        assert_eq!(game.bricks.len(), 65);
        assert_eq!(game.paddle, Rect::new(340, 570, 120, 10));
        assert_eq!(game.velocity, (4, -4));
    }

    #[test]
    fn test_ball_out_the_bottom_loses_with_bricks_left() {
        let mut game = BreakoutSession::new();
        game.ball = Rect::new(100, 590, 15, 15);
        game.velocity = (4, 4);

        assert_eq!(game.update(&InputSnapshot::default(), 0), Some(SessionResult::Lost));
        assert_eq!(game.bricks.len(), 65);
    }

    #[test]
    fn test_paddle_sends_ball_up() {
        let mut game = BreakoutSession::new();
        game.ball = Rect::new(400, 552, 15, 15);
        game.velocity = (4, 4);

        assert_eq!(game.update(&InputSnapshot::default(), 0), None);
        assert_eq!(game.velocity.1, -4);
    }

    #[test]
    fn test_one_brick_per_tick() {
        let mut game = BreakoutSession::new();
        // Straddles two bricks of the bottom row
        game.ball = Rect::new(66, 128, 15, 15);
        game.velocity = (0, -4);

        assert_eq!(game.update(&InputSnapshot::default(), 0), None);
        assert_eq!(game.score(), 1);
        assert_eq!(game.bricks.len(), 64);
        assert_eq!(game.velocity.1, 4);
    }

    #[test]
    fn test_side_walls_reflect() {
        let mut game = BreakoutSession::new();
        game.ball = Rect::new(787, 300, 15, 15);
        game.velocity = (4, -4);

        game.update(&InputSnapshot::default(), 0);
        assert_eq!(game.velocity.0, -4);
    }

    #[test]
    fn test_clearing_the_wall_wins() {
        let mut game = BreakoutSession::new();
        game.bricks = vec![Rect::new(300, 200, 50, 15)];
        game.ball = Rect::new(310, 218, 15, 15);
        game.velocity = (0, -4);

        assert_eq!(game.update(&InputSnapshot::default(), 0), Some(SessionResult::Won));
        assert_eq!(game.score(), 1);
    }
}
