//! Dodge and Asteroids: steer left/right under a rain of blocks
//!
//! The two games share every rule and differ only in sizes, speeds and
//! colours, so both are one session type configured by [`FallingStyle`].

use crate::collision::{aabb_intersect, step_horizontal};
use crate::context::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::input_system::InputSnapshot;
use crate::render::{clear, fill_rect};
use crate::session::{Session, SessionResult};
use crate::text::draw_text;
use rand::Rng;
use rand::rngs::StdRng;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const BLOCK_SIZE: u32 = 30;
const BLOCK_COUNT: i32 = 10;
/// Vertical spacing of the initial block column above the field
const BLOCK_SPACING: i32 = 60;
const PLAYER_SPEED: i32 = 5;

#[derive(Debug, Clone)]
pub struct FallingStyle {
    pub player_size: u32,
    pub fall_speed: i32,
    pub background: Color,
    pub player_color: Color,
    pub block_color: Color,
}

impl FallingStyle {
    pub fn dodge() -> Self {
        FallingStyle {
            player_size: 40,
            fall_speed: 5,
            background: Color::RGB(0, 0, 0),
            player_color: Color::RGB(0, 255, 0),
            block_color: Color::RGB(255, 0, 0),
        }
    }

    pub fn asteroids() -> Self {
        FallingStyle {
            player_size: 30,
            fall_speed: 4,
            background: Color::RGB(10, 10, 20),
            player_color: Color::RGB(0, 200, 200),
            block_color: Color::RGB(200, 200, 0),
        }
    }
}

pub struct FallingBlocksSession {
    style: FallingStyle,
    player: Rect,
    blocks: Vec<Rect>,
    score: u64,
    rng: StdRng,
}

impl FallingBlocksSession {
    pub fn new(style: FallingStyle, mut rng: StdRng) -> Self {
        let player = Rect::new(
            FIELD_WIDTH as i32 / 2,
            FIELD_HEIGHT as i32 - 50,
            style.player_size,
            style.player_size,
        );

        let blocks = (0..BLOCK_COUNT)
            .map(|i| {
                let x = rng.random_range(0..=FIELD_WIDTH as i32 - BLOCK_SIZE as i32);
                Rect::new(x, -BLOCK_SPACING * i, BLOCK_SIZE, BLOCK_SIZE)
            })
            .collect();

        FallingBlocksSession {
            style,
            player,
            blocks,
            score: 0,
            rng,
        }
    }

    fn recycle(&mut self, index: usize) {
        let x = self
            .rng
            .random_range(0..=FIELD_WIDTH as i32 - BLOCK_SIZE as i32);
        self.blocks[index].set_x(x);
        self.blocks[index].set_y(-(BLOCK_SIZE as i32));
    }
}

impl Session for FallingBlocksSession {
    fn update(&mut self, input: &InputSnapshot, _now_ms: u64) -> Option<SessionResult> {
        for block in &mut self.blocks {
            block.offset(0, self.style.fall_speed);
        }

        let dx = input.axis(Keycode::Left, Keycode::Right) * PLAYER_SPEED;
        step_horizontal(&mut self.player, dx, FIELD_WIDTH as i32);

        for i in 0..self.blocks.len() {
            if aabb_intersect(&self.blocks[i], &self.player) {
                return Some(SessionResult::Lost);
            }
            if self.blocks[i].top() > FIELD_HEIGHT as i32 {
                self.recycle(i);
                self.score += 1;
            }
        }

        None
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, self.style.background);

        fill_rect(canvas, self.player, self.style.player_color)?;
        for block in &self.blocks {
            fill_rect(canvas, *block, self.style.block_color)?;
        }

        draw_text(canvas, &format!("Score: {}", self.score), 10, 10, Color::RGB(255, 255, 255), 3)
    }

    fn score(&self) -> u64 {
        self.score
    }
}
