//! Flappy: flap through scrolling pipe pairs

use crate::collision::{clamp_vertical, collides_with_any};
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

const BIRD_SIZE: u32 = 30;
const FLAP_IMPULSE: i32 = -25;
/// Fall speed is the accumulated impulse divided by this (rounded down)
const FALL_DIVISOR: i32 = 3;

const PIPE_WIDTH: u32 = 50;
const PIPE_GAP: i32 = 150;
const PIPE_SPEED: i32 = 5;
const PIPE_INTERVAL_TICKS: u32 = 60;
const PIPE_MIN_HEIGHT: i32 = 100;
const PIPE_MAX_HEIGHT: i32 = 400;

/// Survived ticks per displayed point
const TICKS_PER_POINT: u64 = 100;

pub struct FlappySession {
    bird: Rect,
    /// Accumulated vertical impulse; grows by one every tick
    fall: i32,
    pipes: Vec<Rect>,
    pipe_timer: u32,
    survived_ticks: u64,
    rng: StdRng,
}

impl FlappySession {
    pub fn new(rng: StdRng) -> Self {
        FlappySession {
            bird: Rect::new(100, FIELD_HEIGHT as i32 / 2, BIRD_SIZE, BIRD_SIZE),
            fall: 0,
            pipes: Vec::new(),
            pipe_timer: 0,
            survived_ticks: 0,
            rng,
        }
    }

    /// Top pipe of height `top_height` and the bottom pipe below its gap
    fn pipe_pair(top_height: i32) -> [Rect; 2] {
        let bottom_y = top_height + PIPE_GAP;
        [
            Rect::new(FIELD_WIDTH as i32, 0, PIPE_WIDTH, top_height as u32),
            Rect::new(
                FIELD_WIDTH as i32,
                bottom_y,
                PIPE_WIDTH,
                (FIELD_HEIGHT as i32 - bottom_y) as u32,
            ),
        ]
    }

    fn spawn_pipes(&mut self) {
        self.pipe_timer += 1;
        if self.pipe_timer > PIPE_INTERVAL_TICKS {
            let height = self.rng.random_range(PIPE_MIN_HEIGHT..=PIPE_MAX_HEIGHT);
            self.pipes.extend(Self::pipe_pair(height));
            self.pipe_timer = 0;
        }
    }
}

impl Session for FlappySession {
    fn update(&mut self, input: &InputSnapshot, _now_ms: u64) -> Option<SessionResult> {
        self.spawn_pipes();
        for pipe in &mut self.pipes {
            pipe.offset(-PIPE_SPEED, 0);
        }
        self.pipes.retain(|pipe| pipe.x() > -(PIPE_WIDTH as i32));

        if input.key_pressed(Keycode::Space) {
            self.fall = FLAP_IMPULSE;
        }
        self.fall += 1;
        self.bird.offset(0, self.fall.div_euclid(FALL_DIVISOR));
        // Ceiling and floor stop the bird without ending the run
        if clamp_vertical(&mut self.bird, FIELD_HEIGHT as i32) {
            self.fall = 0;
        }

        if collides_with_any(&self.bird, &self.pipes) {
            return Some(SessionResult::Lost);
        }

        self.survived_ticks += 1;
        None
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, Color::RGB(135, 206, 235));

        fill_rect(canvas, self.bird, Color::RGB(255, 255, 0))?;
        for pipe in &self.pipes {
            fill_rect(canvas, *pipe, Color::RGB(0, 255, 0))?;
        }

        draw_text(canvas, &format!("Score: {}", self.score()), 10, 10, Color::RGB(255, 255, 255), 3)
    }

    fn score(&self) -> u64 {
        self.survived_ticks / TICKS_PER_POINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session() -> FlappySession {
        FlappySession::new(StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_pipe_pair_leaves_gap() {
        let [top, bottom] = FlappySession::pipe_pair(200);
        assert_eq!(top.height(), 200);
        assert_eq!(bottom.y(), 350);
        assert_eq!(bottom.bottom(), 600);
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut bird = session();
        let start = bird.bird.y();

        // fall goes 1, 2, 3 -> offsets 0, 0, 1
        for _ in 0..3 {
            bird.update(&InputSnapshot::default(), 0);
        }
        assert_eq!(bird.bird.y(), start + 1);
    }

    #[test]
    fn test_flap_moves_bird_up() {
        let mut bird = session();
        let start = bird.bird.y();

        let flap = InputSnapshot::default().with_key_down(Keycode::Space);
        bird.update(&flap, 0);
        // -24 / 3 rounded down
        assert_eq!(bird.bird.y(), start - 8);
    }

    #[test]
    fn test_pipes_spawn_every_61_ticks() {
        let mut bird = session();
        for _ in 0..60 {
            bird.spawn_pipes();
        }
        assert!(bird.pipes.is_empty());

        bird.spawn_pipes();
        assert_eq!(bird.pipes.len(), 2);
        let gap = bird.pipes[1].y() - bird.pipes[0].bottom();
        assert_eq!(gap, PIPE_GAP);
    }

    #[test]
    fn test_pipe_hit_loses() {
        let mut bird = session();
        bird.pipes = vec![Rect::new(110, 0, 50, 600)];

        assert_eq!(bird.update(&InputSnapshot::default(), 0), Some(SessionResult::Lost));
    }

    #[test]
    fn test_bird_rests_on_the_floor() {
        let mut bird = session();
        for _ in 0..300 {
            assert_eq!(bird.update(&InputSnapshot::default(), 0), None);
            bird.pipes.clear();
        }
        assert_eq!(bird.bird.bottom(), FIELD_HEIGHT as i32);
        assert!(bird.fall < FALL_DIVISOR);
    }

    #[test]
    fn test_bird_stops_at_the_ceiling() {
        let mut bird = session();
        for _ in 0..100 {
            let flap = InputSnapshot::default().with_key_down(Keycode::Space);
            bird.update(&flap, 0);
            bird.pipes.clear();
        }
        assert_eq!(bird.bird.y(), 0);
    }

    #[test]
    fn test_bottom_pipe_reaches_bird_on_the_floor() {
        let mut bird = session();
        bird.bird.set_y((FIELD_HEIGHT - BIRD_SIZE) as i32);
        bird.pipes = FlappySession::pipe_pair(PIPE_MAX_HEIGHT).to_vec();
        for pipe in &mut bird.pipes {
            pipe.set_x(110);
        }

        assert_eq!(bird.update(&InputSnapshot::default(), 0), Some(SessionResult::Lost));
    }

    #[test]
    fn test_score_accrues_per_tick() {
        let mut bird = session();
        for _ in 0..100 {
            let flap = InputSnapshot::default().with_key_down(Keycode::Space);
            bird.update(&flap, 0);
            bird.pipes.clear();
        }
        assert_eq!(bird.survived_ticks, 100);
        assert_eq!(bird.score(), 1);
    }
}
