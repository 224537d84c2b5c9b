//! Snake on a 20-pixel grid, ten moves per second

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
use std::collections::VecDeque;

pub const CELL: i32 = 20;
const COLS: i32 = FIELD_WIDTH as i32 / CELL;
const ROWS: i32 = FIELD_HEIGHT as i32 / CELL;

/// Grid cell, in cell units rather than pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Cell { col, row }
    }

    fn step(self, dir: Direction) -> Cell {
        let (dc, dr) = dir.delta();
        Cell::new(self.col + dc, self.row + dr)
    }

    fn in_field(self) -> bool {
        (0..COLS).contains(&self.col) && (0..ROWS).contains(&self.row)
    }

    fn to_rect(self) -> Rect {
        Rect::new(self.col * CELL, self.row * CELL, CELL as u32, CELL as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn from_key(key: Keycode) -> Option<Direction> {
        match key {
            Keycode::Up => Some(Direction::Up),
            Keycode::Down => Some(Direction::Down),
            Keycode::Left => Some(Direction::Left),
            Keycode::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

pub struct SnakeSession {
    /// Head first
    body: VecDeque<Cell>,
    direction: Direction,
    food: Cell,
    score: u64,
    rng: StdRng,
}

impl SnakeSession {
    pub fn new(rng: StdRng) -> Self {
        let mut session = SnakeSession {
            body: VecDeque::from([Cell::new(COLS / 2, ROWS / 2)]),
            direction: Direction::Right,
            food: Cell::new(0, 0),
            score: 0,
            rng,
        };
        session.food = session.random_free_cell();
        session
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    fn random_free_cell(&mut self) -> Cell {
        let free: Vec<Cell> = (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| Cell::new(col, row)))
            .filter(|cell| !self.body.contains(cell))
            .collect();

        if free.is_empty() {
            // Board full: park the food under the head, it can never be reached again
            return self.head();
        }
        free[self.rng.random_range(0..free.len())]
    }

    fn steer(&mut self, input: &InputSnapshot) {
        // Every key this tick is checked against the last move, not an earlier key
        let moving = self.direction;
        for dir in input.keys_pressed().filter_map(Direction::from_key) {
            if self.body.len() > 1 && dir == moving.opposite() {
                continue;
            }
            self.direction = dir;
        }
    }
}

impl Session for SnakeSession {
    fn tick_rate(&self) -> u32 {
        10
    }

    fn update(&mut self, input: &InputSnapshot, _now_ms: u64) -> Option<SessionResult> {
        self.steer(input);

        let head = self.head().step(self.direction);
        if !head.in_field() || self.body.contains(&head) {
            return Some(SessionResult::Lost);
        }

        self.body.push_front(head);
        if head == self.food {
            self.score += 1;
            self.food = self.random_free_cell();
        } else {
            self.body.pop_back();
        }

        None
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, Color::RGB(0, 0, 0));

        fill_rect(canvas, self.food.to_rect(), Color::RGB(255, 0, 0))?;
        for cell in &self.body {
            fill_rect(canvas, cell.to_rect(), Color::RGB(0, 255, 0))?;
        }

        draw_text(canvas, &format!("Score: {}", self.score), 10, 10, Color::RGB(255, 255, 255), 3)
    }

    fn score(&self) -> u64 {
        self.score
    }
}
