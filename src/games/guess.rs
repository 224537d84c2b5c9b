//! Guess the number between 1 and 100, with higher/lower hints

use crate::collision::contains_point;
use crate::context::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::input_system::{InputEvent, InputSnapshot};
use crate::render::{clear, fill_rect, outline_rect};
use crate::session::{Session, SessionResult};
use crate::text::{draw_text, draw_text_centered};
use rand::Rng;
use rand::rngs::StdRng;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const MAX_ENTRY_LEN: usize = 3;
const PROMPT: &str = "Enter a number between 1 and 100";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    TooLow,
    TooHigh,
    Correct,
    /// Empty entry or anything that is not all digits
    Invalid,
}

impl GuessOutcome {
    pub fn message(self) -> &'static str {
        match self {
            GuessOutcome::TooLow => "Too low!",
            GuessOutcome::TooHigh => "Too high!",
            GuessOutcome::Correct => "Correct!",
            GuessOutcome::Invalid => "Enter digits only!",
        }
    }
}

/// Compare a typed entry against the target
pub fn evaluate(entry: &str, target: u32) -> GuessOutcome {
    if entry.is_empty() || !entry.chars().all(|c| c.is_ascii_digit()) {
        return GuessOutcome::Invalid;
    }
    match entry.parse::<u32>() {
        Ok(guess) if guess < target => GuessOutcome::TooLow,
        Ok(guess) if guess > target => GuessOutcome::TooHigh,
        Ok(_) => GuessOutcome::Correct,
        Err(_) => GuessOutcome::Invalid,
    }
}

pub struct GuessSession {
    target: u32,
    entry: String,
    last_outcome: Option<GuessOutcome>,
    guesses: u64,
    text_box: Rect,
    play_again: Rect,
    rng: StdRng,
}

impl GuessSession {
    pub fn new(mut rng: StdRng) -> Self {
        let target = rng.random_range(1..=100);
        let center_x = FIELD_WIDTH as i32 / 2;
        let center_y = FIELD_HEIGHT as i32 / 2;

        GuessSession {
            target,
            entry: String::new(),
            last_outcome: None,
            guesses: 0,
            text_box: Rect::new(center_x - 80, center_y - 30, 160, 40),
            play_again: Rect::new(center_x - 80, center_y + 60, 160, 40),
            rng,
        }
    }

    /// Input is locked once the number has been found
    pub fn solved(&self) -> bool {
        self.last_outcome == Some(GuessOutcome::Correct)
    }

    fn submit(&mut self) {
        let outcome = evaluate(&self.entry, self.target);
        if outcome != GuessOutcome::Invalid {
            self.guesses += 1;
        }
        self.last_outcome = Some(outcome);
        self.entry.clear();
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            if self.entry.chars().count() >= MAX_ENTRY_LEN {
                break;
            }
            self.entry.push(c);
        }
    }

    fn restart(&mut self) {
        self.target = self.rng.random_range(1..=100);
        self.entry.clear();
        self.last_outcome = None;
        self.guesses = 0;
    }

    fn text_color(&self) -> Color {
        if self.solved() {
            Color::RGB(0, 255, 0)
        } else {
            Color::RGB(255, 255, 255)
        }
    }
}

impl Session for GuessSession {
    fn tick_rate(&self) -> u32 {
        30
    }

    fn update(&mut self, input: &InputSnapshot, _now_ms: u64) -> Option<SessionResult> {
        for event in &input.events {
            match event {
                InputEvent::Click { x, y } if self.solved() => {
                    if contains_point(&self.play_again, *x, *y) {
                        self.restart();
                    }
                }
                _ if self.solved() => {}
                InputEvent::KeyDown(Keycode::Return) => self.submit(),
                InputEvent::KeyDown(Keycode::Backspace) => {
                    self.entry.pop();
                }
                InputEvent::Text(text) => self.type_text(text),
                _ => {}
            }
        }
        None
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, Color::RGB(20, 20, 30));
        let color = self.text_color();

        let message = self.last_outcome.map_or(PROMPT, GuessOutcome::message);
        draw_text_centered(canvas, message, FIELD_WIDTH as i32 / 2, FIELD_HEIGHT as i32 / 2 - 100, color, 3)?;

        outline_rect(canvas, self.text_box, color, 2)?;
        draw_text(canvas, &self.entry, self.text_box.x() + 10, self.text_box.y() + 10, color, 3)?;

        if self.solved() {
            fill_rect(canvas, self.play_again, Color::RGB(0, 150, 150))?;
            let center = self.play_again.center();
            draw_text_centered(canvas, "Play Again", center.x(), center.y() - 7, Color::RGB(255, 255, 255), 2)?;
        }

        draw_text(canvas, &format!("Guesses: {}", self.guesses), 10, 10, Color::RGB(255, 255, 255), 2)
    }

    fn score(&self) -> u64 {
        self.guesses
    }
}
