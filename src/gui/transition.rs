//! Loading Screen Between Menu and Game
//!
//! Shows "Loading <game>" with an animated ellipsis while a black overlay
//! fades in. The fade is a pure function of elapsed time so it can be
//! checked without a window.

use crate::context::{FIELD_HEIGHT, FIELD_WIDTH, HubContext};
use crate::error::{HubError, HubResult};
use crate::render::{clear, dim_overlay};
use crate::text::{draw_text, text_width};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::debug;

/// Milliseconds per added dot
const DOT_INTERVAL_MS: u64 = 125;
const MAX_DOTS: u64 = 3;
const TEXT_SCALE: u32 = 4;

/// How a transition ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEnd {
    Finished,
    /// The window was closed mid-transition
    Quit,
}

/// Configuration for the transition's look
#[derive(Debug, Clone)]
pub struct TransitionStyle {
    pub background_color: Color,
    pub text_color: Color,
}

impl Default for TransitionStyle {
    fn default() -> Self {
        TransitionStyle {
            background_color: Color::RGB(20, 20, 30),
            text_color: Color::RGB(255, 255, 255),
        }
    }
}

pub struct TransitionScreen {
    label: String,
    duration_ms: u64,
    style: TransitionStyle,
}

impl TransitionScreen {
    pub fn new(label: impl Into<String>, duration_ms: u64) -> Self {
        TransitionScreen {
            label: label.into(),
            duration_ms,
            style: TransitionStyle::default(),
        }
    }

    /// Overlay alpha: 0 at the start, 255 from `duration_ms` on
    pub fn opacity_at(&self, elapsed_ms: u64) -> u8 {
        if self.duration_ms == 0 {
            return 255;
        }
        (255 * elapsed_ms / self.duration_ms).min(255) as u8
    }

    /// Number of trailing dots, cycling 0..=3
    pub fn dots_at(&self, elapsed_ms: u64) -> usize {
        ((elapsed_ms / DOT_INTERVAL_MS) % (MAX_DOTS + 1)) as usize
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    fn render(&self, canvas: &mut Canvas<Window>, elapsed_ms: u64) -> Result<(), String> {
        clear(canvas, self.style.background_color);

        // Anchor on the label alone so the text does not jitter as dots appear
        let x = FIELD_WIDTH.saturating_sub(text_width(&self.label, TEXT_SCALE)) as i32 / 2;
        let text = format!("{}{}", self.label, ".".repeat(self.dots_at(elapsed_ms)));
        draw_text(canvas, &text, x, FIELD_HEIGHT as i32 / 2 - 20, self.style.text_color, TEXT_SCALE)?;

        dim_overlay(canvas, self.opacity_at(elapsed_ms))
    }

    /// Run the transition to completion
    pub fn play(&self, ctx: &mut HubContext) -> HubResult<TransitionEnd> {
        let start = ctx.elapsed_ms();

        loop {
            if ctx.poll_input().quit_requested() {
                return Ok(TransitionEnd::Quit);
            }

            let elapsed = ctx.elapsed_ms().saturating_sub(start);
            self.render(&mut ctx.canvas, elapsed).map_err(HubError::Render)?;
            ctx.present_and_tick(60);

            if self.is_finished(elapsed) {
                debug!(label = %self.label, elapsed, "transition finished");
                return Ok(TransitionEnd::Finished);
            }
        }
    }
}
