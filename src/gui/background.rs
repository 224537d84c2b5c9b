//! Animated menu backdrop: a slowly pulsing fill with squares drifting left

use crate::context::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::render::{clear, fill_rect};
use rand::Rng;
use rand::rngs::StdRng;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const PARTICLE_COUNT: usize = 40;
const PARTICLE_SIZE: i32 = 20;
const PARTICLE_COLOR: Color = Color::RGB(50, 255, 255);

/// Background colour at `t_ms` milliseconds
pub fn glow_color(t_ms: u64) -> Color {
    let t = t_ms as f64;
    let channel = |base: f64, rate: f64| (base + 20.0 * (t * rate).sin()) as u8;
    Color::RGB(channel(20.0, 0.002), channel(20.0, 0.004), channel(30.0, 0.003))
}

pub struct MenuBackground {
    /// Top-left corners of the drifting squares
    particles: Vec<(i32, i32)>,
    rng: StdRng,
}

impl MenuBackground {
    pub fn new(mut rng: StdRng) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                (
                    rng.random_range(0..=FIELD_WIDTH as i32),
                    rng.random_range(0..=FIELD_HEIGHT as i32),
                )
            })
            .collect();

        MenuBackground { particles, rng }
    }

    /// Drift every particle one pixel left, respawning any that left the screen
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.0 -= 1;
            if particle.0 < -PARTICLE_SIZE {
                particle.0 = FIELD_WIDTH as i32 + self.rng.random_range(0..=100);
                particle.1 = self.rng.random_range(0..=FIELD_HEIGHT as i32 - PARTICLE_SIZE);
            }
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, t_ms: u64) -> Result<(), String> {
        clear(canvas, glow_color(t_ms));
        for &(x, y) in &self.particles {
            let square = Rect::new(x, y, PARTICLE_SIZE as u32, PARTICLE_SIZE as u32);
            fill_rect(canvas, square, PARTICLE_COLOR)?;
        }
        Ok(())
    }
}
