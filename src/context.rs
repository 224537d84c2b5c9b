//! The rendering context shared by every loop
//!
//! `HubContext` owns the SDL canvas, event pump, input system and frame
//! clock. It is built once in `main` and lent out by `&mut` to whichever
//! loop is running: the menu, a transition, a Pong set-up screen or a game.

use crate::config::HubConfig;
use crate::error::{HubError, HubResult};
use crate::frame_clock::FrameClock;
use crate::input_system::{InputSnapshot, InputSystem};
use sdl2::EventPump;
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::info;

/// Logical play-field size shared by every game
pub const FIELD_WIDTH: u32 = 800;
pub const FIELD_HEIGHT: u32 = 600;

pub struct HubContext {
    pub canvas: Canvas<Window>,
    event_pump: EventPump,
    input: InputSystem,
    clock: FrameClock,
    pub config: HubConfig,
}

impl HubContext {
    /// Create the window and canvas
    ///
    /// The canvas always works in 800x600 logical pixels; the window itself
    /// is that size times `config.window_scale`.
    pub fn new(sdl_context: &sdl2::Sdl, config: HubConfig) -> HubResult<Self> {
        let video_subsystem = sdl_context.video().map_err(HubError::Sdl)?;

        let window_width = FIELD_WIDTH * config.window_scale;
        let window_height = FIELD_HEIGHT * config.window_scale;
        info!(window_width, window_height, "creating window");

        let window = video_subsystem
            .window("Game Hub", window_width, window_height)
            .position_centered()
            .build()
            .map_err(|e| HubError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .build()
            .map_err(|e| HubError::Sdl(e.to_string()))?;

        canvas
            .set_logical_size(FIELD_WIDTH, FIELD_HEIGHT)
            .map_err(|e| HubError::Sdl(e.to_string()))?;

        let event_pump = sdl_context.event_pump().map_err(HubError::Sdl)?;

        Ok(HubContext {
            canvas,
            event_pump,
            input: InputSystem::new(),
            clock: FrameClock::new(),
            config,
        })
    }

    /// Drain pending events into a snapshot for this tick
    pub fn poll_input(&mut self) -> InputSnapshot {
        self.input.poll(&mut self.event_pump)
    }

    /// Milliseconds since the hub started
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    pub fn measured_fps(&self) -> u32 {
        self.clock.measured_fps()
    }

    /// Show the frame and wait out the rest of the tick
    pub fn present_and_tick(&mut self, target_hz: u32) {
        self.canvas.present();
        self.clock.tick(target_hz);
    }
}
