//! Geometry Dash: jump over spikes and onto platforms until the level ends
//!
//! Obstacles are stored in level coordinates; the screen position is the
//! level position minus the current scroll distance.

use crate::collision::aabb_intersect;
use crate::context::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::input_system::InputSnapshot;
use crate::render::{clear, fill_rect, fill_triangle};
use crate::session::{Banner, Session, SessionResult};
use crate::text::draw_text;
use rand::Rng;
use rand::rngs::StdRng;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

const PLAYER_X: i32 = 100;
const PLAYER_SIZE: u32 = 40;
const GROUND_HEIGHT: i32 = 40;
const GROUND_Y: i32 = FIELD_HEIGHT as i32 - GROUND_HEIGHT;

const GRAVITY: f32 = 0.8;
const JUMP_VELOCITY: f32 = -12.0;
const SCROLL_SPEED: i32 = 6;
const LEVEL_LENGTH: i32 = 5000;

const SPAWN_INTERVAL_TICKS: u32 = 60;
const PLATFORM_CHANCE: f64 = 0.6;
/// Rolls below this (and above the platform chance) spawn a lone spike
const SPIKE_CHANCE: f64 = 0.85;
const PLATFORM_WIDTH: u32 = 80;
const PLATFORM_HEIGHT: u32 = 20;
const SPIKE_SIZE: u32 = 30;
/// How far above a platform's top the player's feet may be and still land
const LANDING_TOLERANCE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlatformContact {
    None,
    Landed,
    /// Touched a platform anywhere but from above
    Crashed,
}

pub struct GeometryDashSession {
    /// Top of the player; fractional because of gravity
    player_y: f32,
    velocity_y: f32,
    scroll: i32,
    platforms: Vec<Rect>,
    spikes: Vec<Rect>,
    spawn_timer: u32,
    ticks: u64,
    rng: StdRng,
}

impl GeometryDashSession {
    pub fn new(rng: StdRng) -> Self {
        GeometryDashSession {
            player_y: (GROUND_Y - PLAYER_SIZE as i32) as f32,
            velocity_y: 0.0,
            scroll: 0,
            platforms: Vec::new(),
            spikes: Vec::new(),
            spawn_timer: 0,
            ticks: 0,
            rng,
        }
    }

    fn player(&self) -> Rect {
        Rect::new(PLAYER_X, self.player_y as i32, PLAYER_SIZE, PLAYER_SIZE)
    }

    fn on_screen(&self, obstacle: &Rect) -> Rect {
        let mut rect = *obstacle;
        rect.offset(-self.scroll, 0);
        rect
    }

    fn ground_spike(x: i32) -> Rect {
        Rect::new(x, GROUND_Y - SPIKE_SIZE as i32, SPIKE_SIZE, SPIKE_SIZE)
    }

    /// Place obstacles at level position `x` according to a [0, 1) roll
    fn spawn_at(&mut self, x: i32, roll: f64) {
        if roll < PLATFORM_CHANCE {
            let y = if self.rng.random_bool(0.5) { GROUND_Y - 60 } else { GROUND_Y - 80 };
            let platform = Rect::new(x, y, PLATFORM_WIDTH, PLATFORM_HEIGHT);
            self.platforms.push(platform);
            // Ground spike under the platform so running beneath it is fatal
            self.spikes.push(Self::ground_spike(platform.x() + 25));
        } else if roll < SPIKE_CHANCE {
            self.spikes.push(Self::ground_spike(x));
        }
    }

    fn spawn(&mut self) {
        self.spawn_timer += 1;
        if self.spawn_timer > SPAWN_INTERVAL_TICKS {
            let roll = self.rng.random::<f64>();
            self.spawn_at(FIELD_WIDTH as i32 + self.scroll, roll);
            self.spawn_timer = 0;
        }
    }

    fn platform_contact(&mut self) -> PlatformContact {
        let player = self.player();
        let mut contact = PlatformContact::None;

        for platform in &self.platforms {
            let platform = self.on_screen(platform);
            if !aabb_intersect(&player, &platform) {
                continue;
            }
            if self.velocity_y > 0.0 && player.bottom() <= platform.top() + LANDING_TOLERANCE {
                self.player_y = (platform.top() - PLAYER_SIZE as i32) as f32;
                self.velocity_y = 0.0;
                contact = PlatformContact::Landed;
            } else {
                return PlatformContact::Crashed;
            }
        }

        contact
    }

    fn prune(&mut self) {
        let scroll = self.scroll;
        self.platforms.retain(|p| p.right() > scroll);
        self.spikes.retain(|s| s.right() > scroll);
    }
}

impl Session for GeometryDashSession {
    fn update(&mut self, input: &InputSnapshot, _now_ms: u64) -> Option<SessionResult> {
        if input.key_pressed(Keycode::Space) && self.velocity_y == 0.0 {
            self.velocity_y = JUMP_VELOCITY;
        }

        self.spawn();

        self.velocity_y += GRAVITY;
        self.player_y += self.velocity_y;

        let contact = self.platform_contact();
        if contact == PlatformContact::Crashed {
            return Some(SessionResult::Lost);
        }
        if contact == PlatformContact::None && self.player().bottom() >= GROUND_Y {
            self.player_y = (GROUND_Y - PLAYER_SIZE as i32) as f32;
            self.velocity_y = 0.0;
        }

        let player = self.player();
        if self.spikes.iter().any(|s| aabb_intersect(&player, &self.on_screen(s))) {
            return Some(SessionResult::Lost);
        }

        self.scroll += SCROLL_SPEED;
        self.ticks += 1;
        self.prune();

        (self.scroll > LEVEL_LENGTH).then_some(SessionResult::Won)
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, Color::RGB(30, 30, 30));

        fill_rect(canvas, self.player(), Color::RGB(0, 255, 255))?;
        let ground = Rect::new(0, GROUND_Y, FIELD_WIDTH, GROUND_HEIGHT as u32);
        fill_rect(canvas, ground, Color::RGB(100, 100, 100))?;

        for platform in &self.platforms {
            fill_rect(canvas, self.on_screen(platform), Color::RGB(150, 150, 150))?;
        }
        for spike in &self.spikes {
            let s = self.on_screen(spike);
            let points = [
                Point::new(s.left(), s.bottom()),
                Point::new(s.left() + s.width() as i32 / 2, s.top()),
                Point::new(s.right(), s.bottom()),
            ];
            fill_triangle(canvas, points, Color::RGB(255, 50, 50))?;
        }

        draw_text(canvas, &format!("Distance: {}", self.ticks), 10, 10, Color::RGB(255, 255, 255), 3)
    }

    fn score(&self) -> u64 {
        self.ticks
    }

    fn banner(&self, result: SessionResult) -> Option<Banner> {
        (result == SessionResult::Won).then(|| Banner {
            text: "Level Complete!".to_string(),
            color: Color::RGB(0, 255, 0),
        })
    }
}
