//! Clicker: click for money, spend it on click power and auto-clickers
//!
//! There is no way to lose; the session only ends through Escape or quit.

use crate::collision::contains_point;
use crate::context::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::input_system::InputSnapshot;
use crate::render::{clear, fill_rect, outline_rect};
use crate::session::{Session, SessionResult};
use crate::text::draw_text;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const UPGRADE_BASE_COST: u64 = 50;
const AUTO_CLICKER_BASE_COST: u64 = 100;
const INCOME_INTERVAL_MS: u64 = 1000;

const WHITE: Color = Color::RGB(255, 255, 255);

/// Cost after one purchase: ×1.5, fractions dropped
fn next_cost(cost: u64) -> u64 {
    cost * 3 / 2
}

pub struct ClickerSession {
    money: u64,
    click_value: u64,
    upgrade_cost: u64,
    auto_clickers: u64,
    auto_clicker_cost: u64,
    /// Time of the last auto-clicker payout; unset until the first tick
    last_income_ms: Option<u64>,
    click_zone: Rect,
    upgrade_button: Rect,
    auto_clicker_button: Rect,
    /// Last known mouse position, for hover highlights
    pointer: (i32, i32),
}

impl ClickerSession {
    pub fn new() -> Self {
        ClickerSession {
            money: 0,
            click_value: 1,
            upgrade_cost: UPGRADE_BASE_COST,
            auto_clickers: 0,
            auto_clicker_cost: AUTO_CLICKER_BASE_COST,
            last_income_ms: None,
            click_zone: Rect::new(FIELD_WIDTH as i32 / 2 - 100, FIELD_HEIGHT as i32 / 2 - 50, 200, 100),
            upgrade_button: Rect::new(50, 100, 240, 60),
            auto_clicker_button: Rect::new(50, 180, 240, 60),
            pointer: (0, 0),
        }
    }

    pub fn money(&self) -> u64 {
        self.money
    }

    fn click(&mut self, x: i32, y: i32) {
        if contains_point(&self.click_zone, x, y) {
            self.money += self.click_value;
        } else if contains_point(&self.upgrade_button, x, y) && self.money >= self.upgrade_cost {
            self.money -= self.upgrade_cost;
            self.click_value += 1;
            self.upgrade_cost = next_cost(self.upgrade_cost);
        } else if contains_point(&self.auto_clicker_button, x, y) && self.money >= self.auto_clicker_cost {
            self.money -= self.auto_clicker_cost;
            self.auto_clickers += 1;
            self.auto_clicker_cost = next_cost(self.auto_clicker_cost);
        }
    }

    fn pay_auto_income(&mut self, now_ms: u64) {
        let last = *self.last_income_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(last) >= INCOME_INTERVAL_MS {
            self.money += self.auto_clickers;
            self.last_income_ms = Some(now_ms);
        }
    }
}

impl Default for ClickerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for ClickerSession {
    fn update(&mut self, input: &InputSnapshot, now_ms: u64) -> Option<SessionResult> {
        for (x, y) in input.clicks() {
            self.click(x, y);
        }
        self.pay_auto_income(now_ms);
        self.pointer = input.pointer;
        None
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, Color::RGB(20, 20, 30));

        fill_rect(canvas, self.click_zone, Color::RGB(0, 200, 255))?;
        draw_text(canvas, "CLICK", self.click_zone.x() + 55, self.click_zone.y() + 39, WHITE, 3)?;

        fill_rect(canvas, self.upgrade_button, Color::RGB(50, 50, 100))?;
        let upgrade = format!("Upgrade Click (${})", self.upgrade_cost);
        draw_text(canvas, &upgrade, self.upgrade_button.x() + 6, self.upgrade_button.y() + 23, WHITE, 2)?;

        fill_rect(canvas, self.auto_clicker_button, Color::RGB(50, 100, 50))?;
        let auto = format!("Auto-Clicker (${})", self.auto_clicker_cost);
        draw_text(canvas, &auto, self.auto_clicker_button.x() + 6, self.auto_clicker_button.y() + 23, WHITE, 2)?;

        let (px, py) = self.pointer;
        for button in [self.click_zone, self.upgrade_button, self.auto_clicker_button] {
            if contains_point(&button, px, py) {
                outline_rect(canvas, button, WHITE, 2)?;
            }
        }

        draw_text(canvas, &format!("Money: ${}", self.money), 50, 40, WHITE, 3)?;
        draw_text(canvas, &format!("Click Power: +{}", self.click_value), 50, 320, WHITE, 3)?;
        draw_text(canvas, &format!("Auto-Clickers: {}", self.auto_clickers), 50, 360, WHITE, 3)
    }

    fn score(&self) -> u64 {
        self.money()
    }
}
