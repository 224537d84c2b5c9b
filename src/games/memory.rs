//! Memory: turn over cards two at a time and find the eight pairs

use crate::collision::contains_point;
use crate::context::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::input_system::InputSnapshot;
use crate::render::{clear, fill_rect};
use crate::session::{Session, SessionResult};
use crate::text::{GLYPH_HEIGHT, draw_text, draw_text_centered};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const GRID: i32 = 4;
const CARD_SIZE: i32 = 100;
const CARD_GAP: i32 = 20;
/// How long a mismatched pair stays face up
pub const MISMATCH_DELAY_MS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Down,
    Up,
    Matched,
}

#[derive(Debug, Clone)]
pub struct Card {
    pub value: u8,
    pub rect: Rect,
    pub face: CardFace,
}

/// A mismatched pair waiting to be turned back over
#[derive(Debug, Clone, Copy)]
struct PendingFlip {
    cards: (usize, usize),
    until_ms: u64,
}

pub struct MemorySession {
    cards: Vec<Card>,
    first_pick: Option<usize>,
    pending: Option<PendingFlip>,
    pairs: u64,
}

impl MemorySession {
    pub fn new(mut rng: StdRng) -> Self {
        let mut values: Vec<u8> = (1..=8).chain(1..=8).collect();
        values.shuffle(&mut rng);
        Self::with_values(&values)
    }

    /// Lay `values` out row by row, centred on the field
    fn with_values(values: &[u8]) -> Self {
        let span = GRID * CARD_SIZE + (GRID - 1) * CARD_GAP;
        let origin_x = (FIELD_WIDTH as i32 - span) / 2;
        let origin_y = (FIELD_HEIGHT as i32 - span) / 2;

        let cards = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let col = i as i32 % GRID;
                let row = i as i32 / GRID;
                Card {
                    value,
                    rect: Rect::new(
                        origin_x + col * (CARD_SIZE + CARD_GAP),
                        origin_y + row * (CARD_SIZE + CARD_GAP),
                        CARD_SIZE as u32,
                        CARD_SIZE as u32,
                    ),
                    face: CardFace::Down,
                }
            })
            .collect();

        MemorySession {
            cards,
            first_pick: None,
            pending: None,
            pairs: 0,
        }
    }

    fn card_at(&self, x: i32, y: i32) -> Option<usize> {
        self.cards.iter().position(|card| contains_point(&card.rect, x, y))
    }

    fn reveal(&mut self, index: usize, now_ms: u64) {
        if self.cards[index].face != CardFace::Down {
            return;
        }
        self.cards[index].face = CardFace::Up;

        let Some(first) = self.first_pick.take() else {
            self.first_pick = Some(index);
            return;
        };

        if self.cards[first].value == self.cards[index].value {
            self.cards[first].face = CardFace::Matched;
            self.cards[index].face = CardFace::Matched;
            self.pairs += 1;
        } else {
            self.pending = Some(PendingFlip {
                cards: (first, index),
                until_ms: now_ms + MISMATCH_DELAY_MS,
            });
        }
    }

    fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.face == CardFace::Matched)
    }
}

impl Session for MemorySession {
    fn update(&mut self, input: &InputSnapshot, now_ms: u64) -> Option<SessionResult> {
        if let Some(flip) = self.pending {
            if now_ms < flip.until_ms {
                return None;
            }
            self.cards[flip.cards.0].face = CardFace::Down;
            self.cards[flip.cards.1].face = CardFace::Down;
            self.pending = None;
        }

        for (x, y) in input.clicks() {
            // A mismatch raised by an earlier click this frame freezes the board
            if self.pending.is_some() {
                break;
            }
            if let Some(index) = self.card_at(x, y) {
                self.reveal(index, now_ms);
            }
        }

        self.all_matched().then_some(SessionResult::Won)
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        clear(canvas, Color::RGB(30, 30, 30));

        for card in &self.cards {
            match card.face {
                CardFace::Down => fill_rect(canvas, card.rect, Color::RGB(100, 100, 200))?,
                CardFace::Up | CardFace::Matched => {
                    fill_rect(canvas, card.rect, Color::RGB(200, 200, 200))?;
                    let center = card.rect.center();
                    let label_y = center.y() - (GLYPH_HEIGHT * 6) as i32 / 2;
                    draw_text_centered(canvas, &card.value.to_string(), center.x(), label_y, Color::RGB(0, 0, 0), 6)?;
                }
            }
        }

        draw_text(canvas, &format!("Pairs: {}", self.pairs), 10, 10, Color::RGB(255, 255, 255), 3)
    }

    fn score(&self) -> u64 {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const ORDERED: [u8; 16] = [1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8];

    fn click_card(session: &MemorySession, index: usize) -> InputSnapshot {
        let center = session.cards[index].rect.center();
        InputSnapshot::default().with_click(center.x(), center.y())
    }

    #[test]
    fn test_deck_has_each_value_twice() {
        let game = MemorySession::new(StdRng::seed_from_u64(9));
        let mut values: Vec<u8> = game.cards.iter().map(|c| c.value).collect();
        values.sort();
        assert_eq!(values, ORDERED.to_vec());
    }

    #[test]
    fn test_grid_is_centred() {
        let game = MemorySession::with_values(&ORDERED);
        assert_eq!(game.cards[0].rect, Rect::new(170, 70, 100, 100));
        assert_eq!(game.cards[15].rect, Rect::new(530, 430, 100, 100));
    }

    #[test]
    fn test_match_locks_immediately() {
        let mut game = MemorySession::with_values(&ORDERED);
        game.update(&click_card(&game, 0), 0);
        game.update(&click_card(&game, 1), 10);

        assert_eq!(game.cards[0].face, CardFace::Matched);
        assert_eq!(game.cards[1].face, CardFace::Matched);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_mismatch_flips_back_after_delay() {
        let mut game = MemorySession::with_values(&ORDERED);
        game.update(&click_card(&game, 0), 0);
        game.update(&click_card(&game, 2), 100);
        assert_eq!(game.cards[2].face, CardFace::Up);

        // Clicks during the delay are ignored
        game.update(&click_card(&game, 5), 300);
        assert_eq!(game.cards[5].face, CardFace::Down);
        assert_eq!(game.cards[0].face, CardFace::Up);

        game.update(&InputSnapshot::default(), 700);
        assert_eq!(game.cards[0].face, CardFace::Down);
        assert_eq!(game.cards[2].face, CardFace::Down);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_clicking_a_revealed_card_does_nothing() {
        let mut game = MemorySession::with_values(&ORDERED);
        game.update(&click_card(&game, 0), 0);
        game.update(&click_card(&game, 0), 10);

        assert_eq!(game.first_pick, Some(0));
        assert!(game.pending.is_none());
    }

    #[test]
    fn test_gap_click_misses() {
        let mut game = MemorySession::with_values(&ORDERED);
        let input = InputSnapshot::default().with_click(275, 100);
        game.update(&input, 0);
        assert!(game.cards.iter().all(|c| c.face == CardFace::Down));
    }

    #[test]
    fn test_all_pairs_wins() {
        let mut game = MemorySession::with_values(&ORDERED);
        let mut result = None;
        for i in 0..16 {
            result = game.update(&click_card(&game, i), i as u64);
        }
        assert_eq!(result, Some(SessionResult::Won));
        assert_eq!(game.score(), 8);
    }
}
