//! Game Selection Menu
//!
//! A scrolling list of registered games. Only `visible_limit` entries are
//! drawn at once; the window scrolls just enough to keep the selection in
//! view.

use crate::games::GameKind;
use crate::render::fill_rect;
use crate::text::{draw_text, draw_text_centered};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Number of entries shown at once
pub const VISIBLE_LIMIT: usize = 6;

/// Configuration for menu appearance
#[derive(Debug, Clone)]
pub struct MenuStyle {
    /// Left edge of every entry box
    pub left: i32,

    /// Top of the first visible entry
    pub top: i32,

    /// Distance between the tops of consecutive entries
    pub row_spacing: i32,

    pub box_width: u32,
    pub box_height: u32,

    /// Box colour of the selected entry
    pub highlight_color: Color,

    /// Box colour of every other entry
    pub item_color: Color,

    pub text_color: Color,

    /// Colour of the "k/n" indicator and footer
    pub info_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            left: 200,
            top: 120,
            row_spacing: 60,
            box_width: 400,
            box_height: 50,
            highlight_color: Color::RGB(0, 200, 255),
            item_color: Color::RGB(80, 80, 120),
            text_color: Color::RGB(255, 255, 255),
            info_color: Color::RGB(180, 180, 200),
        }
    }
}

/// Selection and scroll state over the game registry
///
/// Navigation clamps at both ends instead of wrapping.
pub struct GameMenu {
    games: Vec<GameKind>,
    selected_index: usize,
    scroll_offset: usize,
    visible_limit: usize,
    style: MenuStyle,
}

impl GameMenu {
    pub fn new(games: Vec<GameKind>) -> Self {
        GameMenu {
            games,
            selected_index: 0,
            scroll_offset: 0,
            visible_limit: VISIBLE_LIMIT,
            style: MenuStyle::default(),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Move selection down one entry (no-op on the last entry)
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.games.len() {
            self.selected_index += 1;
            if self.selected_index >= self.scroll_offset + self.visible_limit {
                self.scroll_offset = self.selected_index + 1 - self.visible_limit;
            }
        }
    }

    /// Move selection up one entry (no-op on the first entry)
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            if self.selected_index < self.scroll_offset {
                self.scroll_offset = self.selected_index;
            }
        }
    }

    /// The game under the cursor
    pub fn confirm(&self) -> Option<GameKind> {
        self.games.get(self.selected_index).copied()
    }

    /// Entries inside the scroll window, with their registry index
    pub fn visible(&self) -> impl Iterator<Item = (usize, GameKind)> + '_ {
        self.games
            .iter()
            .copied()
            .enumerate()
            .skip(self.scroll_offset())
            .take(self.visible_limit)
    }

    /// Draw entries, position indicator and an optional footer line
    ///
    /// The background is not cleared here; the caller draws it first.
    pub fn render(&self, canvas: &mut Canvas<Window>, footer: Option<&str>) -> Result<(), String> {
        let (screen_width, screen_height) = canvas.logical_size();
        let center_x = screen_width as i32 / 2;
        let style = &self.style;

        draw_text_centered(canvas, "GAME HUB", center_x, 40, style.text_color, 6)?;

        for (row, (index, game)) in self.visible().enumerate() {
            let entry = Rect::new(
                style.left,
                style.top + row as i32 * style.row_spacing,
                style.box_width,
                style.box_height,
            );
            let color = if index == self.selected_index {
                style.highlight_color
            } else {
                style.item_color
            };
            fill_rect(canvas, entry, color)?;
            draw_text(canvas, game.name(), entry.x() + 20, entry.y() + 15, style.text_color, 3)?;
        }

        if !self.is_empty() {
            let info = format!("{}/{}", self.selected_index + 1, self.len());
            draw_text(
                canvas,
                &info,
                screen_width as i32 - 120,
                screen_height as i32 - 40,
                style.info_color,
                3,
            )?;
        }

        if let Some(footer) = footer {
            draw_text(canvas, footer, 10, screen_height as i32 - 30, style.info_color, 2)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn full_menu() -> GameMenu {
        GameMenu::new(GameKind::ALL.to_vec())
    }

    fn assert_invariants(menu: &GameMenu) {
        let count = menu.len();
        assert!(menu.selected_index() < count);
        assert!(menu.scroll_offset() <= menu.selected_index());
        assert!(menu.selected_index() < menu.scroll_offset() + VISIBLE_LIMIT);
        assert!(menu.scroll_offset() <= count.saturating_sub(VISIBLE_LIMIT));
    }

    #[test]
    fn test_starts_at_top() {
        let menu = full_menu();
        assert_eq!(menu.selected_index(), 0);
        assert_eq!(menu.scroll_offset(), 0);
        assert_eq!(menu.confirm(), Some(GameKind::Snake));
    }

    #[test]
    fn test_navigation_clamps() {
        let mut menu = full_menu();
        menu.select_previous();
        assert_eq!(menu.selected_index(), 0);

        for _ in 0..20 {
            menu.select_next();
        }
        assert_eq!(menu.selected_index(), 9);
        assert_eq!(menu.scroll_offset(), 4);
        assert_eq!(menu.confirm(), Some(GameKind::GeometryDash));
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut menu = full_menu();
        for _ in 0..6 {
            menu.select_next();
        }
        assert_eq!(menu.selected_index(), 6);
        assert_eq!(menu.scroll_offset(), 1);

        // Moving back up inside the window does not scroll
        for _ in 0..5 {
            menu.select_previous();
        }
        assert_eq!(menu.selected_index(), 1);
        assert_eq!(menu.scroll_offset(), 1);

        menu.select_previous();
        assert_eq!(menu.scroll_offset(), 0);
    }

    #[test]
    fn test_invariants_hold_for_any_sequence() {
        let mut menu = full_menu();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            if rng.random_bool(0.5) {
                menu.select_next();
            } else {
                menu.select_previous();
            }
            assert_invariants(&menu);
        }
    }

    #[test]
    fn test_visible_window() {
        let mut menu = full_menu();
        for _ in 0..9 {
            menu.select_next();
        }
        let visible: Vec<usize> = menu.visible().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_short_list_never_scrolls() {
        let mut menu = GameMenu::new(vec![GameKind::Pong, GameKind::Memory]);
        menu.select_next();
        menu.select_next();
        assert_eq!(menu.selected_index(), 1);
        assert_eq!(menu.scroll_offset(), 0);
        assert_eq!(menu.visible().count(), 2);
    }

    #[test]
    fn test_empty_menu_confirms_nothing() {
        let mut menu = GameMenu::new(Vec::new());
        menu.select_next();
        menu.select_previous();
        assert!(menu.is_empty());
        assert_eq!(menu.confirm(), None);
    }
}
