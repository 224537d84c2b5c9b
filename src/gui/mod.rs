//! Screen-Space GUI
//!
//! Everything drawn outside a running game: the game selection menu, its
//! animated backdrop and the loading transition.
//!
//! - [`GameMenu`] - scrolling list of games
//! - [`MenuBackground`] - pulsing colour and drifting squares behind the menu
//! - [`TransitionScreen`] - timed fade between menu and game

pub mod background;
pub mod menu;
pub mod transition;

pub use background::MenuBackground;
pub use menu::GameMenu;
pub use transition::{TransitionEnd, TransitionScreen};
