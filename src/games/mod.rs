//! Mini-game registry
//!
//! [`GameKind::ALL`] is the menu order. Each variant knows its display
//! name and how to build and run its session.

pub mod breakout;
pub mod clicker;
pub mod falling_blocks;
pub mod flappy;
pub mod geometry_dash;
pub mod guess;
pub mod memory;
pub mod pong;
pub mod snake;

use crate::context::HubContext;
use crate::error::HubResult;
use crate::session::{SessionOutcome, run_session};
use breakout::BreakoutSession;
use clicker::ClickerSession;
use falling_blocks::{FallingBlocksSession, FallingStyle};
use flappy::FlappySession;
use geometry_dash::GeometryDashSession;
use guess::GuessSession;
use memory::MemorySession;
use pong::{PongSession, SetupChoice};
use rand::SeedableRng;
use rand::rngs::StdRng;
use snake::SnakeSession;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Snake,
    Dodge,
    Flappy,
    Breakout,
    Pong,
    Memory,
    Clicker,
    Asteroids,
    GuessTheNumber,
    GeometryDash,
}

impl GameKind {
    pub const ALL: [GameKind; 10] = [
        GameKind::Snake,
        GameKind::Dodge,
        GameKind::Flappy,
        GameKind::Breakout,
        GameKind::Pong,
        GameKind::Memory,
        GameKind::Clicker,
        GameKind::Asteroids,
        GameKind::GuessTheNumber,
        GameKind::GeometryDash,
    ];

    /// Label shown in the menu
    pub fn name(self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::Dodge => "Dodge",
            GameKind::Flappy => "Flappy",
            GameKind::Breakout => "Break out",
            GameKind::Pong => "Pong",
            GameKind::Memory => "Memory",
            GameKind::Clicker => "Clicker",
            GameKind::Asteroids => "Asteroids",
            GameKind::GuessTheNumber => "Guess the number",
            GameKind::GeometryDash => "Geometry dash",
        }
    }

    /// Build a fresh session and run it to completion
    pub fn launch(self, ctx: &mut HubContext) -> HubResult<SessionOutcome> {
        let rng = StdRng::seed_from_u64(rand::random());

        match self {
            GameKind::Snake => run_session(ctx, &mut SnakeSession::new(rng)),
            GameKind::Dodge => run_session(ctx, &mut FallingBlocksSession::new(FallingStyle::dodge(), rng)),
            GameKind::Flappy => run_session(ctx, &mut FlappySession::new(rng)),
            GameKind::Breakout => run_session(ctx, &mut BreakoutSession::new()),
            GameKind::Pong => match pong::choose_config(ctx)? {
                SetupChoice::Play(config) => run_session(ctx, &mut PongSession::new(config, rng)),
                SetupChoice::Exit(result) => Ok(SessionOutcome::unplayed(result)),
            },
            GameKind::Memory => run_session(ctx, &mut MemorySession::new(rng)),
            GameKind::Clicker => run_session(ctx, &mut ClickerSession::new()),
            GameKind::Asteroids => run_session(ctx, &mut FallingBlocksSession::new(FallingStyle::asteroids(), rng)),
            GameKind::GuessTheNumber => run_session(ctx, &mut GuessSession::new(rng)),
            GameKind::GeometryDash => run_session(ctx, &mut GeometryDashSession::new(rng)),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_menu_order() {
        let names: Vec<&str> = GameKind::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(
            names,
            vec![
                "Snake",
                "Dodge",
                "Flappy",
                "Break out",
                "Pong",
                "Memory",
                "Clicker",
                "Asteroids",
                "Guess the number",
                "Geometry dash",
            ]
        );
    }

    #[test]
    fn test_every_kind_registered_once() {
        let unique: HashSet<GameKind> = GameKind::ALL.iter().copied().collect();
        assert_eq!(unique.len(), GameKind::ALL.len());
    }
}
