//! duotris - rules engine for a simultaneous two-player falling-block game
//!
//! One shared grid, split into a left and a right zone; each player steers an
//! independent falling piece inside their half. The engine is the pure state
//! machine: geometry, gravity, collision, wall-kick rotation, line clearing,
//! and the shared game-over flag. Rendering, key mapping, and the gravity
//! timer live outside and talk to the engine through [`MatchState`]'s command
//! and query surface.
//!
//! ```
//! use duotris::{Direction, MatchConfig, MatchState, Player};
//!
//! let mut game = MatchState::new(MatchConfig::default(), 42);
//! game.move_piece(Player::One, Direction::Left);
//! game.rotate(Player::Two);
//! game.tick();
//! assert!(!game.is_game_over());
//! ```

pub mod config;
pub mod core;
pub mod types;

pub use config::{ConfigError, MatchConfig};
pub use core::{Grid, MatchState, Tetromino, Zone};
pub use types::{Cell, Direction, PieceKind, Player};
