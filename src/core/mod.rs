//! Core module - pure game rules with no I/O
//!
//! Everything here is command-driven and single-threaded: the external
//! scheduler and input source feed discrete events into [`MatchState`],
//! which owns the grid and both pieces outright.

pub mod grid;
pub mod match_state;
pub mod pieces;
pub mod rng;

// Re-export commonly used types
pub use grid::Grid;
pub use match_state::{MatchState, Zone};
pub use pieces::{rotate_cw, spawn_shape, try_rotate_cw, Shape, Tetromino};
pub use rng::SimpleRng;
