//! Match configuration
//!
//! Grid dimensions, the zone split column, and the gravity tick period are
//! all decided outside the engine. Validation happens once at construction;
//! a `MatchConfig` that exists is a valid one (fields are private).

use std::time::Duration;

use thiserror::Error;

use crate::core::pieces::MAX_SPAWN_WIDTH;
use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TICK_MS};

/// Configuration errors, raised only at construction time
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("zone split column {split_col} must lie strictly inside 0..{cols}")]
    SplitOutOfRange { split_col: usize, cols: usize },

    #[error("zone of width {width} cannot fit a spawned piece at its anchor")]
    ZoneTooNarrow { width: usize },
}

/// Validated match configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    rows: usize,
    cols: usize,
    split_col: usize,
    tick_period: Duration,
}

impl MatchConfig {
    /// Build a configuration, failing fast on invalid dimensions, an
    /// out-of-range split, or a zone too narrow to spawn into
    pub fn new(
        rows: usize,
        cols: usize,
        split_col: usize,
        tick_period: Duration,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::ZeroDimension { rows, cols });
        }
        if split_col == 0 || split_col >= cols {
            return Err(ConfigError::SplitOutOfRange { split_col, cols });
        }
        // Spawns anchor at width/2 inside the zone, so the widest spawn box
        // must still end within it
        for width in [split_col, cols - split_col] {
            if width / 2 + MAX_SPAWN_WIDTH > width {
                return Err(ConfigError::ZoneTooNarrow { width });
            }
        }
        Ok(Self {
            rows,
            cols,
            split_col,
            tick_period,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// First column of player 2's zone; player 1 owns columns left of it
    pub fn split_col(&self) -> usize {
        self.split_col
    }

    /// Cadence at which the external scheduler should call `tick()`.
    /// Stored for collaborators; the engine never reads the clock.
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }
}

impl Default for MatchConfig {
    /// 20x10 grid split at the middle column, 400ms gravity
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            split_col: DEFAULT_COLS / 2,
            tick_period: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}
