//! Match state module - the two-player controller
//!
//! Owns the shared grid and both active pieces. Commands arrive as discrete
//! events from external input/scheduler collaborators and are total: an
//! attempt that fails a precondition (zone, collision, terminal state) is a
//! silent no-op, observable only through the unchanged state.
//!
//! Within one tick, player 1 is fully processed (advance or lock-and-respawn)
//! before player 2, and the terminal check runs only after both. The game
//! ends exactly when a piece locked this tick and its replacement collides
//! at the spawn pose with zero displacement; a full board elsewhere never
//! ends the game on its own.

use crate::config::MatchConfig;
use crate::core::pieces::{try_rotate_cw, Tetromino};
use crate::core::rng::SimpleRng;
use crate::core::Grid;
use crate::types::{Direction, Player};

/// A player's half of the grid: the half-open column range `start..end`.
/// Lateral moves must keep the piece's bounding box inside it; rotation
/// kicks are deliberately not zone-checked, so a rotated piece may overhang
/// the split column until the player rotates it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    start: usize,
    end: usize,
}

impl Zone {
    fn for_player(player: Player, config: &MatchConfig) -> Self {
        match player {
            Player::One => Zone {
                start: 0,
                end: config.split_col(),
            },
            Player::Two => Zone {
                start: config.split_col(),
                end: config.cols(),
            },
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn width(&self) -> usize {
        self.end - self.start
    }

    /// Fixed spawn column for this zone
    pub fn spawn_x(&self) -> i32 {
        (self.start + self.width() / 2) as i32
    }

    /// Whether a bounding box of `width` columns anchored at `x` stays
    /// fully inside the zone
    fn admits_span(&self, x: i32, width: i32) -> bool {
        x >= self.start as i32 && x + width <= self.end as i32
    }
}

/// Complete match state: grid, both pieces, and the shared terminal flag
#[derive(Debug, Clone)]
pub struct MatchState {
    config: MatchConfig,
    grid: Grid,
    zones: [Zone; 2],
    pieces: [Tetromino; 2],
    rng: SimpleRng,
    lines_cleared: u32,
    game_over: bool,
}

impl MatchState {
    /// Start a match with freshly spawned pieces and an empty grid
    pub fn new(config: MatchConfig, seed: u32) -> Self {
        let grid = Grid::new(config.rows(), config.cols());
        let zones = [
            Zone::for_player(Player::One, &config),
            Zone::for_player(Player::Two, &config),
        ];
        let mut rng = SimpleRng::new(seed);
        let pieces = [
            Tetromino::spawn(rng.next_kind(), zones[0].spawn_x()),
            Tetromino::spawn(rng.next_kind(), zones[1].spawn_x()),
        ];

        Self {
            config,
            grid,
            zones,
            pieces,
            rng,
            lines_cleared: 0,
            game_over: false,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self, player: Player) -> &Tetromino {
        &self.pieces[player.index()]
    }

    pub fn zone(&self, player: Player) -> Zone {
        self.zones[player.index()]
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Total lines cleared since start/restart, for scoring collaborators
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    fn spawn(&mut self, player: Player) -> Tetromino {
        let kind = self.rng.next_kind();
        Tetromino::spawn(kind, self.zones[player.index()].spawn_x())
    }

    /// Attempt a one-column lateral move. Applied only when the bounding box
    /// stays inside the player's zone AND the displaced pose fits.
    pub fn move_piece(&mut self, player: Player, direction: Direction) {
        if self.game_over {
            return;
        }
        let i = player.index();
        let dx = direction.dx();
        let piece = &self.pieces[i];

        if !self.zones[i].admits_span(piece.x + dx, piece.width()) {
            return;
        }
        if self.grid.fits(piece, dx, 0) {
            self.pieces[i].x += dx;
        }
    }

    /// Attempt a clockwise rotation with wall-kick fallback; a rotation all
    /// five kick candidates reject leaves the piece entirely unchanged
    pub fn rotate(&mut self, player: Player) {
        if self.game_over {
            return;
        }
        let i = player.index();
        let grid = &self.grid;
        if let Some(rotated) = try_rotate_cw(&self.pieces[i], |shape, x, y| {
            grid.collides_at(shape, x, y)
        }) {
            self.pieces[i] = rotated;
        }
    }

    /// Drop the piece to rest directly above the first obstruction. Does not
    /// lock; the next tick's collision does that.
    pub fn hard_drop(&mut self, player: Player) {
        if self.game_over {
            return;
        }
        let i = player.index();
        while self.grid.fits(&self.pieces[i], 0, 1) {
            self.pieces[i].y += 1;
        }
    }

    /// One gravity step. Player 1 first, then player 2: advance a piece one
    /// row if it fits, otherwise lock it, clear full lines, and respawn at
    /// the zone anchor. The terminal check runs after both players, so a
    /// lock by player 1 is never short-circuited by player 2's.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }

        let mut locked = [false; 2];
        for player in Player::BOTH {
            let i = player.index();
            if self.grid.fits(&self.pieces[i], 0, 1) {
                self.pieces[i].y += 1;
            } else {
                self.grid.lock(&self.pieces[i]);
                self.lines_cleared += self.grid.clear_full_lines() as u32;
                self.pieces[i] = self.spawn(player);
                locked[i] = true;
            }
        }

        // Game over only for a player whose piece locked this tick and whose
        // replacement has no room at the spawn pose
        for i in 0..2 {
            if locked[i] && self.grid.collides(&self.pieces[i], 0, 0) {
                self.game_over = true;
            }
        }
    }

    /// Reinitialize to a running match: empty grid, fresh spawns for both
    /// players. The RNG stream continues rather than replaying.
    pub fn restart(&mut self) {
        self.grid.reset();
        self.pieces = [self.spawn(Player::One), self.spawn(Player::Two)];
        self.lines_cleared = 0;
        self.game_over = false;
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(MatchConfig::default(), 1)
    }
}
