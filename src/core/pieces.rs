//! Pieces module - tetromino geometry and the wall-kick rotation engine
//!
//! Shapes are small rectangular 0/1 occupancy matrices (4x1 up to 2x3),
//! rotated 90 degrees clockwise by matrix transposition. Rotation state and
//! shape live in one record and are only ever committed together.
//! Kick tables follow the Super Rotation System wall-kick fallback:
//! the I piece has its own table, all other families share one.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Occupancy matrix of a piece, row-major, bounded 4x4
pub type Shape = ArrayVec<ArrayVec<u8, 4>, 4>;

/// Kick offset candidate `(dx, dy)`, y positive downward
pub type KickOffset = (i32, i32);

/// Five candidates per origin rotation state, tried strictly in order
pub type KickTable = [[KickOffset; 5]; 4];

/// Wall kicks shared by J, L, S, T, Z and O (O always passes the first
/// candidate since its rotated shape equals the original)
const STANDARD_KICKS: KickTable = [
    // 0>>1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1>>2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2>>3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3>>0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// Wall kicks for the I piece
const I_KICKS: KickTable = [
    // 0>>1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1>>2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2>>3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3>>0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Kick table for a piece family, keyed by the family enum
pub fn kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &STANDARD_KICKS,
    }
}

/// Widest spawn bounding box across the families (the 2x3 shapes).
/// Configuration validation uses this to reject zones no spawn fits in.
pub const MAX_SPAWN_WIDTH: usize = 3;

fn shape_from(rows: &[&[u8]]) -> Shape {
    rows.iter().map(|row| row.iter().copied().collect()).collect()
}

/// Canonical spawn-orientation shape for a family (rotation state 0)
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        // Vertical: a 4-wide spawn box would not fit a narrow zone anchor
        PieceKind::I => shape_from(&[&[1], &[1], &[1], &[1]]),
        PieceKind::O => shape_from(&[&[1, 1], &[1, 1]]),
        PieceKind::T => shape_from(&[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::S => shape_from(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::Z => shape_from(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::J => shape_from(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => shape_from(&[&[0, 0, 1], &[1, 1, 1]]),
    }
}

/// Rotate an occupancy matrix 90 degrees clockwise.
/// An `m x n` matrix becomes `n x m` with `new[i][j] = old[m-1-j][i]`.
pub fn rotate_cw(shape: &Shape) -> Shape {
    let m = shape.len();
    let n = shape[0].len();
    (0..n)
        .map(|i| (0..m).map(|j| shape[m - 1 - j][i]).collect())
        .collect()
}

/// An active falling piece: family, occupancy matrix, bounding-box anchor
/// (top-left, grid coordinates, y positive downward), and the clockwise
/// quarter-turn counter used for kick lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
    pub rotation: u8,
}

impl Tetromino {
    /// Spawn a piece at the given column, top of the grid, rotation state 0
    pub fn spawn(kind: PieceKind, x: i32) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
            x,
            y: 0,
            rotation: 0,
        }
    }

    /// Bounding-box width in columns
    pub fn width(&self) -> i32 {
        self.shape[0].len() as i32
    }

    /// Bounding-box height in rows
    pub fn height(&self) -> i32 {
        self.shape.len() as i32
    }

    /// Occupied cells as `(row, col)` offsets within the bounding box
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.shape.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|&(_, &v)| v == 1)
                .map(move |(col, _)| (row, col))
        })
    }
}

/// Attempt a clockwise rotation with wall-kick fallback.
///
/// `collides_at(shape, x, y)` must report whether the shape anchored at
/// `(x, y)` overlaps terrain or leaves the playfield. Candidates from the
/// family's kick table are tried in order; the first that fits yields the
/// committed piece (shape, anchor, and advanced rotation state together).
/// Returns `None` when all five candidates collide, leaving the caller's
/// piece untouched.
pub fn try_rotate_cw(
    piece: &Tetromino,
    collides_at: impl Fn(&Shape, i32, i32) -> bool,
) -> Option<Tetromino> {
    let rotated = rotate_cw(&piece.shape);
    let kicks = &kick_table(piece.kind)[piece.rotation as usize];

    for &(dx, dy) in kicks.iter() {
        let x = piece.x + dx;
        let y = piece.y + dy;
        if !collides_at(&rotated, x, y) {
            return Some(Tetromino {
                kind: piece.kind,
                shape: rotated,
                x,
                y,
                rotation: (piece.rotation + 1) % 4,
            });
        }
    }

    None
}
