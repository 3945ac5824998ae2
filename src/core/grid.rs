//! Grid module - the shared playfield
//!
//! A `rows x cols` matrix of optional piece kinds, flat row-major storage.
//! Row 0 is the top. The grid also answers collision queries: a piece pose
//! collides when any occupied cell leaves the side or bottom edges or lands
//! on locked terrain. Cells above the top edge never collide on their own,
//! so pieces may spawn partially above the visible grid.

use crate::core::pieces::{Shape, Tetromino};
use crate::types::Cell;

/// The shared playfield, mutated only by lock/clear/reset
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Dimensions come from a validated config,
    /// so both are non-zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell content at `(row, col)`, for renderers and terrain setup
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Overwrite a single cell
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Occupancy at a signed row within a valid column: rows above the grid
    /// are never occupied, rows below it always are. Callers must keep
    /// `0 <= col < cols`.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        debug_assert!(col >= 0 && (col as usize) < self.cols);
        if row < 0 {
            return false;
        }
        if row as usize >= self.rows {
            return true;
        }
        self.cells[row as usize * self.cols + col as usize].is_some()
    }

    /// Whether a shape anchored at `(x, y)` collides with the walls, the
    /// floor, or locked terrain. Used directly by the rotation engine to
    /// probe kick candidates.
    pub fn collides_at(&self, shape: &Shape, x: i32, y: i32) -> bool {
        for (row, cols) in shape.iter().enumerate() {
            for (col, &v) in cols.iter().enumerate() {
                if v == 0 {
                    continue;
                }
                let new_x = x + col as i32;
                let new_y = y + row as i32;
                if new_x < 0 || new_x >= self.cols as i32 || new_y >= self.rows as i32 {
                    return true;
                }
                if new_y >= 0 && self.is_occupied(new_y, new_x) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether the piece, displaced by `(dx, dy)`, collides
    pub fn collides(&self, piece: &Tetromino, dx: i32, dy: i32) -> bool {
        self.collides_at(&piece.shape, piece.x + dx, piece.y + dy)
    }

    /// Strict negation of [`Grid::collides`], the polarity movement
    /// validation reads naturally in
    pub fn fits(&self, piece: &Tetromino, dx: i32, dy: i32) -> bool {
        !self.collides(piece, dx, dy)
    }

    /// Write the piece's kind into every cell it occupies. Unconditional:
    /// the caller guarantees the pose does not overlap terrain. Cells above
    /// the top edge are dropped.
    pub fn lock(&mut self, piece: &Tetromino) {
        for (row, col) in piece.cells() {
            let y = piece.y + row as i32;
            let x = piece.x + col as i32;
            if y >= 0 && (y as usize) < self.rows && x >= 0 && (x as usize) < self.cols {
                self.set(y as usize, x as usize, Some(piece.kind));
            }
        }
    }

    fn is_row_full(&self, row: usize) -> bool {
        let start = row * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Drop a full row: shift everything above it down one row and open a
    /// fresh empty row at the top
    fn collapse_row(&mut self, row: usize) {
        // memmove rows [0, row) into [1, row]
        self.cells.copy_within(0..row * self.cols, self.cols);
        for cell in &mut self.cells[0..self.cols] {
            *cell = None;
        }
    }

    /// Clear every full row, scanning bottom to top. After a collapse the
    /// same index is re-examined, since the row shifted into it may itself
    /// be full. Returns the number of rows cleared.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.rows;
        while row > 0 {
            row -= 1;
            if self.is_row_full(row) {
                self.collapse_row(row);
                cleared += 1;
                // Re-check the same row index on the next pass
                row += 1;
            }
        }
        cleared
    }

    /// Empty all cells, used on restart
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Count of occupied cells, handy in assertions
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn fill_row(grid: &mut Grid, row: usize) {
        for col in 0..grid.cols() {
            grid.set(row, col, Some(PieceKind::I));
        }
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(20, 10);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_is_occupied_virtual_rows() {
        let mut grid = Grid::new(4, 4);
        grid.set(2, 1, Some(PieceKind::T));

        assert!(grid.is_occupied(2, 1));
        assert!(!grid.is_occupied(2, 2));
        // Above the grid: never occupied
        assert!(!grid.is_occupied(-1, 0));
        assert!(!grid.is_occupied(-5, 3));
        // Below the grid: always occupied
        assert!(grid.is_occupied(4, 0));
        assert!(grid.is_occupied(100, 3));
    }

    #[test]
    fn test_collides_at_walls_and_floor() {
        let grid = Grid::new(20, 10);
        let piece = Tetromino::spawn(PieceKind::O, 0);

        assert!(!grid.collides(&piece, 0, 0));
        assert!(grid.collides(&piece, -1, 0), "left wall");
        assert!(grid.collides(&piece, 9, 0), "right wall");
        assert!(grid.collides(&piece, 0, 19), "floor");
        assert!(!grid.collides(&piece, 0, 18), "resting on the floor fits");
    }

    #[test]
    fn test_cells_above_grid_do_not_collide() {
        let grid = Grid::new(20, 10);
        let mut piece = Tetromino::spawn(PieceKind::T, 3);
        piece.y = -1;
        // Top row of the T is above the grid; still a legal pose
        assert!(!grid.collides(&piece, 0, 0));
    }

    #[test]
    fn test_collides_with_terrain() {
        let mut grid = Grid::new(20, 10);
        grid.set(1, 3, Some(PieceKind::L));

        let piece = Tetromino::spawn(PieceKind::O, 3);
        assert!(grid.collides(&piece, 0, 0));
        assert!(!grid.collides(&piece, 2, 0));
    }

    #[test]
    fn test_lock_writes_kind() {
        let mut grid = Grid::new(20, 10);
        let mut piece = Tetromino::spawn(PieceKind::S, 2);
        piece.y = 18;
        grid.lock(&piece);

        assert_eq!(grid.cell(18, 3), Some(PieceKind::S));
        assert_eq!(grid.cell(18, 4), Some(PieceKind::S));
        assert_eq!(grid.cell(19, 2), Some(PieceKind::S));
        assert_eq!(grid.cell(19, 3), Some(PieceKind::S));
        assert_eq!(grid.occupied_count(), 4);
    }

    #[test]
    fn test_lock_drops_cells_above_top() {
        let mut grid = Grid::new(20, 10);
        let mut piece = Tetromino::spawn(PieceKind::T, 3);
        piece.y = -1;
        grid.lock(&piece);

        // Only the bottom row of the T lands on the grid
        assert_eq!(grid.occupied_count(), 3);
        assert_eq!(grid.cell(0, 3), Some(PieceKind::T));
    }

    #[test]
    fn test_clear_single_full_line() {
        let mut grid = Grid::new(20, 10);
        fill_row(&mut grid, 19);
        grid.set(18, 4, Some(PieceKind::J));

        assert_eq!(grid.clear_full_lines(), 1);
        // The partial row above shifted down by one
        assert_eq!(grid.cell(19, 4), Some(PieceKind::J));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_clear_rechecks_shifted_row() {
        let mut grid = Grid::new(6, 4);
        // Two full rows separated by a partial one
        fill_row(&mut grid, 5);
        grid.set(4, 0, Some(PieceKind::Z));
        fill_row(&mut grid, 3);

        assert_eq!(grid.clear_full_lines(), 2);
        assert_eq!(grid.cell(5, 0), Some(PieceKind::Z));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_clear_adjacent_full_lines() {
        let mut grid = Grid::new(20, 10);
        for row in 16..20 {
            fill_row(&mut grid, row);
        }
        grid.set(15, 0, Some(PieceKind::I));

        assert_eq!(grid.clear_full_lines(), 4);
        assert_eq!(grid.cell(19, 0), Some(PieceKind::I));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_clear_preserves_rows_above_in_order() {
        let mut grid = Grid::new(20, 10);
        grid.set(10, 2, Some(PieceKind::T));
        grid.set(12, 7, Some(PieceKind::S));
        fill_row(&mut grid, 15);

        assert_eq!(grid.clear_full_lines(), 1);
        assert_eq!(grid.cell(11, 2), Some(PieceKind::T));
        assert_eq!(grid.cell(13, 7), Some(PieceKind::S));
    }

    #[test]
    fn test_clear_nothing_when_no_full_rows() {
        let mut grid = Grid::new(20, 10);
        grid.set(19, 0, Some(PieceKind::O));
        assert_eq!(grid.clear_full_lines(), 0);
        assert_eq!(grid.cell(19, 0), Some(PieceKind::O));
    }

    #[test]
    fn test_reset_empties_grid() {
        let mut grid = Grid::new(20, 10);
        fill_row(&mut grid, 19);
        grid.reset();
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_fits_is_negation_of_collides() {
        let mut grid = Grid::new(20, 10);
        grid.set(10, 4, Some(PieceKind::L));

        let piece = Tetromino::spawn(PieceKind::T, 3);
        for dx in -4..=4 {
            for dy in -2..=20 {
                assert_eq!(grid.fits(&piece, dx, dy), !grid.collides(&piece, dx, dy));
            }
        }
    }
}
