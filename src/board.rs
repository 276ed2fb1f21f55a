//! Settled cells and row clearing.
//!
//! The board keeps the cells of every frozen piece as a set of points rather than
//! a dense grid. Each cell is occupied at most once and always lies inside
//! `0..width` x `0..height`.

use std::collections::HashSet;

use log::debug;

use crate::point::Point;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: Point,
    dead_points: HashSet<Point>,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Point::new(width, height),
            dead_points: HashSet::new(),
        }
    }

    /// Builds a board from already settled cells, dropping any outside the grid.
    pub fn with_dead_points<I>(width: i32, height: i32, points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut board = Self::new(width, height);
        board.absorb(points);
        board
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn dead_points(&self) -> &HashSet<Point> {
        &self.dead_points
    }

    pub fn is_inside(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.size.x && p.y >= 0 && p.y < self.size.y
    }

    pub fn is_settled(&self, p: Point) -> bool {
        self.dead_points.contains(&p)
    }

    /// Settles the given cells.
    ///
    /// Cells outside the grid cannot be stored without breaking the bounds
    /// invariant; they are dropped and the return value is `false`. A frozen piece
    /// only ends up here with a cell above row 0 when the stack has reached the top.
    pub fn absorb<I>(&mut self, points: I) -> bool
    where
        I: IntoIterator<Item = Point>,
    {
        let mut all_inside = true;
        for p in points {
            if !self.is_inside(p) {
                all_inside = false;
                continue;
            }
            let fresh = self.dead_points.insert(p);
            debug_assert!(fresh, "cell {p:?} settled twice");
        }
        all_inside
    }

    pub fn is_row_full(&self, y: i32) -> bool {
        (0..self.size.x).all(|x| self.dead_points.contains(&Point::new(x, y)))
    }

    pub fn filled_count_in_row(&self, y: i32) -> usize {
        self.dead_points.iter().filter(|p| p.y == y).count()
    }

    pub fn full_rows(&self) -> Vec<i32> {
        (0..self.size.y).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Removes every full row, dropping the cells above it by one.
    ///
    /// Single sweep from the top row down. After clearing row `y` the row now at
    /// `y` came from `y - 1`, which was already checked and not full, so the scan
    /// simply moves on. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        for y in 0..self.size.y {
            if !self.is_row_full(y) {
                continue;
            }
            self.dead_points = self
                .dead_points
                .drain()
                .filter(|p| p.y != y)
                .map(|p| if p.y < y { p.translate(0, 1) } else { p })
                .collect();
            cleared += 1;
        }
        if cleared > 0 {
            debug!("cleared {cleared} row(s), {} settled cells left", self.dead_points.len());
        }
        cleared
    }

    /// Same result as [`Board::clear_full_rows`], computed by collecting the full
    /// rows first and moving each surviving cell once by the number of cleared
    /// rows below it.
    pub fn clear_full_rows_batched(&mut self) -> u32 {
        let full = self.full_rows();
        if full.is_empty() {
            return 0;
        }
        self.dead_points = self
            .dead_points
            .drain()
            .filter(|p| !full.contains(&p.y))
            .map(|p| {
                let below = full.iter().filter(|&&row| row > p.y).count() as i32;
                p.translate(0, below)
            })
            .collect();
        full.len() as u32
    }

    pub fn total_filled_cells(&self) -> usize {
        self.dead_points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_drops_cells_outside() {
        let mut board = Board::new(4, 6);
        assert!(!board.absorb([Point::new(0, -1), Point::new(1, 0)]));
        assert_eq!(board.total_filled_cells(), 1);
        assert!(board.is_settled(Point::new(1, 0)));
    }

    #[test]
    fn single_row_clear_shifts_cell_above() {
        let mut board = Board::with_dead_points(
            4,
            6,
            [(0, 5), (1, 5), (2, 5), (3, 5), (1, 4)].map(Point::from),
        );
        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.total_filled_cells(), 1);
        assert!(board.is_settled(Point::new(1, 5)));
    }

    #[test]
    fn cells_below_cleared_row_stay_put() {
        let mut board = Board::with_dead_points(
            3,
            5,
            [(0, 2), (1, 2), (2, 2), (0, 4), (2, 0)].map(Point::from),
        );
        board.clear_full_rows();
        assert!(board.is_settled(Point::new(0, 4)));
        assert!(board.is_settled(Point::new(2, 1)));
        assert_eq!(board.total_filled_cells(), 2);
    }
}
