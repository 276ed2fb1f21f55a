use std::collections::HashSet;

use crate::point::{Direction, Point};
use crate::shape::{Rotation, ShapeDefinition, ShapeKind};

/// The falling tetromino: anchor, rotation state and shape.
///
/// A piece never owns the board. Every move is first tried against the settled cells
/// and the grid size handed in by the caller, and is only committed when the
/// trial finds no collision.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    kind: ShapeKind,
    shape: ShapeDefinition,
    origin: Point,
    rotation: Rotation,
}

impl Piece {
    /// Spawns at `(width / 2, 0)` with no rotation.
    pub fn spawn(kind: ShapeKind, grid_size: Point) -> Self {
        Self::new_at(kind, Point::new(grid_size.x / 2, 0))
    }

    pub fn new_at(kind: ShapeKind, origin: Point) -> Self {
        Self {
            kind,
            shape: kind.definition(),
            origin,
            rotation: Rotation::ZERO,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The four cells the piece covers: the anchor plus the three rotated offsets.
    ///
    /// `offset` shifts every cell and `extra_rotation` is added on top of the
    /// current rotation. Neither changes the piece, which is what lets the same
    /// accessor serve rendering and collision checks.
    pub fn occupied_cells(
        &self,
        offset: Option<Point>,
        extra_rotation: Option<Rotation>,
    ) -> [Point; 4] {
        let rotation = self.rotation.plus(extra_rotation.unwrap_or(Rotation::ZERO));
        let [b, c, d] = self.shape.rotated_offsets(rotation.radians());
        let shift = offset.unwrap_or_default();
        [self.origin, self.origin + b, self.origin + c, self.origin + d].map(|cell| cell + shift)
    }

    pub fn cells(&self) -> [Point; 4] {
        self.occupied_cells(None, None)
    }

    /// Turns the piece a quarter turn about its anchor. No wall kicks: a rotation
    /// that would collide is rejected outright.
    pub fn attempt_rotate(&mut self, dead_points: &HashSet<Point>, grid_size: Point) -> bool {
        let trial = self.occupied_cells(None, Some(Rotation::QUARTER));
        if collides(&trial, dead_points, grid_size) {
            return false;
        }
        self.rotation = self.rotation.plus(Rotation::QUARTER);
        true
    }

    pub fn attempt_move(
        &mut self,
        direction: Direction,
        dead_points: &HashSet<Point>,
        grid_size: Point,
    ) -> bool {
        let step = direction.unit();
        let trial = self.occupied_cells(Some(step), None);
        if collides(&trial, dead_points, grid_size) {
            return false;
        }
        self.origin = self.origin + step;
        true
    }
}

/// True if any cell is below the floor, past either side wall, or on a settled cell.
///
/// Cells above the top edge (`y < 0`) do not collide; pieces enter the grid from there.
pub fn collides(cells: &[Point], dead_points: &HashSet<Point>, grid_size: Point) -> bool {
    cells.iter().any(|cell| {
        cell.y >= grid_size.y
            || cell.x < 0
            || cell.x >= grid_size.x
            || dead_points.contains(cell)
    })
}
