use std::ops::Add;

/// Grid coordinate. Origin is the top-left cell, y grows downward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub const fn add(self, other: Point) -> Self {
        self.translate(other.x, other.y)
    }

    pub fn equals(&self, other: &Point) -> bool {
        self == other
    }

    /// Moves one row down in place.
    pub fn down(&mut self) {
        self.y += 1;
    }

    /// Moves one column left in place.
    pub fn left(&mut self) {
        self.x -= 1;
    }

    /// Moves one column right in place.
    pub fn right(&mut self) {
        self.x += 1;
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::add(self, rhs)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Directions a piece may be moved in. There is no `Up`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn unit(self) -> Point {
        match self {
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
        }
    }
}
