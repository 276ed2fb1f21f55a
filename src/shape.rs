use std::f64::consts::FRAC_PI_2;

use rand::Rng;

use crate::point::Point;

/// Rotation state of a piece, stored as a number of quarter turns.
///
/// The value is always reduced modulo 4, so the angle it stands for is one of
/// 0, π/2, π or 3π/2 no matter how many times a piece has been turned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rotation(u8);

impl Rotation {
    pub const ZERO: Rotation = Rotation(0);
    pub const QUARTER: Rotation = Rotation(1);

    pub const fn from_quarter_turns(turns: u32) -> Self {
        Rotation((turns % 4) as u8)
    }

    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    pub const fn plus(self, other: Rotation) -> Self {
        Rotation((self.0 + other.0) % 4)
    }

    pub fn radians(self) -> f64 {
        f64::from(self.0) * FRAC_PI_2
    }

    pub fn all() -> [Rotation; 4] {
        [Rotation(0), Rotation(1), Rotation(2), Rotation(3)]
    }
}

/// Rotates an offset about the anchor by `theta` radians.
///
/// x' = x·cos θ − y·sin θ, y' = y·cos θ + x·sin θ, each coordinate rounded to the
/// nearest integer on its own so that `cos(π/2)` evaluating to ~6e-17 instead of 0
/// cannot leak into the grid.
pub fn rotate_offset(offset: Point, theta: f64) -> Point {
    let (sin, cos) = theta.sin_cos();
    let x = f64::from(offset.x);
    let y = f64::from(offset.y);
    Point::new(
        (x * cos - y * sin).round() as i32,
        (y * cos + x * sin).round() as i32,
    )
}

/// The three offsets that, together with the anchor at (0, 0), make up a tetromino.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ShapeDefinition {
    offsets: [Point; 3],
}

impl ShapeDefinition {
    pub const fn new(b: Point, c: Point, d: Point) -> Self {
        Self { offsets: [b, c, d] }
    }

    pub fn offsets(&self) -> [Point; 3] {
        self.offsets
    }

    pub fn rotated_offsets(&self, theta: f64) -> [Point; 3] {
        self.offsets.map(|offset| rotate_offset(offset, theta))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShapeKind {
    I,
    Box,
    Mushroom,
    LeftS,
    RightS,
    LeftL,
    RightL,
}

const I: ShapeDefinition =
    ShapeDefinition::new(Point::new(-1, 0), Point::new(1, 0), Point::new(2, 0));
const BOX: ShapeDefinition =
    ShapeDefinition::new(Point::new(1, 1), Point::new(1, 0), Point::new(0, 1));
const MUSHROOM: ShapeDefinition =
    ShapeDefinition::new(Point::new(0, 1), Point::new(-1, 0), Point::new(1, 0));
const LEFT_S: ShapeDefinition =
    ShapeDefinition::new(Point::new(-1, 0), Point::new(0, -1), Point::new(1, -1));
const RIGHT_S: ShapeDefinition =
    ShapeDefinition::new(Point::new(1, 0), Point::new(0, 1), Point::new(-1, 1));
const LEFT_L: ShapeDefinition =
    ShapeDefinition::new(Point::new(-1, -1), Point::new(1, 0), Point::new(-1, 0));
const RIGHT_L: ShapeDefinition =
    ShapeDefinition::new(Point::new(1, -1), Point::new(1, 0), Point::new(-1, 0));

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::Box,
        ShapeKind::Mushroom,
        ShapeKind::LeftS,
        ShapeKind::RightS,
        ShapeKind::LeftL,
        ShapeKind::RightL,
    ];

    /// Shape table. `x` marks the anchor, which sits on the shape's pivot cell:
    ///
    /// ```text
    /// I:  #x##    Box:  x#    Mushroom: #x#
    ///                   ##               #
    ///
    /// LeftS:   ##   RightS: x#    LeftL: #      RightL:   #
    ///         #x           ##           #x#            #x#
    /// ```
    pub const fn definition(self) -> ShapeDefinition {
        match self {
            ShapeKind::I => I,
            ShapeKind::Box => BOX,
            ShapeKind::Mushroom => MUSHROOM,
            ShapeKind::LeftS => LEFT_S,
            ShapeKind::RightS => RIGHT_S,
            ShapeKind::LeftL => LEFT_L,
            ShapeKind::RightL => RIGHT_L,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
