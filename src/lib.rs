pub mod board;
pub mod config;
pub mod game;
pub mod input;
pub mod piece;
pub mod point;
pub mod shape;
pub mod terminal;
pub mod ui;

pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use game::{CellView, Command, GameEvent, GameLoop, ShapeProvider, Status};
pub use piece::Piece;
pub use point::{Direction, Point};
pub use shape::{Rotation, ShapeDefinition, ShapeKind};
