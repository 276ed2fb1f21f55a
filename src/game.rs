use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::config::GameConfig;
use crate::piece::{collides, Piece};
use crate::point::{Direction, Point};
use crate::shape::ShapeKind;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Running,
    Paused,
    /// A piece could not enter the grid. Nothing moves any more.
    ToppedOut,
}

/// Everything that can change the game, from the keyboard or elsewhere.
/// The timer is not a command: it drives [`GameLoop::step`] directly.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Rotate,
    Move(Direction),
    TogglePause,
    Quit,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceSpawned(ShapeKind),
    PieceMoved(Direction),
    PieceRotated,
    PieceFrozen,
    RowsCleared(u32),
    Paused,
    Resumed,
    ToppedOut,
}

/// What a renderer draws in one cell. The active piece wins over settled cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellView {
    Empty,
    Settled,
    Active,
}

// ============================================================================
// Shape Provider Trait
// ============================================================================

pub trait ShapeProvider {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Uniform pick over the seven shapes.
pub struct RandomShapeProvider<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomShapeProvider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomShapeProvider<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ShapeProvider for RandomShapeProvider<R> {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::random(&mut self.rng)
    }
}

/// Repeats a fixed list of shapes forever.
pub struct SequenceShapeProvider {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl SequenceShapeProvider {
    pub fn new(shapes: Vec<ShapeKind>) -> Self {
        assert!(!shapes.is_empty(), "shape sequence must not be empty");
        Self { shapes, index: 0 }
    }
}

impl ShapeProvider for SequenceShapeProvider {
    fn next_shape(&mut self) -> ShapeKind {
        let shape = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        shape
    }
}

// ============================================================================
// Game Loop
// ============================================================================

/// Owns the board and the active piece. Every mutation goes through
/// [`GameLoop::apply`] or [`GameLoop::step`], so one caller drives the game at a time.
pub struct GameLoop {
    pub board: Board,
    pub piece: Piece,
    pub status: Status,
    provider: Box<dyn ShapeProvider>,
    events: Vec<GameEvent>,
}

impl GameLoop {
    pub fn new(config: &GameConfig) -> Self {
        let provider: Box<dyn ShapeProvider> = match config.seed {
            Some(seed) => Box::new(RandomShapeProvider::seeded(seed)),
            None => Box::new(RandomShapeProvider::from_entropy()),
        };
        Self::with_provider(Board::new(config.width, config.height), provider)
    }

    pub fn with_provider(board: Board, mut provider: Box<dyn ShapeProvider>) -> Self {
        let first = provider.next_shape();
        let piece = Piece::spawn(first, board.size());
        let mut game = Self {
            board,
            piece,
            status: Status::Running,
            provider,
            events: Vec::new(),
        };
        game.enter(first);
        game
    }

    /// Starts from a prepared board and piece. Later pieces come from a random provider.
    pub fn with_board(board: Board, piece: Piece) -> Self {
        Self {
            board,
            piece,
            status: Status::Running,
            provider: Box::new(RandomShapeProvider::from_entropy()),
            events: Vec::new(),
        }
    }

    pub fn set_provider(&mut self, provider: Box<dyn ShapeProvider>) {
        self.provider = provider;
    }

    pub fn grid_size(&self) -> Point {
        self.board.size()
    }

    pub fn is_topped_out(&self) -> bool {
        self.status == Status::ToppedOut
    }

    /// One timer tick: the piece falls a row, or freezes if it cannot.
    pub fn step(&mut self) {
        if self.status != Status::Running {
            return;
        }
        if !self.piece.attempt_move(Direction::Down, self.board.dead_points(), self.board.size()) {
            self.freeze_and_spawn();
        }
    }

    /// Applies one command. Returns true if the game changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::TogglePause => self.toggle_pause(),
            Command::Quit => false,
            _ if self.status != Status::Running => false,
            Command::Rotate => {
                let rotated = self
                    .piece
                    .attempt_rotate(self.board.dead_points(), self.board.size());
                if rotated {
                    self.events.push(GameEvent::PieceRotated);
                }
                rotated
            }
            Command::Move(direction) => {
                let moved = self
                    .piece
                    .attempt_move(direction, self.board.dead_points(), self.board.size());
                if moved {
                    self.events.push(GameEvent::PieceMoved(direction));
                }
                moved
            }
        }
    }

    fn toggle_pause(&mut self) -> bool {
        match self.status {
            Status::Running => {
                self.status = Status::Paused;
                self.events.push(GameEvent::Paused);
                true
            }
            Status::Paused => {
                self.status = Status::Running;
                self.events.push(GameEvent::Resumed);
                true
            }
            Status::ToppedOut => false,
        }
    }

    fn freeze_and_spawn(&mut self) {
        let cells = self.piece.cells();
        let fits = self.board.absorb(cells);
        self.events.push(GameEvent::PieceFrozen);
        debug!("froze {:?} at {:?}", self.piece.kind(), self.piece.origin());

        let rows = self.board.clear_full_rows();
        if rows > 0 {
            self.events.push(GameEvent::RowsCleared(rows));
        }

        if !fits {
            self.top_out();
            return;
        }
        self.spawn_next_piece();
    }

    pub fn spawn_next_piece(&mut self) {
        let kind = self.provider.next_shape();
        self.piece = Piece::spawn(kind, self.board.size());
        self.enter(kind);
    }

    fn enter(&mut self, kind: ShapeKind) {
        if collides(&self.piece.cells(), self.board.dead_points(), self.board.size()) {
            self.top_out();
            return;
        }
        debug!("spawned {kind:?}");
        self.events.push(GameEvent::PieceSpawned(kind));
    }

    fn top_out(&mut self) {
        info!(
            "stack reached the top with {} settled cells",
            self.board.total_filled_cells()
        );
        self.status = Status::ToppedOut;
        self.events.push(GameEvent::ToppedOut);
    }

    /// Grid snapshot for renderers, indexed `[y][x]`.
    pub fn cell_views(&self) -> Vec<Vec<CellView>> {
        let size = self.board.size();
        let mut views = vec![vec![CellView::Empty; size.x as usize]; size.y as usize];

        for p in self.board.dead_points() {
            views[p.y as usize][p.x as usize] = CellView::Settled;
        }
        if !self.is_topped_out() {
            for p in self.piece.cells() {
                if self.board.is_inside(p) {
                    views[p.y as usize][p.x as usize] = CellView::Active;
                }
            }
        }

        views
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn fill_row(board: &mut Board, y: i32) {
        let cells: Vec<Point> = (0..board.width())
            .map(|x| Point::new(x, y))
            .filter(|p| !board.is_settled(*p))
            .collect();
        board.absorb(cells);
    }

    pub fn fill_row_with_gap(board: &mut Board, y: i32, gap_x: i32) {
        let cells: Vec<Point> = (0..board.width())
            .filter(|&x| x != gap_x)
            .map(|x| Point::new(x, y))
            .filter(|p| !board.is_settled(*p))
            .collect();
        board.absorb(cells);
    }

    pub fn sequence(shapes: &[ShapeKind]) -> Box<dyn ShapeProvider> {
        Box::new(SequenceShapeProvider::new(shapes.to_vec()))
    }
}
