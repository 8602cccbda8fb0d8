mod position_parser;

use position_parser::PositionParser;
use std::fmt::Display;
use thiserror::Error;

/// Edge length of the cube.
pub const CUBE_SIZE: usize = 5;
/// Number of cells in the cube.
pub const CELL_COUNT: usize = CUBE_SIZE * CUBE_SIZE * CUBE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Position {
    pub const ORIGIN: Position = Position::new(0, 0, 0);
    pub const CENTER: Position = Position::new(2, 2, 2);

    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    pub fn is_valid(self) -> bool {
        self.x < CUBE_SIZE && self.y < CUBE_SIZE && self.z < CUBE_SIZE
    }

    /// Flat index of the cell, `x` being the most significant axis.
    pub fn index(self) -> usize {
        (self.x * CUBE_SIZE + self.y) * CUBE_SIZE + self.z
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if CELL_COUNT <= index {
            return None;
        }

        Some(Self::new(
            index / (CUBE_SIZE * CUBE_SIZE),
            (index / CUBE_SIZE) % CUBE_SIZE,
            index % CUBE_SIZE,
        ))
    }

    /// Iterates over every cell in scan order: `x` outer, then `y`, then `z`.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).filter_map(Position::from_index)
    }

    /// Parses a position typed by a human.
    ///
    /// Accepted forms:
    /// - 1 2 3
    /// - 1,2,3
    /// - (1, 2, 3)
    /// - 123
    pub fn parse(input: &str) -> Option<Position> {
        PositionParser::new(input).parse()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A single entry of the move history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub player: String,
    pub position: Position,
}

impl Move {
    pub fn new(player: impl Into<String>, position: Position) -> Self {
        Self {
            player: player.into(),
            position,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("position {position} is outside of the cube")]
    OutOfBounds { position: Position },
    #[error("position {position} is already taken by {owner}")]
    Occupied { position: Position, owner: String },
    #[error("the game has already finished")]
    GameFinished,
}

/// What a player can see and do with the board handed over by the host.
pub trait Board: Clone {
    /// Name of the player owning the piece at `position`, `None` if the cell is empty.
    fn field_value(&self, position: Position) -> Option<&str>;

    fn make_move(&mut self, mv: Move) -> Result<(), IllegalMoveError>;

    fn move_history(&self) -> &[Move];

    fn winner(&self) -> Option<&str>;

    /// Removes every piece and forgets the history.
    fn clear(&mut self);

    fn is_empty_at(&self, position: Position) -> bool {
        self.field_value(position).is_none()
    }
}
