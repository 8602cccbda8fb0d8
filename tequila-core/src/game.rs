use crate::{
    board::{Board, IllegalMoveError, Move, Position, CELL_COUNT, CUBE_SIZE},
    lines::lines_through,
};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameResult {
    Draw,
    Win(String),
}

/// Reference host for a two-player match on the 5x5x5 cube.
///
/// Moves are legal as long as the cell is inside the cube, still empty and the
/// game has not been decided. Turn order is left to whoever drives the game.
#[derive(Debug, Clone)]
pub struct Game {
    cells: Vec<Option<String>>,
    history: Vec<Move>,
    winner: Option<String>,
}

impl Game {
    pub fn new() -> Self {
        Self {
            cells: vec![None; CELL_COUNT],
            history: Vec::with_capacity(CELL_COUNT),
            winner: None,
        }
    }

    /// Builds a game by playing `moves` in order.
    pub fn from_moves<'a>(
        moves: impl IntoIterator<Item = (&'a str, Position)>,
    ) -> Result<Self, IllegalMoveError> {
        let mut game = Self::new();

        for (player, position) in moves {
            game.make_move(Move::new(player, position))?;
        }

        Ok(game)
    }

    pub fn turn_count(&self) -> usize {
        self.history.len()
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_finished() {
            return vec![];
        }

        Position::all()
            .filter(|position| self.cells[position.index()].is_none())
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.history.len() == CELL_COUNT
    }

    pub fn game_result(&self) -> Option<GameResult> {
        match &self.winner {
            Some(winner) => Some(GameResult::Win(winner.clone())),
            None if self.history.len() == CELL_COUNT => Some(GameResult::Draw),
            None => None,
        }
    }

    fn completes_line(&self, position: Position, player: &str) -> bool {
        lines_through(position).any(|line| {
            line.iter()
                .all(|cell| self.cells[cell.index()].as_deref() == Some(player))
        })
    }

    fn symbol_at(&self, position: Position) -> char {
        match (&self.cells[position.index()], self.history.first()) {
            (None, _) => '.',
            (Some(owner), Some(first)) if *owner == first.player => 'X',
            (Some(_), _) => 'O',
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for Game {
    fn field_value(&self, position: Position) -> Option<&str> {
        if !position.is_valid() {
            return None;
        }

        self.cells[position.index()].as_deref()
    }

    fn make_move(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        let position = mv.position;

        if !position.is_valid() {
            return Err(IllegalMoveError::OutOfBounds { position });
        }

        if self.is_finished() {
            return Err(IllegalMoveError::GameFinished);
        }

        if let Some(owner) = &self.cells[position.index()] {
            return Err(IllegalMoveError::Occupied {
                position,
                owner: owner.clone(),
            });
        }

        self.cells[position.index()] = Some(mv.player.clone());

        if self.completes_line(position, &mv.player) {
            self.winner = Some(mv.player.clone());
        }

        self.history.push(mv);

        Ok(())
    }

    fn move_history(&self) -> &[Move] {
        &self.history
    }

    fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.history.clear();
        self.winner = None;
    }
}

impl Display for Game {
    /// Renders the cube as five x-layers side by side.
    ///
    /// Rows are `y`, columns are `z`. The first player to move is shown as "X",
    /// the other one as "O".
    ///
    /// Example output for an empty cube (abridged):
    ///     x=0         x=1
    ///   0 1 2 3 4   0 1 2 3 4
    /// 0 . . . . .   . . . . .
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "move: {:3}  state: {}",
            self.history.len(),
            match self.game_result() {
                Some(GameResult::Win(winner)) => format!("{} wins", winner),
                Some(GameResult::Draw) => "draw".to_string(),
                None => "in progress".to_string(),
            }
        )?;

        let mut result = String::from("  ");
        for x in 0..CUBE_SIZE {
            result.push_str(&format!("    x={}     ", x));
        }
        result.push('\n');

        result.push_str("  ");
        for _ in 0..CUBE_SIZE {
            for z in 0..CUBE_SIZE {
                result.push_str(&format!("{} ", z));
            }
            result.push_str("  ");
        }
        result.push('\n');

        for y in 0..CUBE_SIZE {
            result.push_str(&format!("{} ", y));
            for x in 0..CUBE_SIZE {
                for z in 0..CUBE_SIZE {
                    result.push(self.symbol_at(Position::new(x, y, z)));
                    result.push(' ');
                }
                result.push_str("  ");
            }
            if y < CUBE_SIZE - 1 {
                result.push('\n');
            }
        }

        write!(f, "{}", result)
    }
}
