use crate::agent::Agent;
use tequila_core::board::{Board, IllegalMoveError, Move, Position, CELL_COUNT};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("both agents are named {name}")]
    DuplicateName { name: String },
    #[error("{player} played {position}: {source}")]
    IllegalMove {
        player: String,
        position: Position,
        source: IllegalMoveError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// `None` for a draw.
    pub winner: Option<String>,
    pub moves: usize,
}

/// Plays one match on `board`, `first` moving first, until somebody completes a
/// line or the cube is full. Both agents are told about the final board.
///
/// An illegal move aborts the match without notifying the agents.
pub fn play_match<B: Board>(
    board: &mut B,
    first: &mut dyn Agent<B>,
    second: &mut dyn Agent<B>,
) -> Result<MatchResult, ArenaError> {
    if first.name() == second.name() {
        return Err(ArenaError::DuplicateName {
            name: first.name().to_owned(),
        });
    }

    board.clear();

    while board.winner().is_none() && board.move_history().len() < CELL_COUNT {
        let agent: &mut dyn Agent<B> = if board.move_history().len() % 2 == 0 {
            &mut *first
        } else {
            &mut *second
        };
        let position = agent.make_move(board);
        let player = agent.name().to_owned();

        if let Err(source) = board.make_move(Move::new(player.clone(), position)) {
            return Err(ArenaError::IllegalMove {
                player,
                position,
                source,
            });
        }

        debug!(%player, %position, "move played");
    }

    first.on_match_ends(board);
    second.on_match_ends(board);

    Ok(MatchResult {
        winner: board.winner().map(str::to_owned),
        moves: board.move_history().len(),
    })
}
