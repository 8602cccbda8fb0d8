use super::model::{Features, WeightTable};
use crate::scan::scan_lines;
use tequila_core::board::{Board, Move, Position, CELL_COUNT};

/// Evaluator scores of every cell after a hypothetical move there.
///
/// Cells that cannot be played keep `-inf` and are flagged as not playable.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGrid {
    scores: [f64; CELL_COUNT],
    playable: [bool; CELL_COUNT],
}

impl ScoreGrid {
    pub fn score(&self, position: Position) -> f64 {
        self.scores[position.index()]
    }

    pub fn is_playable(&self, position: Position) -> bool {
        self.playable[position.index()]
    }

    /// Best playable cell in scan order.
    ///
    /// A later cell replaces the current best only with a strictly greater score,
    /// so ties go to the earliest cell. The first playable cell is always a
    /// candidate, even when every score is `-inf`.
    pub fn best(&self) -> Option<Position> {
        let mut best: Option<(Position, f64)> = None;

        for position in Position::all().filter(|&position| self.is_playable(position)) {
            let score = self.score(position);

            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((position, score)),
            }
        }

        best.map(|(position, _)| position)
    }
}

/// Plays `player` on every empty cell of a copy of `board` and scores the result
/// with the weights of the current ply.
pub fn score_moves<B: Board>(board: &B, player: &str, weights: &WeightTable) -> ScoreGrid {
    let ply = board.move_history().len();
    let mut grid = ScoreGrid {
        scores: [f64::NEG_INFINITY; CELL_COUNT],
        playable: [false; CELL_COUNT],
    };

    for position in Position::all() {
        if !board.is_empty_at(position) {
            continue;
        }

        let mut copy = board.clone();
        if copy.make_move(Move::new(player, position)).is_err() {
            continue;
        }

        let features = Features::from_scan(&scan_lines(&copy, player));
        grid.scores[position.index()] = weights.score(ply, &features);
        grid.playable[position.index()] = true;
    }

    grid
}

/// One-ply greedy choice: the cell whose resulting board scores highest.
pub fn select_move<B: Board>(board: &B, player: &str, weights: &WeightTable) -> Option<Position> {
    score_moves(board, player, weights).best()
}
