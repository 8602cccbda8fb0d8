use super::model::{Features, LearningMask, WeightTable, WEIGHT_ROWS};
use crate::{
    replay::{replay_plies, ReplayedPly},
    scan::scan_lines,
};
use tequila_core::board::Board;
use tracing::{debug, info, warn};

/// What a single end-of-match update did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LearnSummary {
    pub target: f64,
    pub updated: usize,
    pub masked: usize,
    pub rejected: usize,
    pub replay_failures: usize,
}

/// Signed training target for `player`: `125 - moves` for a win, `moves - 125`
/// for a loss and `0` for a draw, so quicker results weigh more.
pub fn outcome_target<B: Board>(board: &B, player: &str) -> f64 {
    let moves = board.move_history().len() as f64;
    let ceiling = WEIGHT_ROWS as f64;

    match board.winner() {
        Some(winner) if winner == player => ceiling - moves,
        Some(_) => moves - ceiling,
        None => 0.0,
    }
}

/// Gradient step on the per-ply weights from the result of a finished match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TequilaBotTrainer {
    learning_rate: f64,
    learn_from_draws: bool,
}

impl TequilaBotTrainer {
    pub fn new(learning_rate: f64, learn_from_draws: bool) -> Self {
        Self {
            learning_rate,
            learn_from_draws,
        }
    }

    /// Replays the match and, for every ply `player` chose with the evaluator,
    /// moves that ply's weights toward the outcome target:
    ///
    /// `w[i][c] += rate * f[c] * (y - score)` and `w[i][8] += rate * (y - score)`
    ///
    /// Plies masked out in `mask` are left alone, as are plies whose update
    /// would produce a non-finite weight.
    pub fn train<B: Board>(
        &self,
        weights: &mut WeightTable,
        mask: &LearningMask,
        board: &B,
        player: &str,
    ) -> LearnSummary {
        let target = outcome_target(board, player);
        let replay = replay_plies(board, player);
        let mut summary = LearnSummary {
            target,
            replay_failures: replay.failures,
            ..Default::default()
        };

        if board.winner().is_none() && !self.learn_from_draws {
            info!(moves = board.move_history().len(), "not learning from a draw");
            return summary;
        }

        for ReplayedPly { ply, board } in &replay.plies {
            let ply = *ply;

            if !mask.is_learnable(ply) {
                summary.masked += 1;
                continue;
            }

            let features = Features::from_scan(&scan_lines(board, player));
            let score = weights.score(ply, &features);
            let error = target - score;

            if weights.apply_update(ply, &features, error, self.learning_rate) {
                debug!(ply, score, target, error, features = ?features.0, "updated weights");
                summary.updated += 1;
            } else {
                warn!(ply, score, target, error, "rejected update with non-finite weights");
                summary.rejected += 1;
            }
        }

        summary
    }
}
