use tequila_core::board::Board;
use tracing::warn;

/// Board as it stood right after one of the player's moves.
#[derive(Debug, Clone)]
pub struct ReplayedPly<B> {
    /// Index of the move in the history.
    pub ply: usize,
    pub board: B,
}

#[derive(Debug, Clone)]
pub struct Replay<B> {
    pub plies: Vec<ReplayedPly<B>>,
    /// Number of history moves the board refused to replay.
    pub failures: usize,
}

/// Replays the move history of `board` on an empty copy and snapshots the
/// board after every move made by `player`.
///
/// A move that cannot be replayed is logged and skipped; replay goes on with
/// the next one.
pub fn replay_plies<B: Board>(board: &B, player: &str) -> Replay<B> {
    let mut replay = board.clone();
    replay.clear();

    let mut plies = vec![];
    let mut failures = 0;

    for (ply, mv) in board.move_history().iter().enumerate() {
        if let Err(err) = replay.make_move(mv.clone()) {
            warn!(ply, player = %mv.player, position = %mv.position, %err, "failed to replay move");
            failures += 1;
            continue;
        }

        if mv.player == player {
            plies.push(ReplayedPly {
                ply,
                board: replay.clone(),
            });
        }
    }

    Replay { plies, failures }
}
