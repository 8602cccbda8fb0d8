use tequila_core::board::{Board, Position};

/// A player as seen by the host running the match.
///
/// The host calls [`Agent::make_move`] whenever it is this player's turn and
/// [`Agent::on_match_ends`] once with the final board. Neither call reports
/// errors back to the host.
pub trait Agent<B: Board> {
    fn name(&self) -> &str;
    fn make_move(&mut self, board: &B) -> Position;
    fn on_match_ends(&mut self, board: &B);
}
