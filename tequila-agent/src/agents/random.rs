use crate::agent::Agent;
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};
use tequila_core::board::{Board, Position};

pub const NAME: &str = "RandomPlayer";

/// Plays a uniformly random empty cell.
#[derive(Debug)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Board> Agent<B> for RandomPlayer {
    fn name(&self) -> &str {
        NAME
    }

    fn make_move(&mut self, board: &B) -> Position {
        Position::all()
            .filter(|&position| board.is_empty_at(position))
            .choose(&mut self.rng)
            .unwrap_or(Position::ORIGIN)
    }

    fn on_match_ends(&mut self, _board: &B) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tequila_core::{board::Move, game::Game};

    #[test]
    fn test_plays_empty_cells() {
        let mut player = RandomPlayer::with_seed(7);
        let mut game = Game::new();

        for turn in 0..20 {
            if game.is_finished() {
                break;
            }

            let position = Agent::<Game>::make_move(&mut player, &game);
            assert!(game.is_empty_at(position));

            let name = if turn % 2 == 0 { "black" } else { "white" };
            game.make_move(Move::new(name, position)).unwrap();
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let game = Game::new();
        let mut a = RandomPlayer::with_seed(42);
        let mut b = RandomPlayer::with_seed(42);

        for _ in 0..5 {
            assert_eq!(
                Agent::<Game>::make_move(&mut a, &game),
                Agent::<Game>::make_move(&mut b, &game)
            );
        }
    }
}
