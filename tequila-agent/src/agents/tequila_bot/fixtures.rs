use tequila_core::{
    board::{Board, Move, Position, CUBE_SIZE},
    game::Game,
};

fn colored(position: Position) -> bool {
    // (x + 2y + 4z) mod 8 falls in both halves of its range on every line
    (position.x + 2 * position.y + 4 * position.z) % 8 < 4
}

/// Fills every cell except `open` without completing any line.
pub fn nearly_full_board(open: &[Position], first: &str, second: &str) -> Game {
    let mut game = Game::new();

    for position in Position::all().filter(|position| !open.contains(position)) {
        let player = if colored(position) { first } else { second };
        game.make_move(Move::new(player, position)).unwrap();
    }

    assert_eq!(game.winner(), None);
    game
}

/// A game of `length` moves that `winner` takes with its last move on row
/// `(4, 4, *)`. `winner` moves first when `length` is odd.
pub fn decided_game(winner: &str, loser: &str, length: usize) -> Game {
    assert!(9 <= length && length < 60);

    let row = (0..CUBE_SIZE)
        .map(|z| Position::new(4, 4, z))
        .collect::<Vec<_>>();
    let winner_moves = row[..4]
        .iter()
        .copied()
        .chain(
            Position::all()
                .filter(|position| !row.contains(position) && colored(*position))
                .take((length + 1) / 2 - 5),
        )
        .chain([row[4]])
        .collect::<Vec<_>>();
    let mut loser_moves = Position::all()
        .filter(|position| !row.contains(position) && !colored(*position))
        .take(length / 2);
    let mut winner_moves = winner_moves.into_iter();

    let winner_first = length % 2 == 1;
    let mut game = Game::new();

    for i in 0..length {
        let mv = if (i % 2 == 0) == winner_first {
            Move::new(winner, winner_moves.next().unwrap())
        } else {
            Move::new(loser, loser_moves.next().unwrap())
        };
        game.make_move(mv).unwrap();

        if i + 1 < length {
            assert_eq!(game.winner(), None);
        }
    }

    assert_eq!(game.winner(), Some(winner));
    game
}
