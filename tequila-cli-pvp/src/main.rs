use figment::{
    providers::{Format, Toml},
    Figment,
};
use std::io::Write;
use tequila_agent::{agent_provider::AgentProvider, agents::tequila_bot::TequilaBotProvider};
use tequila_core::{
    board::{Board, IllegalMoveError, Move, Position},
    game::{Game, GameResult},
};
use tracing_subscriber::EnvFilter;

const HUMAN: &str = "Human";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let options = Figment::new()
        .merge(Toml::file("config.toml"))
        .focus("agent");
    let mut bot = AgentProvider::<Game>::create_agent(&TequilaBotProvider, &options);
    let human_first = ask_human_first();
    let mut game = Game::new();

    while game.game_result().is_none() {
        println!("===========================");
        println!("{}", game);

        let human_turn = (game.turn_count() % 2 == 0) == human_first;

        if human_turn {
            place_piece(&mut game);
        } else {
            let position = bot.make_move(&game);

            if let Err(err) = game.make_move(Move::new(bot.name(), position)) {
                println!("{} made an illegal move: {}", bot.name(), err);
                return;
            }

            println!("{} plays {}", bot.name(), position);
        }
    }

    println!("===========================");
    println!("{}", game);
    println!(
        "game result: {}",
        match game.game_result() {
            Some(GameResult::Win(winner)) => format!("{} wins", winner),
            Some(GameResult::Draw) | None => "draw".to_owned(),
        }
    );

    bot.on_match_ends(&game);
}

fn prompt(message: &str) -> String {
    print!("{}", message);
    let _ = std::io::stdout().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).unwrap_or(0) == 0 {
        println!();
        std::process::exit(0);
    }

    input
}

fn ask_human_first() -> bool {
    loop {
        match prompt("do you want to move first? [y/n]: ").trim() {
            "y" | "Y" | "yes" => return true,
            "n" | "N" | "no" => return false,
            _ => println!("please answer y or n"),
        }
    }
}

fn read_position() -> Position {
    loop {
        println!();
        let input = prompt("enter position to place piece for you (x y z): ");

        match Position::parse(&input) {
            Some(position) => return position,
            None => println!("invalid position"),
        }
    }
}

fn place_piece(game: &mut Game) {
    loop {
        let position = read_position();

        match game.make_move(Move::new(HUMAN, position)) {
            Ok(()) => return,
            Err(err) => match err {
                IllegalMoveError::OutOfBounds { position } => {
                    println!("invalid position: {} (coordinates go from 0 to 4)", position);
                }
                IllegalMoveError::Occupied { position, owner } => {
                    println!("{} is already taken by {}", position, owner);
                }
                IllegalMoveError::GameFinished => {
                    println!("the game has already finished");
                    return;
                }
            },
        }
    }
}
