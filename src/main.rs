use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;
use tequila_agent::{
    agent_provider::AgentProvider,
    agents::{random::RandomPlayer, tequila_bot::TequilaBotProvider},
    arena::play_match,
};
use tequila_core::game::Game;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct TrainingOptions {
    matches: usize,
    seed: Option<u64>,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            matches: 10,
            seed: None,
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    wins: usize,
    losses: usize,
    draws: usize,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let config = Figment::new().merge(Toml::file(CONFIG_PATH));
    let options = config
        .extract::<TrainingOptions>()
        .unwrap_or_else(|err| {
            warn!(%err, "invalid training options, falling back to defaults");
            TrainingOptions::default()
        });

    let provider = TequilaBotProvider;
    let mut bot = AgentProvider::<Game>::create_agent(&provider, &config.focus("agent"));
    let mut opponent = match options.seed {
        Some(seed) => RandomPlayer::with_seed(seed),
        None => RandomPlayer::new(),
    };

    info!(
        agent = AgentProvider::<Game>::name(&provider),
        matches = options.matches,
        seed = ?options.seed,
        "training against random opponent"
    );

    let mut tally = Tally::default();
    let mut game = Game::new();

    for index in 0..options.matches {
        // alternate who opens
        let result = if index % 2 == 0 {
            play_match(&mut game, bot.as_mut(), &mut opponent)
        } else {
            play_match(&mut game, &mut opponent, bot.as_mut())
        };

        let result = match result {
            Ok(result) => result,
            Err(err) => {
                warn!(index, %err, "match aborted");
                continue;
            }
        };

        match result.winner.as_deref() {
            Some(winner) if winner == bot.name() => tally.wins += 1,
            Some(_) => tally.losses += 1,
            None => tally.draws += 1,
        }

        info!(
            index,
            moves = result.moves,
            winner = result.winner.as_deref().unwrap_or("draw"),
            "match finished"
        );
    }

    info!(
        wins = tally.wins,
        losses = tally.losses,
        draws = tally.draws,
        "training finished"
    );
}
