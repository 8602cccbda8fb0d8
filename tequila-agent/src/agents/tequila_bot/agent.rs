use super::{
    model::{LearningMask, WeightTable},
    selector::select_move,
    storage::{load_weights, save_weights},
    trainer::TequilaBotTrainer,
};
use crate::{
    agent::Agent,
    scan::{scan_lines, Side},
};
use figment::Figment;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tequila_core::board::{Board, Position};
use tracing::{debug, info, warn};

pub const NAME: &str = "TequilaBot";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TequilaBotOptions {
    pub weights_path: PathBuf,
    pub learning_rate: f64,
    /// Block the opponent's open four instead of consulting the evaluator.
    pub block_imminent_defeat: bool,
    /// Learn from and save after every match.
    pub learn: bool,
    pub learn_from_draws: bool,
    pub atomic_save: bool,
}

impl Default for TequilaBotOptions {
    fn default() -> Self {
        Self {
            weights_path: PathBuf::from("weightsTequilaBot.txt"),
            learning_rate: 0.1,
            block_imminent_defeat: false,
            learn: true,
            learn_from_draws: true,
            atomic_save: true,
        }
    }
}

/// Linear per-ply evaluator with a couple of tactical shortcuts.
///
/// Weights are read from disk on the first move of the process and written
/// back at the end of every match.
#[derive(Debug)]
pub struct TequilaBot {
    options: TequilaBotOptions,
    weights: Option<WeightTable>,
    learning_mask: LearningMask,
}

impl TequilaBot {
    pub fn new(options: TequilaBotOptions) -> Self {
        Self {
            options,
            weights: None,
            learning_mask: LearningMask::new(),
        }
    }

    pub fn from_figment(figment: &Figment) -> Self {
        let options = figment.extract().unwrap_or_else(|err| {
            warn!(%err, "invalid TequilaBot options, falling back to defaults");
            TequilaBotOptions::default()
        });

        Self::new(options)
    }

    pub fn options(&self) -> &TequilaBotOptions {
        &self.options
    }

    /// `None` until the weights have been loaded.
    pub fn weights(&self) -> Option<&WeightTable> {
        self.weights.as_ref()
    }

    pub fn learning_mask(&self) -> &LearningMask {
        &self.learning_mask
    }
}

fn loaded_weights<'a>(
    weights: &'a mut Option<WeightTable>,
    learning_mask: &mut LearningMask,
    path: &Path,
) -> &'a mut WeightTable {
    if weights.is_none() {
        learning_mask.reset();
    }

    weights.get_or_insert_with(|| read_weights(path))
}

fn read_weights(path: &Path) -> WeightTable {
    match load_weights(path) {
        Ok(weights) => {
            info!(path = %path.display(), "loaded weights");
            weights
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "could not load weights, using seed weights");
            WeightTable::seeded()
        }
    }
}

impl<B: Board> Agent<B> for TequilaBot {
    fn name(&self) -> &str {
        NAME
    }

    fn make_move(&mut self, board: &B) -> Position {
        let ply = board.move_history().len();
        let weights = loaded_weights(
            &mut self.weights,
            &mut self.learning_mask,
            &self.options.weights_path,
        );

        // first call of a new match
        if ply <= 1 {
            self.learning_mask.reset();
        }

        if ply == 0 {
            self.learning_mask.skip(0);
            debug!("opening with the center");
            return Position::CENTER;
        }

        let scan = scan_lines(board, NAME);

        if let Some(position) = scan.critical_cell(board, Side::Own) {
            self.learning_mask.skip(ply);
            debug!(ply, %position, "completing an open four");
            return position;
        }

        if self.options.block_imminent_defeat {
            if let Some(position) = scan.critical_cell(board, Side::Opponent) {
                self.learning_mask.skip(ply);
                debug!(ply, %position, "blocking the opponent's open four");
                return position;
            }
        }

        match select_move(board, NAME, weights) {
            Some(position) => position,
            None => {
                warn!(ply, "no legal move left");
                Position::ORIGIN
            }
        }
    }

    fn on_match_ends(&mut self, board: &B) {
        if !self.options.learn {
            debug!("learning disabled, keeping weights as they are");
            self.learning_mask.reset();
            return;
        }

        let weights = loaded_weights(
            &mut self.weights,
            &mut self.learning_mask,
            &self.options.weights_path,
        );
        let trainer =
            TequilaBotTrainer::new(self.options.learning_rate, self.options.learn_from_draws);
        let summary = trainer.train(weights, &self.learning_mask, board, NAME);

        info!(
            moves = board.move_history().len(),
            winner = board.winner().unwrap_or("none"),
            target = summary.target,
            updated = summary.updated,
            masked = summary.masked,
            rejected = summary.rejected,
            replay_failures = summary.replay_failures,
            "learned from match"
        );

        let path = &self.options.weights_path;
        match save_weights(weights, path, self.options.atomic_save) {
            Ok(()) => info!(path = %path.display(), "saved weights"),
            Err(err) => warn!(path = %path.display(), %err, "failed to save weights"),
        }

        self.learning_mask.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::tequila_bot::{
        fixtures::decided_game,
        model::{WeightRow, SEED_ROW, WEIGHT_ROWS},
        storage::format_weights,
    };
    use figment::providers::{Format, Toml};
    use std::fs;
    use tequila_core::game::Game;

    const OPPONENT: &str = "RandomPlayer";

    fn bot_in(dir: &tempfile::TempDir) -> TequilaBot {
        TequilaBot::new(TequilaBotOptions {
            weights_path: dir.path().join("weightsTequilaBot.txt"),
            ..Default::default()
        })
    }

    fn play(bot: &mut TequilaBot, game: &Game) -> Position {
        Agent::<Game>::make_move(bot, game)
    }

    #[test]
    fn test_name() {
        let bot = TequilaBot::new(TequilaBotOptions::default());
        assert_eq!(Agent::<Game>::name(&bot), "TequilaBot");
    }

    #[test]
    fn test_opens_with_center() {
        let dir = tempfile::tempdir().unwrap();
        let mut bot = bot_in(&dir);

        assert_eq!(play(&mut bot, &Game::new()), Position::CENTER);
        assert!(!bot.learning_mask().is_learnable(0));
        assert_eq!(bot.learning_mask().skipped().collect::<Vec<_>>(), vec![0]);

        // missing file: seed weights
        assert_eq!(bot.weights(), Some(&WeightTable::seeded()));
    }

    #[test]
    fn test_takes_immediate_win() {
        let dir = tempfile::tempdir().unwrap();
        let mut bot = bot_in(&dir);
        let game = Game::from_moves([
            (NAME, Position::new(0, 0, 0)),
            (OPPONENT, Position::new(4, 4, 0)),
            (NAME, Position::new(0, 0, 1)),
            (OPPONENT, Position::new(4, 4, 1)),
            (NAME, Position::new(0, 0, 2)),
            (OPPONENT, Position::new(4, 3, 3)),
            (NAME, Position::new(0, 0, 3)),
            (OPPONENT, Position::new(2, 4, 1)),
        ])
        .unwrap();

        assert_eq!(play(&mut bot, &game), Position::new(0, 0, 4));
        assert!(!bot.learning_mask().is_learnable(8));
    }

    fn opponent_open_four() -> Game {
        Game::from_moves([
            (OPPONENT, Position::new(4, 4, 0)),
            (NAME, Position::new(0, 0, 0)),
            (OPPONENT, Position::new(4, 4, 1)),
            (NAME, Position::new(1, 2, 3)),
            (OPPONENT, Position::new(4, 4, 2)),
            (NAME, Position::new(0, 3, 1)),
            (OPPONENT, Position::new(4, 4, 3)),
        ])
        .unwrap()
    }

    #[test]
    fn test_defensive_override_is_off_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut bot = bot_in(&dir);
        let game = opponent_open_four();

        let position = play(&mut bot, &game);
        assert!(game.is_empty_at(position));
        assert!(bot.learning_mask().is_learnable(7));
    }

    #[test]
    fn test_defensive_override_blocks_open_four() {
        let dir = tempfile::tempdir().unwrap();
        let mut bot = TequilaBot::new(TequilaBotOptions {
            weights_path: dir.path().join("weights.txt"),
            block_imminent_defeat: true,
            ..Default::default()
        });

        assert_eq!(play(&mut bot, &opponent_open_four()), Position::new(4, 4, 4));
        assert!(!bot.learning_mask().is_learnable(7));
    }

    #[test]
    fn test_loads_weight_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weightsTequilaBot.txt");
        let row: WeightRow = [1.0, 2.0, 3.0, 4.0, -1.0, -2.0, -3.0, -4.0, 0.5];
        let stored = WeightTable::from_rows(vec![row; WEIGHT_ROWS]);
        fs::write(&path, format_weights(&stored)).unwrap();

        let mut bot = bot_in(&dir);
        assert_eq!(bot.weights(), None);

        play(&mut bot, &Game::new());
        assert_eq!(bot.weights(), Some(&stored));

        // later changes on disk are not picked up mid-process
        fs::write(&path, "garbage").unwrap();
        play(&mut bot, &Game::from_moves([(OPPONENT, Position::ORIGIN)]).unwrap());
        assert_eq!(bot.weights(), Some(&stored));
    }

    #[test]
    fn test_malformed_weight_file_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("weightsTequilaBot.txt"), "1,2,3\n").unwrap();

        let mut bot = bot_in(&dir);
        let position = play(&mut bot, &Game::from_moves([(OPPONENT, Position::ORIGIN)]).unwrap());

        assert_ne!(position, Position::ORIGIN);
        assert_eq!(bot.weights(), Some(&WeightTable::seeded()));
    }

    #[test]
    fn test_mask_resets_on_new_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut bot = bot_in(&dir);

        play(&mut bot, &Game::new());
        assert!(!bot.learning_mask().is_learnable(0));

        // second match, opponent moves first
        play(&mut bot, &Game::from_moves([(OPPONENT, Position::ORIGIN)]).unwrap());
        assert!(bot.learning_mask().is_learnable(0));
    }

    #[test]
    fn test_match_end_saves_finite_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weightsTequilaBot.txt");
        let mut bot = bot_in(&dir);
        let game = decided_game(NAME, OPPONENT, 37);

        Agent::<Game>::on_match_ends(&mut bot, &game);

        let content = fs::read_to_string(&path).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), WEIGHT_ROWS);

        for line in lines {
            let values = line
                .split(',')
                .map(|v| v.parse::<f64>().unwrap())
                .collect::<Vec<_>>();
            assert_eq!(values.len(), 9);
            assert!(values.iter().all(|v| v.is_finite()));
        }

        let saved = load_weights(&path).unwrap();
        assert_eq!(Some(&saved), bot.weights());
        assert_ne!(saved, WeightTable::seeded());
        assert!(!dir.path().join("weightsTequilaBot.txt.tmp").exists());
    }

    #[test]
    fn test_match_end_learns_on_top_of_stored_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weightsTequilaBot.txt");
        let row: WeightRow = [2.0, 1.0, 0.5, 0.25, -2.0, -1.0, -0.5, -0.25, 3.0];
        let stored = WeightTable::from_rows(vec![row; WEIGHT_ROWS]);
        fs::write(&path, format_weights(&stored)).unwrap();

        let mut bot = bot_in(&dir);
        let game = decided_game(OPPONENT, NAME, 20);
        Agent::<Game>::on_match_ends(&mut bot, &game);

        let saved = load_weights(&path).unwrap();
        // rows past the end of the match keep the stored values, not the seed
        assert_eq!(*saved.row(100), row);
        assert_ne!(*saved.row(100), SEED_ROW);
    }

    #[test]
    fn test_learning_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.txt");
        let mut bot = TequilaBot::new(TequilaBotOptions {
            weights_path: path.clone(),
            learn: false,
            ..Default::default()
        });

        Agent::<Game>::on_match_ends(&mut bot, &decided_game(NAME, OPPONENT, 11));
        assert!(!path.exists());
    }

    #[test]
    fn test_options_from_figment() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            weights_path = "models/tequila.txt"
            learning_rate = 0.05
            block_imminent_defeat = true
            "#,
        ));

        let bot = TequilaBot::from_figment(&figment);
        assert_eq!(
            *bot.options(),
            TequilaBotOptions {
                weights_path: PathBuf::from("models/tequila.txt"),
                learning_rate: 0.05,
                block_imminent_defeat: true,
                ..Default::default()
            }
        );

        let broken = Figment::new().merge(Toml::string("learning_rate = \"fast\""));
        assert_eq!(
            *TequilaBot::from_figment(&broken).options(),
            TequilaBotOptions::default()
        );
    }
}
