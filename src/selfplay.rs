//! Random-policy self-play, single game and batched across threads.
//!
//! Every game owns its board and a `StdRng` seeded from `base_seed + index`,
//! so a batch is reproducible regardless of how rayon schedules it.

use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;

use crate::config::{ConfigError, GameConfig};
use crate::engine::{Move, Score, Tile};
use crate::game::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub seed: u64,
    pub moves: u64,
    pub score: Score,
    pub highest_tile: Tile,
    /// False when the game was cut off by `max_moves`.
    pub game_over: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub games: usize,
    pub finished: usize,
    pub total_moves: u64,
    pub mean_score: f64,
    pub max_score: Score,
    pub best_tile: Tile,
}

impl BatchReport {
    pub fn from_summaries(summaries: &[GameSummary]) -> Self {
        if summaries.is_empty() {
            return BatchReport::default();
        }
        let total_score: Score = summaries.iter().map(|s| s.score).sum();
        BatchReport {
            games: summaries.len(),
            finished: summaries.iter().filter(|s| s.game_over).count(),
            total_moves: summaries.iter().map(|s| s.moves).sum(),
            mean_score: total_score as f64 / summaries.len() as f64,
            max_score: summaries.iter().map(|s| s.score).max().unwrap_or(0),
            best_tile: summaries.iter().map(|s| s.highest_tile).max().unwrap_or(0),
        }
    }
}

/// Play one game choosing uniformly random directions until it ends or
/// `max_moves` moves have been made.
pub fn play_random_game(config: &GameConfig, seed: u64, max_moves: u64) -> Result<GameSummary, ConfigError> {
    let mut game = Game::new(config.clone(), seed)?;
    // Policy draws from its own stream; the game's RNG only drives spawns.
    let mut policy_rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
    while !game.is_over() && game.moves() < max_moves {
        let dir = *Move::ALL.choose(&mut policy_rng).unwrap_or(&Move::Left);
        game.step(dir);
    }
    Ok(GameSummary {
        seed,
        moves: game.moves(),
        score: game.score(),
        highest_tile: game.board().highest_tile(),
        game_over: game.is_over(),
    })
}

/// Play `games` random games in parallel. `on_done` runs once per finished
/// game (from worker threads), e.g. to tick a progress bar.
pub fn run_batch<F>(
    config: &GameConfig,
    games: usize,
    base_seed: u64,
    max_moves: u64,
    on_done: F,
) -> Result<(Vec<GameSummary>, BatchReport), ConfigError>
where
    F: Fn(&GameSummary) + Sync,
{
    config.validate()?;
    let summaries: Vec<GameSummary> = (0..games as u64)
        .into_par_iter()
        .map(|i| {
            let summary = play_random_game(config, base_seed.wrapping_add(i), max_moves)?;
            on_done(&summary);
            Ok(summary)
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    let report = BatchReport::from_summaries(&summaries);
    info!(
        "self-play batch done: games={}, finished={}, mean_score={:.1}, max_score={}, best_tile={}",
        report.games, report.finished, report.mean_score, report.max_score, report.best_tile
    );
    Ok((summaries, report))
}
