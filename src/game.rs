//! Game session: owns the current board, the RNG and the play status.
//!
//! The engine itself never touches randomness. This module is the boundary
//! where spawn positions and values are drawn, always from a caller-supplied
//! `rand::Rng`, so a seeded `StdRng` replays a game exactly.
//!
//! ```
//! use slide_2048::config::GameConfig;
//! use slide_2048::engine::Move;
//! use slide_2048::game::{Game, Status};
//!
//! let mut game = Game::new(GameConfig::default(), 42).unwrap();
//! assert_eq!(game.board().count_empty(), 14);
//! let outcome = game.step(Move::Left);
//! assert_eq!(outcome.status, Status::Playing);
//! assert_eq!(outcome.score, game.score());
//! ```

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{ConfigError, GameConfig};
use crate::engine::{Board, Move, Score, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver,
}

/// A tile placed by [`spawn_tile`]: `index` counts empty cells row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub index: usize,
    pub value: Tile,
}

/// What a single [`Game::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the slide itself moved or merged anything.
    pub changed: bool,
    pub spawned: Option<Spawn>,
    pub score: Score,
    pub status: Status,
}

/// Place a 2 or 4 into a uniformly chosen empty cell.
///
/// The tile is a 4 with probability `four_probability`, which must lie in
/// `[0, 1]`. A full board is returned unchanged with no spawn.
pub fn spawn_tile<R: Rng + ?Sized>(
    board: &Board,
    four_probability: f64,
    rng: &mut R,
) -> (Board, Option<Spawn>) {
    let empty = board.count_empty();
    if empty == 0 {
        return (board.clone(), None);
    }
    let index = rng.gen_range(0..empty);
    let value = if rng.gen_bool(four_probability) { 4 } else { 2 };
    (board.insert_cell(index, value), Some(Spawn { index, value }))
}

pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    board: Board,
    rng: R,
    status: Status,
    moves: u64,
}

impl Game<StdRng> {
    /// Start a game whose spawns are driven by `StdRng::seed_from_u64(seed)`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Start a game on a fresh board with `config.initial_tiles` spawned tiles.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::empty(config.rows, config.cols);
        let mut game = Game { config, board, rng, status: Status::Playing, moves: 0 };
        game.restart();
        Ok(game)
    }

    /// Resume play from an existing position. The board must match the
    /// configured grid size.
    pub fn from_board(config: GameConfig, board: Board, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        if (board.rows(), board.cols()) != (config.rows, config.cols) {
            return Err(ConfigError::Invalid(format!(
                "board is {}x{} but config expects {}x{}",
                board.rows(),
                board.cols(),
                config.rows,
                config.cols
            )));
        }
        let status = status_of(&board);
        Ok(Game { config, board, rng, status, moves: 0 })
    }

    /// Throw the current board away and deal a fresh one.
    pub fn restart(&mut self) {
        let mut board = Board::empty(self.config.rows, self.config.cols);
        for _ in 0..self.config.initial_tiles {
            board = spawn_tile(&board, self.config.four_probability, &mut self.rng).0;
        }
        self.board = board;
        self.moves = 0;
        self.status = status_of(&self.board);
        debug!(
            "new {}x{} board with {} tile(s)",
            self.config.rows, self.config.cols, self.config.initial_tiles
        );
    }

    /// Slide in `dir`, spawn a tile, then re-check for game over.
    ///
    /// Once the game is over this is a no-op reporting [`Status::GameOver`].
    pub fn step(&mut self, dir: Move) -> StepOutcome {
        if self.status == Status::GameOver {
            return StepOutcome {
                changed: false,
                spawned: None,
                score: self.score(),
                status: self.status,
            };
        }

        let moved = self.board.shift(dir);
        let changed = moved != self.board;
        let (board, spawned) = if changed || self.config.spawn_on_unchanged {
            spawn_tile(&moved, self.config.four_probability, &mut self.rng)
        } else {
            (moved, None)
        };
        self.board = board;
        self.moves += 1;
        self.status = status_of(&self.board);

        if let Some(spawn) = spawned {
            debug!("move {} ({dir}): spawned {} at empty index {}", self.moves, spawn.value, spawn.index);
        }
        if self.status == Status::GameOver {
            info!(
                "game over after {} moves: score {}, highest tile {}",
                self.moves,
                self.score(),
                self.board.highest_tile()
            );
        }

        StepOutcome { changed, spawned, score: self.score(), status: self.status }
    }

    #[inline]
    pub fn board(&self) -> &Board { &self.board }

    #[inline]
    pub fn score(&self) -> Score { self.board.score() }

    #[inline]
    pub fn status(&self) -> Status { self.status }

    #[inline]
    pub fn is_over(&self) -> bool { self.status == Status::GameOver }

    /// Moves processed since the last (re)start, including ones that did not
    /// change the board.
    #[inline]
    pub fn moves(&self) -> u64 { self.moves }

    #[inline]
    pub fn config(&self) -> &GameConfig { &self.config }
}

fn status_of(board: &Board) -> Status {
    if board.is_game_over() {
        Status::GameOver
    } else {
        Status::Playing
    }
}
