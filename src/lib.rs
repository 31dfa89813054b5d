//! slide-2048: a pure 2048 board engine
//!
//! This crate provides:
//! - A rectangular `Board` value type with slide/merge moves, empty-cell
//!   tracking, tile insertion, scoring and game-over detection (`engine`)
//! - Lightness mapping for renderers (`palette`)
//! - TOML game rules (`config`) and a seeded game session (`game`)
//! - Random-policy self-play, optionally batched across threads (`selfplay`)
//!
//! Quick start:
//! ```
//! use slide_2048::engine::{self as GameEngine, Board, Move};
//!
//! // Spawning is explicit: the caller picks the empty-cell index and value.
//! let b0 = Board::default().insert_cell(0, 2).insert_cell(2, 2);
//! let b1 = b0.shift(Move::Left);
//! assert_eq!(b1.row(0), &[4, 0, 0, 0]);
//! assert_eq!(GameEngine::calculate_score(&b1), GameEngine::calculate_score(&b0));
//! assert!(!GameEngine::is_game_over(&b1));
//! ```
//!
//! Full loop with a seeded session:
//! ```
//! use slide_2048::config::GameConfig;
//! use slide_2048::engine::Move;
//! use slide_2048::game::Game;
//!
//! let mut game = Game::new(GameConfig::default(), 123).unwrap();
//! let mut moves = 0u32;
//! while !game.is_over() && moves < 8 {
//!     game.step(Move::ALL[moves as usize % 4]);
//!     moves += 1;
//! }
//! let _final_score = game.score();
//! assert!(moves > 0);
//! ```
//!
pub mod config;
pub mod engine;
pub mod game;
pub mod palette;
pub mod selfplay;
