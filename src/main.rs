use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use slide_2048::config::GameConfig;
use slide_2048::engine::Move;
use slide_2048::game::{Game, Status};
use slide_2048::selfplay;

#[derive(Parser, Debug)]
#[command(name = "slide-2048", version, about = "Play or simulate the 2048 sliding-tile game")]
struct Cli {
    /// Game rules file (TOML); defaults to a standard 4x4 game
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play interactively: w/a/s/d or up/down/left/right, r restarts, q quits
    Play {
        /// Seed for tile spawns (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play many games with a random policy and report score statistics
    Simulate {
        /// Number of games
        #[arg(short = 'n', long, default_value_t = 100)]
        games: usize,
        /// Seed of the first game; game i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Stop a game after this many moves
        #[arg(long, default_value_t = 100_000)]
        max_moves: u64,
        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match &cli.config {
        Some(path) => GameConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    match cli.cmd {
        Command::Play { seed } => play(config, seed.unwrap_or_else(rand::random)),
        Command::Simulate { games, seed, max_moves, quiet } => simulate(&config, games, seed, max_moves, quiet),
    }
}

fn play(config: GameConfig, seed: u64) -> Result<()> {
    let mut game = Game::new(config, seed)?;
    info!("seed {seed}");
    print_state(&game)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        match input {
            "q" | "quit" => break,
            "r" | "restart" => {
                game.restart();
                print_state(&game)?;
                continue;
            }
            _ => {}
        }
        let Some(dir) = Move::from_key(input) else {
            println!("unknown input {input:?}: use w/a/s/d, r or q");
            continue;
        };
        let outcome = game.step(dir);
        print_state(&game)?;
        if outcome.status == Status::GameOver {
            println!("Game over! Final score: {}. Press r to restart or q to quit.", outcome.score);
        }
    }
    Ok(())
}

fn print_state<R: rand::Rng>(game: &Game<R>) -> io::Result<()> {
    write_state(&mut io::stdout().lock(), game)
}

fn write_state<W: Write, R: rand::Rng>(out: &mut W, game: &Game<R>) -> io::Result<()> {
    writeln!(out, "{}", game.board())?;
    writeln!(out, "Score: {}", game.score())?;
    out.flush()
}

fn simulate(config: &GameConfig, games: usize, seed: u64, max_moves: u64, quiet: bool) -> Result<()> {
    let start = Instant::now();
    let pb = if quiet { ProgressBar::hidden() } else { ProgressBar::new(games as u64) };
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})")?
            .progress_chars("=>-"),
    );
    let (_, report) = selfplay::run_batch(config, games, seed, max_moves, |_| pb.inc(1))?;
    pb.finish_and_clear();

    let elapsed = start.elapsed().as_secs_f64().max(1e-6);
    println!(
        "Games: {} ({} finished) | moves: {} | moves/sec: {:.1}",
        report.games,
        report.finished,
        report.total_moves,
        report.total_moves as f64 / elapsed
    );
    println!(
        "Mean score: {:.1} | max score: {} | best tile: {}",
        report.mean_score, report.max_score, report.best_tile
    );
    Ok(())
}
