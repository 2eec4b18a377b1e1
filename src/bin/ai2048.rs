use std::thread;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use term2048::render::{clear_screen, print_board};
use term2048::session::{self, Status};
use term2048::{evaluate, Args, BestScoreStore, GameConfig};

fn play_game(config: &GameConfig) -> anyhow::Result<()> {
    let store = BestScoreStore::new(&config.best_score_file);
    let best_score = store.load_or_default();
    let mut session = session::start(config)?;

    rayon::ThreadPoolBuilder::new()
        .num_threads(if num_cpus::get() >= 4 { 4 } else { 0 })
        .build_global()
        .context("failed to build search thread pool")?;

    loop {
        clear_screen().context("failed to clear screen")?;
        println!(
            "Move #{moveno}, current score={score}",
            moveno = session.moveno(),
            score = session.score()
        );
        print_board(session.grid(), session.score(), best_score.max(session.score()));
        println!("Current heuristic: {}", evaluate(session.grid()));
        println!("Press Ctrl-C to quit");

        match session.status() {
            Status::Playing => {}
            Status::GameOver => {
                println!("Game Over! No more valid moves.");
                break;
            }
            Status::TimeUp => {
                println!("Time's up! Game over.");
                break;
            }
        }

        match session.step_ai() {
            Some((move_, outcome)) => {
                println!("AI's Best Move: {}", move_);
                info!("move {}: {} (+{})", session.moveno(), move_, outcome.gained);
            }
            None => {
                println!("No valid moves! Ending game.");
                break;
            }
        }
        thread::sleep(config.delay);
    }

    match store.record(session.score()) {
        Ok(best) => {
            println!("==== Final Game State Summary ====");
            println!("Final Score: {}", session.score());
            println!("Max Tile: {}", session.grid().max_tile());
            println!("Best Score Achieved: {}", best);
        }
        Err(e) => warn!("could not update best score: {}", e),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let config = GameConfig::try_from(Args::parse())?;

    play_game(&config)
}
