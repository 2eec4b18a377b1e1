use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, warn};

use term2048::render::{clear_screen, print_board};
use term2048::session::{self, Status};
use term2048::{Args, BestScoreStore, GameConfig, Move};

const KEY_ESC: u8 = 0x1b;

enum Command {
    Move(Move),
    Undo,
    Hint,
    Quit,
}

fn get_ch() -> std::io::Result<u8> {
    getch::Getch::new().getch()
}

// Arrow keys arrive as ESC '[' 'A'..'D'.
fn read_arrow() -> std::io::Result<Option<Move>> {
    if get_ch()? != b'[' {
        return Ok(None);
    }
    Ok(match get_ch()? {
        b'A' => Some(Move::Up),
        b'B' => Some(Move::Down),
        b'C' => Some(Move::Right),
        b'D' => Some(Move::Left),
        _ => None,
    })
}

fn ask_for_command() -> std::io::Result<Command> {
    loop {
        let command = match get_ch()? {
            b'w' | b'W' => Command::Move(Move::Up),
            b's' | b'S' => Command::Move(Move::Down),
            b'a' | b'A' => Command::Move(Move::Left),
            b'd' | b'D' => Command::Move(Move::Right),
            b'u' | b'U' => Command::Undo,
            b'h' | b'H' => Command::Hint,
            b'q' | b'Q' => Command::Quit,
            KEY_ESC => match read_arrow()? {
                Some(move_) => Command::Move(move_),
                None => continue,
            },
            _ => {
                println!("Invalid input. Use Arrow Keys or WASD.");
                continue;
            }
        };
        return Ok(command);
    }
}

fn play_game(config: &GameConfig) -> anyhow::Result<()> {
    let store = BestScoreStore::new(&config.best_score_file);
    let best_score = store.load_or_default();
    let mut session = session::start(config)?;
    let mut last_gained = 0;

    let status = loop {
        clear_screen().context("failed to clear screen")?;
        println!(
            "Move #{moveno}, current score={score}(+{gained})",
            moveno = session.moveno(),
            score = session.score(),
            gained = last_gained
        );
        print_board(session.grid(), session.score(), best_score.max(session.score()));

        let status = session.status();
        if status != Status::Playing {
            break status;
        }
        if let Some(left) = session.time_left() {
            println!("Time left: {} seconds", left.as_secs());
        }
        if let Some(hint) = session.current_hint() {
            println!("Hint: {}", hint);
        }
        println!("Press U to Undo, H for Hint, Arrow Keys/WASD to move, Q to Quit.");

        match ask_for_command().context("failed to read key")? {
            Command::Move(move_) => {
                let outcome = session.apply(move_);
                if !outcome.changed {
                    debug!("{} does not change the grid", move_);
                    continue;
                }
                last_gained = outcome.gained;
            }
            Command::Undo => {
                session.undo();
                last_gained = 0;
            }
            Command::Hint => {
                session.hint();
            }
            Command::Quit => break Status::Playing,
        }
    };

    match status {
        Status::TimeUp => println!("Time's up! Game over."),
        Status::GameOver => println!("Game Over! No more valid moves!"),
        Status::Playing => {}
    }
    match store.record(session.score()) {
        Ok(best) => println!(
            "Game over. Your score is {score}. Best score: {best}.",
            score = session.score(),
            best = best
        ),
        Err(e) => warn!("could not update best score: {}", e),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let config = GameConfig::try_from(Args::parse())?;

    play_game(&config)
}
