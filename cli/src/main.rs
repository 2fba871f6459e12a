use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};

use command::{Command, HELP};
use config::Args;
use session::Session;

mod command;
mod config;
mod logger;
mod render;
mod session;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter())?;

    let config = args.game_config().context("Invalid board configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting {:?} with seed {}", config, seed);
    let mut session = Session::new(config, seed)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let config = session.config();
    writeln!(
        stdout,
        "{}x{} board, {} bombs, seed {}",
        config.width, config.height, config.bombs, seed
    )?;
    writeln!(stdout, "{HELP}")?;
    draw(&mut stdout, &session)?;

    for line in stdin.lock().lines() {
        let line = line.context("Could not read input")?;
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };

        let events = session.apply(command)?;
        if events.is_empty() {
            writeln!(stdout, "nothing changed")?;
            write!(stdout, "> ")?;
            stdout.flush()?;
            continue;
        }
        if args.events {
            for event in &events {
                writeln!(stdout, "{}", serde_json::to_string(event)?)?;
            }
        }
        draw(&mut stdout, &session)?;
        if session.board().is_finished() {
            writeln!(stdout, "type `new` to play again or `quit` to leave")?;
        }
    }

    log::info!("Bye");
    Ok(())
}

fn draw(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let board = session.board();
    write!(out, "{}", render::render_board(board))?;
    writeln!(out, "{}", render::render_status(board, session.elapsed_secs()))?;
    write!(out, "> ")?;
    out.flush()
}
