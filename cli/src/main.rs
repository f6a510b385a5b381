// SPDX-License-Identifier: MIT OR Apache-2.0

//! Challenchess CLI - generate and play capture-chain puzzles
//!
//! Prints a generated level as ASCII or JSON, or plays it interactively
//! by reading destinations from stdin.

use anyhow::{anyhow, Context, Result};
use challenchess_cli::{config, query, render};
use challenchess_core::{Coord, GameSession, GameStatus, LevelOptions, Seed};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "challenchess",
    about = "Capture-chain chess puzzles on random boards",
    version
)]
struct Args {
    /// Level seed; numbers are numeric seeds, anything else a text seed
    #[clap(short, long)]
    seed: Option<String>,

    /// URL-style options, e.g. "xFieldsMin=6&xFieldsMax=10&seed=abc"
    #[clap(short, long)]
    query: Option<String>,

    /// TOML options file (defaults to the platform config dir)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Write the resolved options to the config file and exit
    #[clap(long)]
    save_config: bool,

    /// Fixed number of columns
    #[clap(long)]
    width: Option<u8>,

    /// Fixed number of rows
    #[clap(long)]
    height: Option<u8>,

    /// Fixed number of generation steps
    #[clap(long)]
    steps: Option<u16>,

    /// Keep the moving piece after a capture instead of taking over the captured one
    #[clap(long)]
    classic_capture: bool,

    /// Print the level as JSON
    #[clap(long)]
    json: bool,

    /// Play the level interactively
    #[clap(short, long)]
    play: bool,

    /// Print the generated capture chain
    #[clap(long)]
    solution: bool,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Merge defaults, config file, query string and flags, later sources winning
fn resolve_options(args: &Args) -> Result<LevelOptions> {
    let mut options = config::load_options(args.config.as_deref())?;

    if let Some(q) = &args.query {
        query::apply_query(&mut options, &query::parse_query(q)).context("Invalid --query")?;
    }
    if let Some(seed) = &args.seed {
        options.seed = Some(Seed::parse(seed));
    }
    if let Some(width) = args.width {
        options.x_fields_min = width;
        options.x_fields_max = width;
    }
    if let Some(height) = args.height {
        options.y_fields_min = height;
        options.y_fields_max = height;
    }
    if let Some(steps) = args.steps {
        options.step_count_min = steps;
        options.step_count_max = steps;
    }
    if args.classic_capture {
        options.replace_after_capture = false;
    }

    options.validate()?;
    Ok(options)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let options = resolve_options(&args)?;
    tracing::debug!("Resolved options: {:?}", options);

    if args.save_config {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => config::config_path()?,
        };
        config::save_options(&options, &path)?;
        println!("Saved options to {}", path.display());
        return Ok(());
    }

    let mut session = GameSession::new(options)?;

    if args.json {
        let json = serde_json::to_string_pretty(session.level()).context("Failed to serialize level")?;
        println!("{}", json);
    } else if !args.play {
        session.refresh_reachable();
        print_game_state(&session);
    }

    if args.solution {
        print_solution(&session);
    }

    if args.play {
        let stdin = io::stdin();
        run_game_loop(&mut session, stdin.lock())?;
    }

    Ok(())
}

/// A line of input in the play loop
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Move(Coord),
    Restart,
    New,
    Moves,
    Help,
    Quit,
}

/// Read commands until the level is solved, stuck or the input ends
fn run_game_loop(session: &mut GameSession, input: impl BufRead) -> Result<()> {
    session.refresh_reachable();
    print_game_state(session);
    prompt()?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }

        let board = session.board();
        let command = match parse_move(&line, board.width(), board.height()) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                prompt()?;
                continue;
            }
        };

        match command {
            Command::Move(to) => match session.apply_move(to) {
                Ok(outcome) => {
                    let height = session.board().height();
                    println!(
                        "Moved {} -> {}",
                        render::field_name(outcome.from, height),
                        render::field_name(outcome.to, height)
                    );
                }
                Err(e) => {
                    println!("{}", e);
                    prompt()?;
                    continue;
                }
            },
            Command::Restart => session.restart()?,
            Command::New => {
                let options = LevelOptions {
                    seed: None,
                    ..session.options().clone()
                };
                session.new_game(options)?;
            }
            Command::Moves => {
                let height = session.board().height();
                let moves: Vec<String> = session
                    .legal_moves()
                    .into_iter()
                    .map(|c| render::field_name(c, height))
                    .collect();
                println!("Legal moves: {}", moves.join(" "));
                prompt()?;
                continue;
            }
            Command::Help => {
                print_help();
                prompt()?;
                continue;
            }
            Command::Quit => return Ok(()),
        }

        session.refresh_reachable();
        print_game_state(session);
        match session.status() {
            GameStatus::Solved => {
                println!("Solved in {} moves!", session.moves_made());
                return Ok(());
            }
            GameStatus::Stuck => {
                println!("No moves left. Type 'restart' or 'new' to try again.");
            }
            GameStatus::InProgress => {}
        }
        prompt()?;
    }

    Ok(())
}

/// Parse a destination such as `d4` or `3,4`, or a command word
fn parse_move(input: &str, width: u8, height: u8) -> Result<Command> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "restart" | "r" => return Ok(Command::Restart),
        "new" | "n" => return Ok(Command::New),
        "moves" | "m" => return Ok(Command::Moves),
        "help" | "h" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    if let Some((x, y)) = input.split_once(',') {
        let x: u8 = x.trim().parse().map_err(|_| anyhow!("Invalid column \"{}\"", x.trim()))?;
        let y: u8 = y.trim().parse().map_err(|_| anyhow!("Invalid row \"{}\"", y.trim()))?;
        let coord = Coord::new(x, y);
        if !coord.is_valid(width, height) {
            return Err(anyhow!("{} is outside the {}x{} board", coord, width, height));
        }
        return Ok(Command::Move(coord));
    }

    render::parse_field(&input, width, height)
        .map(Command::Move)
        .ok_or_else(|| anyhow!("Invalid move format. Examples: 'd4', '3,4', 'moves', 'restart', 'quit'."))
}

/// Print the current game state
fn print_game_state(session: &GameSession) {
    let board = session.board();
    let level = session.level();
    println!("\nBoard: {}x{}  Seed: {}", board.width(), board.height(), level.seed);
    println!("Steps: {}  Moves made: {}", level.steps, session.moves_made());
    if let Some(piece) = session.current_piece() {
        println!(
            "Your piece: {:?} {:?} on {}",
            piece.color,
            piece.kind,
            render::field_name(piece.coord, board.height())
        );
    }
    println!("Target: {}", render::field_name(level.target, board.height()));

    // Render the ASCII board
    println!("\n{}", render::render_board(board, Some(session.current_id())));
}

fn print_solution(session: &GameSession) {
    let height = session.board().height();
    let chain: Vec<String> = session
        .level()
        .chain()
        .into_iter()
        .map(|c| render::field_name(c, height))
        .collect();
    println!("Solution: {}", chain.join(" -> "));
}

fn print_help() {
    println!("Enter a destination as a field name (d4) or as x,y (3,4).");
    println!("Commands: moves, restart, new, help, quit");
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush().context("Failed to flush stdout")
}
