//! Command-line front end for the gesture arcade.
//!
//! Replays recorded frame traces through the orchestrator, plays
//! tic-tac-toe in the terminal, and measures opponent strength.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use handplay_arcade::{
    replay, run_evaluation, ActiveSession, ArcadeConfig, FrameTrace, Orchestrator,
    TicTacToeSession,
};
use handplay_core::{Difficulty, GameKind, Timestamp};
use handplay_rps::RpsMatch;
use handplay_tictactoe::Square;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Gesture-controlled tic-tac-toe and rock-paper-scissors.
#[derive(Parser)]
#[command(name = "handplay")]
#[command(about = "Replay gesture traces and play against the computer")]
struct Cli {
    /// Log debug detail (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a session with a recorded frame trace.
    Replay {
        /// JSON frame trace.
        #[arg(short, long)]
        trace: PathBuf,

        /// Game to play: tictactoe or rps.
        #[arg(short, long, default_value = "tictactoe")]
        game: GameKind,

        /// Opponent strength for tic-tac-toe.
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Random seed for the computer.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play tic-tac-toe in the terminal by typing "row col".
    Play {
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play a strategy against a random opponent.
    Evaluate {
        #[arg(short, long, default_value = "hard")]
        difficulty: Difficulty,

        /// Number of games to play.
        #[arg(short, long, default_value = "100")]
        games: usize,

        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn load_config(path: Option<&Path>) -> Result<ArcadeConfig> {
    let Some(path) = path else {
        return Ok(ArcadeConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;
    ArcadeConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid config: {:?}", path))
}

fn print_tictactoe(game: &TicTacToeSession) {
    println!("{}", game.board());
    if let Some(outcome) = game.outcome() {
        println!("Result: {:?}", outcome);
        if let Some(line) = game.winning_line() {
            let squares: Vec<String> = line.iter().map(Square::to_string).collect();
            println!("Winning line: {}", squares.join(" "));
        }
    }
}

fn print_rps(game: &RpsMatch) {
    let session = game.session();
    println!(
        "Player {} - {} Computer after {}/{} rounds ({})",
        session.player_score(),
        session.computer_score(),
        session.rounds_played(),
        session.max_rounds(),
        game.phase()
    );
    if let Some(text) = session.last_result() {
        println!("Last round: {}", text);
    }
    if let Some(verdict) = session.verdict() {
        println!("{}", verdict);
    }
}

fn cmd_replay(
    trace_path: &Path,
    game: GameKind,
    difficulty: Difficulty,
    seed: u64,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let json = fs::read_to_string(trace_path)
        .with_context(|| format!("Failed to read trace: {:?}", trace_path))?;
    let trace = FrameTrace::from_json(&json)
        .with_context(|| format!("Failed to parse trace: {:?}", trace_path))?;

    let start_time = trace
        .frames
        .first()
        .map(|f| f.timestamp())
        .unwrap_or(Timestamp::ZERO);
    let mut arcade = Orchestrator::new(config, game, difficulty, seed, start_time)?;

    println!("Replaying {} frames of {} ({})", trace.len(), game, difficulty);
    let start = Instant::now();
    let summary = replay(&mut arcade, &trace);

    println!("Completed in {:.2}s", start.elapsed().as_secs_f64());
    println!(
        "Frames: {} (hand in {}, unusable {})",
        summary.frames, summary.hands_seen, summary.bad_frames
    );
    println!(
        "Clicks: {}, player moves: {}, computer moves: {}, rounds: {}, rejected: {}",
        summary.clicks,
        summary.player_moves,
        summary.computer_moves,
        summary.rounds_resolved,
        summary.rejected
    );
    println!();

    match arcade.session() {
        ActiveSession::TicTacToe(game) => print_tictactoe(game),
        ActiveSession::Rps(game) => print_rps(game),
    }
    Ok(())
}

fn parse_square(line: &str) -> Result<Square> {
    let parts: Vec<usize> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Expected \"row col\", got {:?}", line))?;
    match parts.as_slice() {
        [row, col] => Square::new(*row, *col)
            .with_context(|| format!("({}, {}) is off the board", row, col)),
        _ => bail!("Expected \"row col\", got {:?}", line),
    }
}

fn cmd_play(difficulty: Difficulty, seed: u64, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let mut arcade =
        Orchestrator::new(config, GameKind::TicTacToe, difficulty, seed, Timestamp::ZERO)?;
    let reply_delay = config.tictactoe.ai_move_delay() + Duration::from_millis(1);
    let mut now = Timestamp::ZERO;

    println!("You are O, the computer is X ({}).", difficulty);
    println!("Enter \"row col\" (0-2), \"r\" to play again, \"q\" to quit.");

    let stdin = io::stdin();
    loop {
        if let ActiveSession::TicTacToe(game) = arcade.session() {
            println!();
            print_tictactoe(game);
        }
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        now = now.after(Duration::from_secs(1));

        match line {
            "q" | "quit" => return Ok(()),
            "r" | "reset" => {
                if let Err(e) = arcade.reset(now) {
                    println!("Cannot reset: {}", e);
                }
                continue;
            }
            _ => {}
        }

        let square = match parse_square(line) {
            Ok(square) => square,
            Err(e) => {
                println!("{:#}", e);
                continue;
            }
        };

        // Typed moves take the mouse path: click the centre of the square.
        let (x, y) = arcade.config().board.center(square);
        if let Err(e) = arcade.mouse_click(x, y, now) {
            println!("Move rejected: {}", e);
            continue;
        }

        now = now.after(reply_delay);
        if let Some(reply) = arcade.update(None, now).computer_moved {
            println!("Computer plays {}", reply);
        }
    }
}

fn cmd_evaluate(difficulty: Difficulty, games: usize, seed: u64) -> Result<()> {
    if games == 0 {
        bail!("--games must be at least 1");
    }
    println!(
        "Playing {} games: {} opponent vs random player",
        games, difficulty
    );
    println!("================================================");

    let start = Instant::now();
    let result = run_evaluation(difficulty, games, seed);
    let pct = |n: usize| n as f32 / result.total_games as f32 * 100.0;

    println!("Completed in {:.2}s", start.elapsed().as_secs_f64());
    println!("Wins:   {} ({:.1}%)", result.wins, pct(result.wins));
    println!("Losses: {} ({:.1}%)", result.losses, pct(result.losses));
    println!("Draws:  {} ({:.1}%)", result.draws, pct(result.draws));
    println!("------------------------------------------------");
    println!("Win rate: {:.1}%", result.win_rate() * 100.0);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Replay {
            trace,
            game,
            difficulty,
            seed,
            config,
        } => cmd_replay(&trace, game, difficulty, seed, config.as_deref()),

        Commands::Play {
            difficulty,
            seed,
            config,
        } => cmd_play(difficulty, seed, config.as_deref()),

        Commands::Evaluate {
            difficulty,
            games,
            seed,
        } => cmd_evaluate(difficulty, games, seed),
    }
}
