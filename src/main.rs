//! Reversi-Rust command line.
//!
//! ## Usage
//!
//! - `reversi-rust tournament --black deepening --white random --games 10`
//! - `reversi-rust demo` - Play and print one game

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use reversi_rust::agent::AgentKind;
use reversi_rust::random::SeedPolicy;
use reversi_rust::tournament::{Tournament, TournamentConfig};

/// Reversi-Rust: Reversi agents and a tournament harness
#[derive(Parser)]
#[command(name = "reversi-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a series of games between two agents
    Tournament {
        /// Black's agent, by name or code 1-8
        #[arg(long, default_value = "deepening")]
        black: String,
        /// White's agent, by name or code 1-8
        #[arg(long, default_value = "random")]
        white: String,
        #[arg(long, default_value_t = 10)]
        games: u64,
        /// Let agents think as long as they like
        #[arg(long)]
        no_time_limit: bool,
        /// Search budget per move
        #[arg(long, default_value_t = 5000)]
        time_limit_ms: u64,
        /// Seed the agents' random choices
        #[arg(long)]
        seed: Option<u64>,
        /// Reseed from `seed + game index` before every game
        #[arg(long, requires = "seed")]
        per_game_seed: bool,
    },
    /// Play one game and print the board after every ply
    Demo {
        #[arg(long, default_value = "deepening")]
        black: String,
        #[arg(long, default_value = "corner")]
        white: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tournament {
            black,
            white,
            games,
            no_time_limit,
            time_limit_ms,
            seed,
            per_game_seed,
        }) => {
            let mut config = TournamentConfig::new(parse_kind(&black)?, parse_kind(&white)?, games);
            config.time_limited = !no_time_limit;
            config.time_limit = Duration::from_millis(time_limit_ms);
            config.seed = match (seed, per_game_seed) {
                (Some(s), true) => SeedPolicy::PerGame(s),
                (Some(s), false) => SeedPolicy::Fixed(s),
                (None, _) => SeedPolicy::Entropy,
            };
            let report = Tournament::new(&config).run();
            println!("{report}");
        }
        Some(Commands::Demo { black, white }) => {
            run_demo(parse_kind(&black)?, parse_kind(&white)?);
        }
        None => run_demo(AgentKind::Deepening, AgentKind::CornerTaking),
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<AgentKind> {
    s.parse().with_context(|| format!("choose one of: {}", kind_list()))
}

fn kind_list() -> String {
    AgentKind::ALL
        .iter()
        .map(|k| format!("{} ({})", k.name(), k.code()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_demo(black: AgentKind, white: AgentKind) {
    println!("Reversi-Rust: {black} (X) vs {white} (O)\n");
    let mut config = TournamentConfig::new(black, white, 1);
    config.time_limit = Duration::from_secs(1);
    let tournament = Tournament::new(&config);
    let record = tournament.play_game_with(0, |board| {
        if let Some(last) = board.last_move() {
            match last.placed {
                Some(loc) => println!("{} plays {loc}", last.color),
                None => println!("{} passes", last.color),
            }
        }
        println!("{board}\n");
    });
    println!("{}: {}-{}", record.outcome, record.black_count, record.white_count);
}
