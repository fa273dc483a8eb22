//! Arena CLI: run AI-vs-AI self-play experiments from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 200 --p1 advanced --p2 beginner
//!   cargo run --release --bin arena -- --games 100 --p1 advanced --p2 intermediate --p3 beginner --profile aggressive

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use okey_engine::ai::evaluator::{preset, EvalWeights};
use okey_engine::ai::profiles::{load_default_profiles, load_profiles};
use okey_engine::engine::arena::{run_arena, Contestant};
use okey_engine::engine::models::AiDifficulty;

#[derive(Parser)]
#[command(name = "arena", about = "Run AI-vs-AI arena experiments for Okey")]
struct Cli {
    /// Number of rounds to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Alternate seat positions between rounds
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    alternate_seats: bool,

    /// Path to ai_profiles.toml (default: auto-discover)
    #[arg(long, env = "OKEY_AI_PROFILES")]
    profiles: Option<PathBuf>,

    /// Named weight preset: "default", "aggressive", "defensive"
    #[arg(long)]
    profile: Option<String>,

    /// Seat 1 difficulty: beginner | intermediate | advanced
    #[arg(long, default_value = "advanced")]
    p1: AiDifficulty,

    /// Seat 2 difficulty
    #[arg(long, default_value = "beginner")]
    p2: AiDifficulty,

    /// Seat 3 difficulty (optional)
    #[arg(long)]
    p3: Option<AiDifficulty>,

    /// Seat 4 difficulty (optional)
    #[arg(long)]
    p4: Option<AiDifficulty>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let profiles_file = match &cli.profiles {
        Some(path) => load_profiles(path).map_err(|e| format!("Failed to load profiles: {e}"))?,
        None => load_default_profiles(),
    };

    let weights: EvalWeights = match &cli.profile {
        Some(name) => preset(name)
            .cloned()
            .ok_or_else(|| format!("unknown weight preset: {name}"))?,
        // Without an explicit preset, take the file's advanced-tier mapping.
        None => profiles_file.weights_for(AiDifficulty::Advanced),
    };

    let mut contestants = vec![
        Contestant {
            name: format!("p1_{:?}", cli.p1).to_lowercase(),
            difficulty: cli.p1,
        },
        Contestant {
            name: format!("p2_{:?}", cli.p2).to_lowercase(),
            difficulty: cli.p2,
        },
    ];
    if let Some(d) = cli.p3 {
        contestants.push(Contestant {
            name: format!("p3_{d:?}").to_lowercase(),
            difficulty: d,
        });
    }
    if let Some(d) = cli.p4 {
        contestants.push(Contestant {
            name: format!("p4_{d:?}").to_lowercase(),
            difficulty: d,
        });
    }

    tracing::info!(
        games = cli.games,
        seed = cli.seed,
        seats = contestants.len(),
        "starting arena"
    );

    let result = run_arena(
        &contestants,
        cli.games,
        cli.seed,
        &weights,
        cli.alternate_seats,
        Some(&|done, total| {
            if done % 50 == 0 || done == total {
                eprintln!("  round {done}/{total}");
            }
        }),
    );

    println!("\n{}", result.summary());
    Ok(())
}
