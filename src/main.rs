#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging, ui, Board, FleetGenerator, Heatmap, Match, PlacementPolicy, Summary,
    TacticKind, TargetingConfig, TargetingEngine, FLEET,
};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use serde_json::json;
#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Generate a fleet layout and print it.
    Place {
        #[arg(long, value_enum, default_value_t = PlacementPolicy::Coastal)]
        policy: PlacementPolicy,
        #[arg(long, help = "Fix RNG seed for reproducible layouts (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Print the layout as JSON")]
        json: bool,
    },
    /// Play one match: a tactic against a generated layout.
    Duel {
        #[arg(long, value_enum, default_value_t = TacticKind::Adaptive)]
        tactic: TacticKind,
        #[arg(long, value_enum, default_value_t = PlacementPolicy::Random)]
        policy: PlacementPolicy,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "JSON file with targeting tunables")]
        config: Option<PathBuf>,
        #[arg(long, help = "Let the tactic peek at live enemy cells after long miss streaks")]
        rubber_band: bool,
    },
    /// Play many independent matches concurrently and summarise shots to win.
    Bench {
        #[arg(long, default_value_t = 200)]
        matches: usize,
        #[arg(long, value_enum, help = "Tactic to measure (default: all)")]
        tactic: Option<TacticKind>,
        #[arg(long, value_enum, default_value_t = PlacementPolicy::Random)]
        policy: PlacementPolicy,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, help = "JSON file with targeting tunables")]
        config: Option<PathBuf>,
    },
}

#[cfg(feature = "std")]
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use rand::Rng;
        rand::rng().random()
    })
}

#[cfg(feature = "std")]
fn load_config(path: Option<&Path>) -> anyhow::Result<TargetingConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(TargetingConfig::default()),
    }
}

/// Play one match from a single seed: layout and engine get derived seeds.
#[cfg(feature = "std")]
fn play(
    kind: TacticKind,
    policy: PlacementPolicy,
    config: TargetingConfig,
    seed: u64,
) -> anyhow::Result<broadside::MatchReport> {
    let ships = FleetGenerator::seeded(policy, seed)
        .generate_relaxed(&FLEET)
        .map_err(|e| anyhow::anyhow!(e))?;
    let board = Board::new(ships).map_err(|e| anyhow::anyhow!(e))?;
    let engine = TargetingEngine::with_kind(kind, config, seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    Match::new(board, engine)
        .with_live_cells(config.rubber_band)
        .run()
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Place { policy, seed, json } => {
            let seed = resolve_seed(seed);
            let ships = FleetGenerator::seeded(policy, seed)
                .generate_placement(&FLEET)
                .map_err(|e| anyhow::anyhow!(e))?;
            if json {
                let out = json!({ "policy": policy, "seed": seed, "ships": ships });
                println!("{}", serde_json::to_string(&out)?);
            } else {
                println!("{} layout (seed {}):", policy.name(), seed);
                print!("{}", ui::render_layout(&ships));
            }
        }
        Commands::Duel {
            tactic,
            policy,
            seed,
            config,
            rubber_band,
        } => {
            let seed = resolve_seed(seed);
            let mut config = load_config(config.as_deref())?;
            config.rubber_band |= rubber_band;
            println!("{:?} vs {} layout (seed {})", tactic, policy.name(), seed);

            let ships = FleetGenerator::seeded(policy, seed)
                .generate_relaxed(&FLEET)
                .map_err(|e| anyhow::anyhow!(e))?;
            let board = Board::new(ships).map_err(|e| anyhow::anyhow!(e))?;
            let engine = TargetingEngine::with_kind(tactic, config, seed);
            let mut game = Match::new(board, engine).with_live_cells(config.rubber_band);

            while game.status() == broadside::GameStatus::InProgress {
                let turn = game.play_turn().map_err(|e| anyhow::anyhow!(e))?;
                println!(
                    "{:>3}. {:<3} {:?}",
                    game.engine().state().shots(),
                    ui::format_coord(turn.coord),
                    turn.outcome
                );
            }

            println!("\nDefender:");
            print!("{}", ui::render_board(game.defender()));
            println!("\nAttacker's view:");
            print!("{}", ui::render_belief(game.engine().belief()));
            print!("{}", ui::render_heatmap(&Heatmap::compute(game.engine().belief())));
            let report = game.report();
            println!(
                "\n{} won in {} shots ({} hits)",
                report.tactic, report.shots, report.hits
            );
        }
        Commands::Bench {
            matches,
            tactic,
            policy,
            seed,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let kinds = match tactic {
                Some(kind) => vec![kind],
                None => TacticKind::ALL.to_vec(),
            };

            let mut results = serde_json::Map::new();
            for kind in kinds {
                let handles: Vec<_> = (0..matches as u64)
                    .map(|i| {
                        let match_seed = seed.wrapping_add(i);
                        tokio::task::spawn_blocking(move || play(kind, policy, config, match_seed))
                    })
                    .collect();

                let mut shots = Vec::with_capacity(matches);
                for handle in handles {
                    shots.push(handle.await??.shots);
                }
                let summary = Summary::from_shots(&shots);
                results.insert(format!("{:?}", kind).to_lowercase(), json!(summary));
            }

            let out = json!({
                "policy": policy,
                "matches": matches,
                "seed": seed,
                "tactics": results,
            });
            println!("{}", serde_json::to_string(&out)?);
        }
    }

    Ok(())
}
