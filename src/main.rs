//! Headless Gem Cascade runner (default binary).
//!
//! Plays a seeded, timed game by always taking the first legal move,
//! pacing cascade steps the way an animated front end would, then records
//! the result on the leaderboard.
//!
//! Environment: `GEM_CASCADE_*` variables seed the session config (see
//! [`SessionConfig::from_env`]); command-line flags override them.
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gem_cascade::core::{find_valid_move, RandomSource, StepEvent};
use gem_cascade::driver::{drive_move, Pacing};
use gem_cascade::session::{GameSession, SessionConfig};
use gem_cascade::store::{JsonFileStore, ScoreStore, SessionRecord};

/// Play a headless game of Gem Cascade
#[derive(Parser, Debug)]
#[command(name = "gem-cascade")]
#[command(about = "Autoplay a timed match-3 game and keep a leaderboard", long_about = None)]
struct Args {
    /// Random seed (default: GEM_CASCADE_SEED or 1)
    #[arg(long)]
    seed: Option<u32>,

    /// Board side, 3-16
    #[arg(long)]
    size: Option<usize>,

    /// Number of gem kinds in play, 3-6
    #[arg(long)]
    kinds: Option<usize>,

    /// Session length in seconds
    #[arg(long)]
    time_limit: Option<u32>,

    /// Simulated seconds each move takes off the clock
    #[arg(long, default_value_t = 2)]
    secs_per_move: u32,

    /// Stop after this many moves even if time remains
    #[arg(long, default_value_t = 100)]
    max_moves: u32,

    /// Animation pacing as a percentage of the default delays (0 = none)
    #[arg(long, default_value_t = 0)]
    pace: u32,

    /// Print one JSON object per engine event instead of boards
    #[arg(long)]
    json: bool,

    /// Leaderboard file (default: GEM_CASCADE_STORE_PATH or the config dir)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Do not record this game
    #[arg(long)]
    no_save: bool,

    /// Clear the leaderboard before playing
    #[arg(long)]
    clear_leaderboard: bool,

    /// Leaderboard entries to print at the end
    #[arg(long, default_value_t = 5)]
    top: usize,
}

impl Args {
    fn session_config(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(kinds) = self.kinds {
            config.gem_kinds = kinds;
        }
        if let Some(limit) = self.time_limit {
            config.time_limit_secs = limit;
        }
        if let Some(path) = &self.store {
            config.store_path = Some(path.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.session_config(SessionConfig::from_env());
    let mut store = JsonFileStore::new(
        config
            .store_path
            .clone()
            .unwrap_or_else(JsonFileStore::default_path),
    );

    if args.clear_leaderboard {
        store.clear()?;
    }
    let high_score = store.best_score()?;

    let mut session = GameSession::new(&config, high_score).context("invalid board configuration")?;
    info!(seed = config.seed, size = config.board_size, high_score, "game started");
    if !args.json {
        println!("{}", session.engine().board());
    }

    let pacing = Pacing::scaled(args.pace);
    while !session.is_over() && session.moves() < args.max_moves {
        let swap = find_valid_move(session.engine().board())
            .context("settled board has no legal move")?;
        session.swap(swap.a, swap.b);
        if !args.json {
            println!("swap {} <-> {}", swap.a, swap.b);
        }
        drive_move(&mut session, &pacing, |s, event| report_event(args.json, s, event)).await;
        session.tick(args.secs_per_move);
    }

    let record = session.finish();
    if !args.no_save {
        store.save(record)?;
    }
    print_summary(&session, &record);
    print_leaderboard(&store, args.top)?;
    Ok(())
}

fn report_event<R: RandomSource>(json: bool, session: &GameSession<R>, event: &StepEvent) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "failed to encode event"),
        }
        return;
    }

    match event {
        StepEvent::Reverted { swap } => println!("no match, {} <-> {} reverted", swap.a, swap.b),
        StepEvent::Cascade(step) => {
            println!(
                "cascade {}: {} gems, +{} (x{})  score {}",
                step.level,
                step.removed.len(),
                step.score.total,
                step.score.combo_multiplier,
                session.score()
            );
            println!("{}", session.engine().board());
        }
        StepEvent::Settled {
            combo,
            reshuffle: Some(outcome),
        } => println!("settled after {combo} steps, no moves left: {outcome:?}"),
        StepEvent::Settled { .. } => {}
    }
}

fn print_summary<R: RandomSource>(session: &GameSession<R>, record: &SessionRecord) {
    println!(
        "game over: score {}  moves {}  time {}s  best combo {}  high score {}",
        record.score,
        record.moves,
        record.time,
        session.best_combo(),
        session.high_score()
    );
}

fn print_leaderboard(store: &JsonFileStore, n: usize) -> Result<()> {
    if n == 0 {
        return Ok(());
    }
    let entries = store.top(n)?;
    println!("leaderboard ({}):", store.path().display());
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:>2}. {:>6}  {:>3} moves  {:>3}s  {}",
            rank + 1,
            entry.score,
            entry.moves,
            entry.time,
            entry.date.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
