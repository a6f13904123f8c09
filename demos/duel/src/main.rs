//! duel: reflex capture-the-flag agents on a text maze.
//!
//! Plays one traced match of the reflex team against itself, then a short
//! seed series of the reflex team against random wanderers.
//!
//! ```text
//! duel [LAYOUT_FILE] [TUNING_JSON]
//! ```
//!
//! Without arguments the bundled layout and the default tuning are used.
//! `DUEL_SIDE=blue` seats the reflex team on the blue side for the series.
//! Set `RUST_LOG` to override the log filter, e.g.
//! `RUST_LOG=ctf_behavior=debug`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ctf_arena::{
    CsvTraceWriter, DistanceTable, Layout, MatchBuilder, MatchConfig, run_series, seed_series,
};
use ctf_behavior::Tuning;
use ctf_core::Team;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_LAYOUT: &str = include_str!("../layouts/default.lay");
const SEED:           u64   = 42;
const MAX_TURNS:      u32   = 1_200;
const SERIES_MATCHES: usize = 8;
const OUTPUT_DIR:     &str  = "output/duel";

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("duel=info,ctf_behavior=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn load_layout(path: Option<&Path>) -> Result<Layout> {
    match path {
        Some(p) => Layout::from_path(p).with_context(|| format!("loading layout {}", p.display())),
        None    => Ok(Layout::parse(DEFAULT_LAYOUT)?),
    }
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning {}", path.display()))?;
    let tuning: Tuning = serde_json::from_str(&text)
        .with_context(|| format!("parsing tuning {}", path.display()))?;
    tuning.validate()?;
    Ok(tuning)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let layout = Arc::new(load_layout(args.first().map(PathBuf::as_path))?);
    let tuning = load_tuning(args.get(1).map(PathBuf::as_path))?;
    let side: Team = match std::env::var("DUEL_SIDE") {
        Ok(v)  => v.parse()?,
        Err(_) => Team::Red,
    };

    println!("=== duel: reflex capture-the-flag ===");
    println!(
        "Board: {}×{}  |  Food per side: {}  |  Seed: {SEED}",
        layout.width(),
        layout.height(),
        layout.food().len() / 2,
    );
    println!();

    let t0 = Instant::now();
    let distances = Arc::new(DistanceTable::build(&layout));
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "maze distances ready");

    let config = MatchConfig { max_turns: MAX_TURNS, seed: SEED, ..MatchConfig::default() };

    // 1. Mirror match with a full decision trace.
    let mut game = MatchBuilder::new(config.clone(), layout.clone())
        .distances(distances.clone())
        .reflex_team(Team::Red, "offense", "defense", &tuning)?
        .reflex_team(Team::Blue, "offense", "defense", &tuning)?
        .build()?;

    let mut trace = CsvTraceWriter::new(Path::new(OUTPUT_DIR))?;
    let t0 = Instant::now();
    let outcome = game.run(&mut trace)?;
    if let Some(e) = trace.take_error() {
        warn!("trace output error: {e}");
    }

    println!("Mirror match finished in {:.3} s", t0.elapsed().as_secs_f64());
    println!("  turns played   : {}", outcome.turns_played);
    println!("  score (red-blue): {}", outcome.score);
    println!("  winner         : {}", outcome.winner.map_or("tie", Team::as_str));
    println!("  captures       : {}", outcome.captures);
    println!("  food left      : red {} / blue {}", outcome.red_food_left, outcome.blue_food_left);
    println!("  trace          : {OUTPUT_DIR}/decisions.csv, {OUTPUT_DIR}/turn_summaries.csv");
    println!();

    // 2. Seed series against random wanderers.
    let seeds = seed_series(SEED, SERIES_MATCHES);
    let t0 = Instant::now();
    let summary = run_series(&seeds, |seed| {
        MatchBuilder::new(config.clone().with_seed(seed), layout.clone())
            .distances(distances.clone())
            .reflex_team(side, "offense", "defense", &tuning)?
            .wanderers(side.opponent())
            .build()
    })?;
    let (reflex_wins, wanderer_wins) = match side {
        Team::Red  => (summary.red_wins, summary.blue_wins),
        Team::Blue => (summary.blue_wins, summary.red_wins),
    };

    println!(
        "Series vs wanderers (reflex plays {side}): {} matches in {:.3} s",
        summary.outcomes.len(),
        t0.elapsed().as_secs_f64()
    );
    println!("{:<22} {:<8} {:<8}", "Seed", "Score", "Turns");
    println!("{}", "-".repeat(40));
    for (seed, o) in &summary.outcomes {
        println!("{:<22} {:<8} {:<8}", seed, o.score, o.turns_played);
    }
    println!("{}", "-".repeat(40));
    println!(
        "Reflex wins {} / wanderer wins {} / ties {}  (mean red-blue score {:+.2})",
        reflex_wins,
        wanderer_wins,
        summary.ties,
        summary.mean_score()
    );

    Ok(())
}
