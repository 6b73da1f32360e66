//! Pianew Tiles headless driver
//!
//! Runs a session on a synthetic frame clock with an autoplay bot standing in
//! for the player, then records the result.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pianew_tiles::persistence;
use pianew_tiles::sim::{GameEvent, Session};
use pianew_tiles::{HighScores, Settings, Tuning};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Classic,
    Arcade,
    Ramped,
}

#[derive(Debug, Parser)]
#[command(version, about = "Headless autoplay run of the tile engine")]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Built-in balance preset
    #[arg(long, value_enum, default_value_t = Preset::Classic)]
    preset: Preset,
    /// Tuning JSON file (overrides --preset)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Frame period in milliseconds
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,
    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,
    /// Chance (0-1) that the bot taps a tile at all
    #[arg(long, default_value_t = 0.99)]
    skill: f64,
    /// Player settings JSON
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Records JSON, updated after the run
    #[arg(long)]
    records: Option<PathBuf>,
}

/// Autoplay: taps each tile once it is close to the line, unless it
/// decides to skip it
struct Autoplay {
    rng: Pcg32,
    skill: f64,
    decided: HashSet<u64>,
}

impl Autoplay {
    fn new(seed: u64, skill: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            skill: skill.clamp(0.0, 1.0),
            decided: HashSet::new(),
        }
    }

    /// Lanes to tap this frame
    fn choose(&mut self, session: &Session) -> Vec<usize> {
        let tuning = session.tuning();
        let w = tuning.windows;
        let aim = [w.perfect, w.great, w.good]
            .into_iter()
            .find(|&v| v > 0.0)
            .unwrap_or(w.good)
            * 0.5;

        let mut lanes = Vec::new();
        for tile in session.tiles().iter().filter(|t| t.is_falling()) {
            if (tile.y - tuning.target_line_y).abs() >= aim || !self.decided.insert(tile.id) {
                continue;
            }
            if self.rng.random_bool(self.skill) {
                lanes.push(tile.lane);
            } else {
                log::debug!("Autoplay skips tile {}", tile.id);
            }
        }
        lanes
    }
}

fn load_tuning(args: &Args) -> Result<Tuning> {
    if let Some(path) = &args.tuning {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning {}", path.display()))?;
        return Tuning::from_json(&json).with_context(|| format!("parsing tuning {}", path.display()));
    }
    Ok(match args.preset {
        Preset::Classic => Tuning::classic(),
        Preset::Arcade => Tuning::arcade(),
        Preset::Ramped => Tuning::ramped(),
    })
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::Hit {
            tier, note_index, ..
        } => log::trace!("audio: note {note_index} ({})", tier.label()),
        GameEvent::Haptic(cue) => log::trace!("haptics: {cue:?}"),
        GameEvent::GameOver { cause, .. } => log::info!("Run ended: {cause:?}"),
        _ => {}
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let tuning = load_tuning(&args)?;
    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let mut records = args
        .records
        .as_deref()
        .map(HighScores::load)
        .unwrap_or_default();

    let mut session = Session::new(tuning, args.seed)?
        .with_settings(&settings)
        .with_best_score(records.best_score);
    let mut bot = Autoplay::new(args.seed, args.skill);

    let frame_ms = args.frame_ms.max(1.0);
    let end_ms = args.seconds.max(0.0) * 1000.0;
    let mut now = 0.0;
    while now <= end_ms && !session.state().is_over() {
        session.frame(now);
        for lane in bot.choose(&session) {
            session.tap(lane, now);
        }
        for event in session.drain_events() {
            report(&event);
        }
        now += frame_ms;
    }

    let summary = session.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = &args.records {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        if let Some(rank) = records.record(&summary, timestamp) {
            log::info!("Leaderboard rank #{rank}");
        }
        // A failed write is logged, not fatal
        if let Err(e) = records.save(path) {
            log::warn!("Could not save records: {e}");
        }
    }
    if let Some(path) = &args.settings {
        if !path.exists() {
            persistence::save_json(path, &settings)?;
        }
    }
    Ok(())
}
