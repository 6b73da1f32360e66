//! Score, combo and phase transitions
//!
//! The only code that mutates `GameState` counters. Transitions out of
//! `Over` do not exist here; a new run starts from a fresh state.

use serde::{Deserialize, Serialize};

use super::judge::HitTier;
use super::ramp;
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OverCause {
    /// A falling tile crossed the target line unhandled
    TileEscaped { tile_id: u64, lane: usize },
    /// A tap found a tile but outside every window
    MistimedTap { tile_id: u64, lane: usize, distance: f32 },
    /// A tap in an empty lane, when the tuning makes that fatal
    EmptyLaneTap { lane: usize },
}

/// End-of-run summary for the persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    /// 0 - 3
    pub stars: u8,
    /// Perfect hits as a rounded percentage of touches
    pub precision: u32,
    pub perfect_hits: u32,
    pub total_touches: u32,
    pub max_combo: u32,
    /// Score beats the best known at session start
    pub new_best: bool,
}

impl GameSummary {
    pub fn from_state(state: &GameState, tuning: &Tuning, best_score: u64) -> Self {
        Self {
            score: state.score,
            stars: stars_for(state.score, &tuning.star_thresholds),
            precision: precision(state.perfect_hits, state.total_touches),
            perfect_hits: state.perfect_hits,
            total_touches: state.total_touches,
            max_combo: state.max_combo,
            new_best: state.score > best_score,
        }
    }
}

/// Star tier for a score given ascending thresholds for 1, 2 and 3 stars
pub fn stars_for(score: u64, thresholds: &[u64; 3]) -> u8 {
    thresholds.iter().take_while(|&&t| score >= t).count() as u8
}

/// `perfect / total * 100`, rounded; 0 when nothing was touched
pub fn precision(perfect_hits: u32, total_touches: u32) -> u32 {
    if total_touches == 0 {
        return 0;
    }
    (f64::from(perfect_hits) / f64::from(total_touches) * 100.0).round() as u32
}

/// Apply a successful hit. Returns the points awarded, or `None` when the
/// state is not active or the tier is not a hit.
pub fn record_hit(state: &mut GameState, tier: HitTier, tuning: &Tuning) -> Option<u64> {
    if !state.is_active() || !tier.is_hit() {
        return None;
    }
    let points = tier.points(&tuning.points);
    state.score = state.score.saturating_add(points);
    if tier == HitTier::Perfect {
        state.perfect_hits += 1;
    }
    state.total_touches += 1;
    state.combo += 1;
    state.max_combo = state.max_combo.max(state.combo);
    state.last_tier = Some(tier);
    state.melody_index = (state.melody_index + 1) % tuning.melody_length;
    state.fall_speed = ramp::fall_speed(tuning, state.score);
    Some(points)
}

/// `Active -> Over`. Returns false (and changes nothing) from any other phase.
pub fn end_run(state: &mut GameState) -> bool {
    if !state.is_active() {
        return false;
    }
    state.combo = 0;
    state.last_tier = Some(HitTier::Miss);
    state.phase = GamePhase::Over;
    true
}

/// `Active -> Paused`; idempotent
pub fn pause(state: &mut GameState) -> bool {
    if !state.is_active() {
        return false;
    }
    state.phase = GamePhase::Paused;
    true
}

/// `Paused -> Active`
pub fn resume(state: &mut GameState) -> bool {
    if !state.is_paused() {
        return false;
    }
    state.phase = GamePhase::Active;
    true
}
