//! Difficulty ramp: score in, fall speed and spawn cadence out

use crate::tuning::{SpawnCadence, Tuning};

/// Fall speed (px/s) for a score, monotonic and saturating at `max_speed`
pub fn fall_speed(tuning: &Tuning, score: u64) -> f32 {
    let raw = tuning.initial_speed + score as f32 * tuning.speed_growth;
    raw.clamp(tuning.initial_speed, tuning.max_speed)
}

/// Seconds a tile needs from spawn to the target line at `speed`
pub fn fall_duration(tuning: &Tuning, speed: f32) -> f32 {
    (tuning.target_line_y - tuning.spawn_y()) / speed
}

/// Seconds between spawns at `speed`
pub fn spawn_interval(tuning: &Tuning, speed: f32) -> f32 {
    match tuning.spawn {
        SpawnCadence::Fixed { interval } => interval,
        SpawnCadence::Ramped { tiles_in_flight } => fall_duration(tuning, speed) / tiles_in_flight,
    }
}
