//! Per-frame tile pipeline
//!
//! settle -> spawn -> fall -> escape check. `Session::advance` runs these in
//! order; each step is usable on its own for tests.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ramp;
use super::state::{Tile, TileStatus};
use crate::tuning::Tuning;

/// Spawn timer and tile id generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds since the last spawn; `None` until the first one
    since_last: Option<f32>,
    next_id: u64,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next tile will receive
    pub fn peek_id(&self) -> u64 {
        self.next_id
    }

    /// Advance the timer by `dt` and spawn when the interval for `speed` is
    /// reached. The first call always spawns. At most one tile per frame.
    pub fn step(&mut self, tiles: &mut Vec<Tile>, rng: &mut Pcg32, tuning: &Tuning, speed: f32, dt: f32) -> Option<Tile> {
        let due = match self.since_last.as_mut() {
            None => true,
            Some(elapsed) => {
                *elapsed += dt;
                *elapsed >= ramp::spawn_interval(tuning, speed)
            }
        };
        if !due {
            return None;
        }

        let lane = rng.random_range(0..tuning.lanes);
        let tile = Tile::new(self.next_id, lane, tuning.spawn_y());
        self.next_id += 1;
        self.since_last = Some(0.0);
        tiles.push(tile.clone());
        Some(tile)
    }
}

/// Drop tiles that were hit or missed since the previous frame
pub fn settle(tiles: &mut Vec<Tile>) {
    tiles.retain(Tile::is_falling);
}

/// Move every falling tile by `speed * dt`, then drop garbage below the field.
///
/// Returns the first (oldest) falling tile that passed the miss line, already
/// marked `Missed`. Only one is reported per frame.
pub fn fall(tiles: &mut Vec<Tile>, tuning: &Tuning, speed: f32, dt: f32) -> Option<Tile> {
    let dy = speed * dt;
    for tile in tiles.iter_mut() {
        tile.advance(dy);
    }

    // Escapes are found before garbage removal
    let miss_y = tuning.miss_y();
    let escaped = tiles.iter_mut().find(|t| t.is_falling() && t.y > miss_y).map(|t| {
        t.status = TileStatus::Missed;
        t.clone()
    });

    let despawn_y = tuning.despawn_y();
    tiles.retain(|t| t.status == TileStatus::Missed || t.y < despawn_y);
    escaped
}
