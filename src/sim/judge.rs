//! Hit judgment
//!
//! Taps are judged by distance from the target line only. Windows are
//! half-open: a distance exactly on a threshold falls into the worse tier.

use serde::{Deserialize, Serialize};

use super::state::Tile;
use crate::tuning::{HitWindows, PointTable};

/// Timing accuracy of a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HitTier {
    Perfect,
    Great,
    Good,
    Miss,
}

impl HitTier {
    /// Whether the tap counts as a hit
    pub fn is_hit(self) -> bool {
        self != HitTier::Miss
    }

    pub fn points(self, table: &PointTable) -> u64 {
        match self {
            HitTier::Perfect => table.perfect,
            HitTier::Great => table.great,
            HitTier::Good => table.good,
            HitTier::Miss => 0,
        }
    }

    /// Index into per-tier arrays ([perfect, great, good])
    pub(crate) fn hit_index(self) -> Option<usize> {
        match self {
            HitTier::Perfect => Some(0),
            HitTier::Great => Some(1),
            HitTier::Good => Some(2),
            HitTier::Miss => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HitTier::Perfect => "PERFECT",
            HitTier::Great => "GREAT",
            HitTier::Good => "GOOD",
            HitTier::Miss => "MISS",
        }
    }
}

/// Classify a distance (pixels from the target line)
pub fn classify(distance: f32, windows: &HitWindows) -> HitTier {
    let distance = distance.abs();
    if distance < windows.perfect {
        HitTier::Perfect
    } else if distance < windows.great {
        HitTier::Great
    } else if distance < windows.good {
        HitTier::Good
    } else {
        // Also catches NaN
        HitTier::Miss
    }
}

/// Result of judging one tap against the live tiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub tile_id: u64,
    pub lane: usize,
    pub distance: f32,
    pub tier: HitTier,
}

/// Index of the falling tile in `lane` nearest to the target line
pub fn nearest_candidate(tiles: &[Tile], lane: usize, target_y: f32) -> Option<usize> {
    tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.lane == lane && t.is_falling())
        .min_by(|(_, a), (_, b)| {
            let da = (a.y - target_y).abs();
            let db = (b.y - target_y).abs();
            // Equal distance: lower id (older tile) wins
            da.total_cmp(&db).then(a.id.cmp(&b.id))
        })
        .map(|(i, _)| i)
}

/// Judge a tap in `lane`. `None` when the lane holds no falling tile.
pub fn judge(tiles: &[Tile], lane: usize, target_y: f32, windows: &HitWindows) -> Option<(usize, Verdict)> {
    let index = nearest_candidate(tiles, lane, target_y)?;
    let tile = &tiles[index];
    let distance = (tile.y - target_y).abs();
    Some((
        index,
        Verdict {
            tile_id: tile.id,
            lane,
            distance,
            tier: classify(distance, windows),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::TileStatus;

    fn windows() -> HitWindows {
        HitWindows {
            perfect: 25.0,
            great: 50.0,
            good: 80.0,
        }
    }

    #[test]
    fn test_classify_boundaries() {
        let w = windows();
        assert_eq!(classify(0.0, &w), HitTier::Perfect);
        assert_eq!(classify(24.99, &w), HitTier::Perfect);
        assert_eq!(classify(25.0, &w), HitTier::Great);
        assert_eq!(classify(50.0, &w), HitTier::Good);
        assert_eq!(classify(79.99, &w), HitTier::Good);
        assert_eq!(classify(80.0, &w), HitTier::Miss);
        assert_eq!(classify(-10.0, &w), HitTier::Perfect);
        assert_eq!(classify(f32::NAN, &w), HitTier::Miss);
    }

    #[test]
    fn test_collapsed_great_tier() {
        let w = HitWindows {
            perfect: 0.0,
            great: 0.0,
            good: 50.0,
        };
        assert_eq!(classify(0.0, &w), HitTier::Good);
        assert_eq!(classify(49.0, &w), HitTier::Good);
        assert_eq!(classify(50.0, &w), HitTier::Miss);
    }

    #[test]
    fn test_nearest_candidate_in_lane() {
        let mut tiles = vec![
            Tile::new(1, 0, 300.0),
            Tile::new(2, 1, 480.0),
            Tile::new(3, 0, 470.0),
            Tile::new(4, 0, 520.0),
        ];
        assert_eq!(nearest_candidate(&tiles, 0, 480.0), Some(2));

        tiles[2].status = TileStatus::Hit;
        assert_eq!(nearest_candidate(&tiles, 0, 480.0), Some(3));
        assert_eq!(nearest_candidate(&tiles, 2, 480.0), None);
    }

    #[test]
    fn test_judge_reports_distance() {
        let tiles = vec![Tile::new(7, 2, 430.0)];
        let (index, verdict) = judge(&tiles, 2, 480.0, &windows()).unwrap();
        assert_eq!(index, 0);
        assert_eq!(verdict.tile_id, 7);
        assert_eq!(verdict.distance, 50.0);
        assert_eq!(verdict.tier, HitTier::Good);
        assert!(judge(&tiles, 1, 480.0, &windows()).is_none());
    }

    #[test]
    fn test_points_follow_tier() {
        let table = PointTable {
            perfect: 30,
            great: 20,
            good: 10,
        };
        assert_eq!(HitTier::Perfect.points(&table), 30);
        assert_eq!(HitTier::Good.points(&table), 10);
        assert_eq!(HitTier::Miss.points(&table), 0);
        assert!(HitTier::Good.is_hit());
        assert!(!HitTier::Miss.is_hit());
    }
}
