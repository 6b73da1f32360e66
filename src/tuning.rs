//! Data-driven game balance
//!
//! Every variant of the game (lane count, speeds, timing windows, point values)
//! is one `Tuning` value fed to the same engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How often new tiles are created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnCadence {
    /// Constant interval in seconds
    Fixed { interval: f32 },
    /// Interval derived from the current fall duration so that roughly
    /// `tiles_in_flight` tiles are on screen per lane crossing
    Ramped { tiles_in_flight: f32 },
}

/// Distance thresholds (pixels from the target line), half-open `[lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitWindows {
    pub perfect: f32,
    pub great: f32,
    pub good: f32,
}

/// Points awarded per tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointTable {
    pub perfect: u64,
    pub great: u64,
    pub good: u64,
}

/// Particle burst tuning (units are pixels and seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleTuning {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Life lost per second
    pub decay: f32,
    /// Burst speed before tier scaling (px/s)
    pub base_speed: f32,
    /// Particles per burst: [perfect, great, good]
    pub counts: [usize; 3],
    /// Speed multiplier per tier: [perfect, great, good]
    pub speed_scale: [f32; 3],
    /// Hard cap on live particles
    pub max_particles: usize,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            gravity: PARTICLE_GRAVITY,
            decay: PARTICLE_DECAY,
            base_speed: PARTICLE_BASE_SPEED,
            counts: [12, 8, 4],
            speed_scale: [1.5, 1.2, 1.0],
            max_particles: MAX_PARTICLES,
        }
    }
}

/// What a tap in a lane without any falling tile does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyLanePolicy {
    /// No verdict, nothing changes
    #[default]
    Ignore,
    /// The run ends as if the tap were mistimed
    EndRun,
}

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("lane count must be at least 1")]
    NoLanes,
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },
    #[error("max speed {max} is below initial speed {initial}")]
    SpeedRange { initial: f32, max: f32 },
    #[error("hit windows must satisfy perfect <= great <= good (got {perfect}/{great}/{good})")]
    WindowOrder { perfect: f32, great: f32, good: f32 },
    #[error("point values must satisfy perfect > great > good > 0 (got {perfect}/{great}/{good})")]
    PointOrder { perfect: u64, great: u64, good: u64 },
    #[error("target line {target} lies outside the field (height {height})")]
    TargetOutsideField { target: f32, height: f32 },
    #[error("melody length must be at least 1")]
    EmptyMelody,
    #[error("star thresholds must be ascending (got {0:?})")]
    StarOrder([u64; 3]),
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub lanes: usize,
    pub field_width: f32,
    pub field_height: f32,
    pub tile_height: f32,
    pub target_line_y: f32,
    /// Fall speed at score 0 (px/s)
    pub initial_speed: f32,
    /// Fall speed ceiling (px/s)
    pub max_speed: f32,
    /// Extra px/s per point scored
    pub speed_growth: f32,
    pub spawn: SpawnCadence,
    pub windows: HitWindows,
    pub points: PointTable,
    pub particles: ParticleTuning,
    #[serde(default)]
    pub empty_lane: EmptyLanePolicy,
    /// Minimum score for 1, 2 and 3 stars
    pub star_thresholds: [u64; 3],
    pub melody_length: usize,
    /// Largest delta the clock will report (seconds)
    pub max_frame_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    /// The mobile variant: four lanes, three hit tiers, speed ramps with score
    pub fn classic() -> Self {
        Self {
            lanes: LANES,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tile_height: TILE_HEIGHT,
            target_line_y: FIELD_HEIGHT * 0.8,
            initial_speed: INITIAL_FALL_SPEED,
            max_speed: MAX_FALL_SPEED,
            speed_growth: SPEED_GROWTH,
            spawn: SpawnCadence::Fixed {
                interval: SPAWN_INTERVAL,
            },
            windows: HitWindows {
                perfect: 25.0,
                great: 50.0,
                good: 80.0,
            },
            points: PointTable {
                perfect: 30,
                great: 20,
                good: 10,
            },
            particles: ParticleTuning::default(),
            empty_lane: EmptyLanePolicy::Ignore,
            star_thresholds: [100, 250, 500],
            melody_length: MELODY_LENGTH,
            max_frame_delta: MAX_FRAME_DELTA,
        }
    }

    /// The canvas variant: constant speed, a single 50px window.
    ///
    /// Only tile height, speed, the window and melody length are taken from
    /// it. Field geometry, the target line and the escape rule stay classic.
    pub fn arcade() -> Self {
        Self {
            tile_height: 80.0,
            initial_speed: 180.0,
            max_speed: 180.0,
            speed_growth: 0.0,
            windows: HitWindows {
                perfect: 0.0,
                great: 0.0,
                good: 50.0,
            },
            // Only GOOD is reachable; the upper tiers just keep the ordering
            points: PointTable {
                perfect: 30,
                great: 20,
                good: 10,
            },
            melody_length: 40,
            ..Self::classic()
        }
    }

    /// Same tiles, but spawn cadence follows fall speed
    pub fn ramped() -> Self {
        Self {
            spawn: SpawnCadence::Ramped {
                tiles_in_flight: 4.0,
            },
            ..Self::classic()
        }
    }

    /// Check invariants the engine relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lanes == 0 {
            return Err(TuningError::NoLanes);
        }
        for (name, value) in [
            ("field width", self.field_width),
            ("field height", self.field_height),
            ("tile height", self.tile_height),
            ("initial speed", self.initial_speed),
            ("max frame delta", self.max_frame_delta),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { name, value });
            }
        }
        if !(self.speed_growth >= 0.0) {
            return Err(TuningError::Negative {
                name: "speed growth",
                value: self.speed_growth,
            });
        }
        if !(self.max_speed >= self.initial_speed) {
            return Err(TuningError::SpeedRange {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }
        match self.spawn {
            SpawnCadence::Fixed { interval } if !(interval > 0.0) => {
                return Err(TuningError::NonPositive {
                    name: "spawn interval",
                    value: interval,
                });
            }
            SpawnCadence::Ramped { tiles_in_flight } if !(tiles_in_flight > 0.0) => {
                return Err(TuningError::NonPositive {
                    name: "tiles in flight",
                    value: tiles_in_flight,
                });
            }
            _ => {}
        }
        let HitWindows {
            perfect,
            great,
            good,
        } = self.windows;
        if !(perfect >= 0.0 && perfect <= great && great <= good && good > 0.0) {
            return Err(TuningError::WindowOrder {
                perfect,
                great,
                good,
            });
        }
        let p = self.points;
        if !(p.perfect > p.great && p.great > p.good && p.good > 0) {
            return Err(TuningError::PointOrder {
                perfect: p.perfect,
                great: p.great,
                good: p.good,
            });
        }
        if !(self.target_line_y > 0.0 && self.target_line_y < self.field_height) {
            return Err(TuningError::TargetOutsideField {
                target: self.target_line_y,
                height: self.field_height,
            });
        }
        if self.melody_length == 0 {
            return Err(TuningError::EmptyMelody);
        }
        let [one, two, three] = self.star_thresholds;
        if one > two || two > three {
            return Err(TuningError::StarOrder(self.star_thresholds));
        }
        self.validate_particles()
    }

    fn validate_particles(&self) -> Result<(), TuningError> {
        let p = &self.particles;
        if !(p.decay > 0.0) {
            return Err(TuningError::NonPositive {
                name: "particle decay",
                value: p.decay,
            });
        }
        let [perfect, great, good] = p.speed_scale;
        for (name, value) in [
            ("particle gravity", p.gravity),
            ("particle base speed", p.base_speed),
            ("perfect speed scale", perfect),
            ("great speed scale", great),
            ("good speed scale", good),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Negative { name, value });
            }
        }
        Ok(())
    }

    /// Where new tiles appear (fully above the visible area)
    pub fn spawn_y(&self) -> f32 {
        -self.tile_height
    }

    /// Tiles below this are garbage
    pub fn despawn_y(&self) -> f32 {
        self.field_height + self.tile_height
    }

    /// A falling tile past this position has escaped
    pub fn miss_y(&self) -> f32 {
        self.target_line_y + self.tile_height / 2.0
    }

    pub fn lane_width(&self) -> f32 {
        self.field_width / self.lanes as f32
    }

    /// Horizontal center of a lane
    pub fn lane_center_x(&self, lane: usize) -> f32 {
        (lane as f32 + 0.5) * self.lane_width()
    }

    /// Map a horizontal touch coordinate to a lane
    pub fn lane_at(&self, x: f32) -> Option<usize> {
        if !(x >= 0.0 && x < self.field_width) {
            return None;
        }
        let lane = (x / self.lane_width()) as usize;
        Some(lane.min(self.lanes - 1))
    }

    /// Load a tuning preset from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, crate::persistence::PersistError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(Tuning::classic().validate(), Ok(()));
        assert_eq!(Tuning::arcade().validate(), Ok(()));
        assert_eq!(Tuning::ramped().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_windows() {
        let mut tuning = Tuning::classic();
        tuning.windows.great = 10.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::WindowOrder { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_particles() {
        let mut tuning = Tuning::classic();
        tuning.particles.decay = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive { name: "particle decay", .. })
        ));

        let mut tuning = Tuning::classic();
        tuning.particles.decay = f32::NAN;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::classic();
        tuning.particles.gravity = f32::INFINITY;
        assert!(matches!(tuning.validate(), Err(TuningError::Negative { .. })));

        let mut tuning = Tuning::classic();
        tuning.particles.speed_scale[1] = f32::NAN;
        assert!(matches!(tuning.validate(), Err(TuningError::Negative { .. })));
    }

    #[test]
    fn test_rejects_unordered_stars() {
        let mut tuning = Tuning::classic();
        tuning.star_thresholds = [500, 100, 250];
        assert_eq!(tuning.validate(), Err(TuningError::StarOrder([500, 100, 250])));

        let json = serde_json::to_string(&tuning).unwrap();
        assert!(Tuning::from_json(&json).is_err());

        // Equal thresholds are allowed
        tuning.star_thresholds = [100, 100, 500];
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_points_and_speed() {
        let mut tuning = Tuning::classic();
        tuning.points.great = tuning.points.perfect;
        assert!(matches!(tuning.validate(), Err(TuningError::PointOrder { .. })));

        let mut tuning = Tuning::classic();
        tuning.max_speed = tuning.initial_speed - 1.0;
        assert!(matches!(tuning.validate(), Err(TuningError::SpeedRange { .. })));

        let mut tuning = Tuning::classic();
        tuning.lanes = 0;
        assert_eq!(tuning.validate(), Err(TuningError::NoLanes));
    }

    #[test]
    fn test_lane_geometry() {
        let tuning = Tuning::classic();
        let w = tuning.lane_width();
        assert_eq!(tuning.lane_at(0.0), Some(0));
        assert_eq!(tuning.lane_at(w * 1.5), Some(1));
        assert_eq!(tuning.lane_at(tuning.field_width - 0.01), Some(3));
        assert_eq!(tuning.lane_at(tuning.field_width), None);
        assert_eq!(tuning.lane_at(-1.0), None);
        assert!((tuning.lane_center_x(2) - w * 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_json_roundtrip_keeps_validation() {
        let json = serde_json::to_string(&Tuning::arcade()).unwrap();
        let parsed = Tuning::from_json(&json).unwrap();
        assert_eq!(parsed, Tuning::arcade());

        let mut broken = Tuning::arcade();
        broken.melody_length = 0;
        let json = serde_json::to_string(&broken).unwrap();
        assert!(Tuning::from_json(&json).is_err());
    }
}
