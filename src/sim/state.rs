//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::judge::HitTier;
use super::scoring::{GameSummary, OverCause};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Tiles fall, taps are judged
    #[default]
    Active,
    /// Everything frozen; state preserved
    Paused,
    /// Run ended. Only a reset leaves this phase
    Over,
}

/// Tile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileStatus {
    Falling,
    Hit,
    Missed,
}

/// A falling hit target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u64,
    pub lane: usize,
    /// Vertical position, negative above the field, growing downward
    pub y: f32,
    pub status: TileStatus,
}

impl Tile {
    pub fn new(id: u64, lane: usize, y: f32) -> Self {
        Self {
            id,
            lane,
            y,
            status: TileStatus::Falling,
        }
    }

    pub fn is_falling(&self) -> bool {
        self.status == TileStatus::Falling
    }

    /// Move down by `dy`; only falling tiles move
    pub fn advance(&mut self, dy: f32) {
        if self.is_falling() {
            self.y += dy;
        }
    }
}

/// Impact strength requested from the haptics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticCue {
    Light,
    Medium,
    Heavy,
    Error,
}

impl HapticCue {
    pub fn for_tier(tier: HitTier) -> Self {
        match tier {
            HitTier::Perfect => HapticCue::Heavy,
            HitTier::Great => HapticCue::Medium,
            HitTier::Good => HapticCue::Light,
            HitTier::Miss => HapticCue::Error,
        }
    }
}

/// Notifications for collaborators (audio, haptics, persistence, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TileSpawned {
        id: u64,
        lane: usize,
    },
    /// A tile was hit; `note_index` is the melody cursor before it advanced
    Hit {
        tile_id: u64,
        lane: usize,
        tier: HitTier,
        points: u64,
        combo: u32,
        note_index: usize,
    },
    Haptic(HapticCue),
    Paused,
    Resumed,
    GameOver {
        cause: OverCause,
        summary: GameSummary,
    },
}

/// Authoritative score/phase data for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    /// Consecutive hits; 0 after any miss
    pub combo: u32,
    pub max_combo: u32,
    pub perfect_hits: u32,
    pub total_touches: u32,
    pub phase: GamePhase,
    /// Derived from score by the difficulty ramp
    pub fall_speed: f32,
    /// Cycles over the melody; consumed by the audio collaborator
    pub melody_index: usize,
    /// Tier of the latest hit, for the HUD label
    pub last_tier: Option<HitTier>,
    /// Frames advanced while active
    pub time_ticks: u64,
    /// Simulated seconds while active
    pub elapsed: f32,
}

impl GameState {
    pub fn new(initial_speed: f32) -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            perfect_hits: 0,
            total_touches: 0,
            phase: GamePhase::Active,
            fall_speed: initial_speed,
            melody_index: 0,
            last_tier: None,
            time_ticks: 0,
            elapsed: 0.0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }
}
