//! Pianew Tiles - falling-tiles tap rhythm game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, judging, scoring, particles)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences read by the engine
//! - `highscores`: Best score and leaderboard records
//! - `persistence`: JSON save/load

pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use sim::{GameEvent, HitTier, Session};
pub use tuning::Tuning;

/// Default balance values (pixels and seconds)
pub mod consts {
    /// Lanes across the field
    pub const LANES: usize = 4;
    /// Logical field size
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 800.0;
    pub const TILE_HEIGHT: f32 = 160.0;

    /// Fall speed at score 0 (px/s)
    pub const INITIAL_FALL_SPEED: f32 = 300.0;
    pub const MAX_FALL_SPEED: f32 = 600.0;
    /// Extra fall speed per point (px/s)
    pub const SPEED_GROWTH: f32 = 0.2;
    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 0.7;

    /// Particle gravity (px/s²)
    pub const PARTICLE_GRAVITY: f32 = 540.0;
    /// Particle life lost per second
    pub const PARTICLE_DECAY: f32 = 0.9;
    pub const PARTICLE_BASE_SPEED: f32 = 240.0;
    pub const MAX_PARTICLES: usize = 256;

    /// Notes in the melody cycle
    pub const MELODY_LENGTH: usize = 28;

    /// Longest frame the clock reports (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.25;
}
