//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Driven by explicit deltas or timestamps, never self-scheduled
//! - Seeded RNG only
//! - Stable iteration order (tiles by id)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod judge;
pub mod particles;
pub mod ramp;
pub mod scoring;
pub mod session;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use judge::{HitTier, Verdict, classify};
pub use particles::{Particle, ParticleField};
pub use scoring::{GameSummary, OverCause};
pub use session::{Session, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, HapticCue, Tile, TileStatus};
pub use tick::Spawner;
