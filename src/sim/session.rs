//! One play session: the engine value collaborators drive
//!
//! The session never schedules itself. An outer loop calls `frame` (with a
//! timestamp) or `advance` (with a delta) once per frame and forwards taps
//! through `tap`; every call runs to completion before the next.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::judge::{self, Verdict};
use super::particles::{Particle, ParticleField};
use super::ramp;
use super::scoring::{self, GameSummary, OverCause};
use super::state::{GameEvent, GameState, HapticCue, Tile, TileStatus};
use super::tick::{self, Spawner};
use crate::settings::Settings;
use crate::tuning::{EmptyLanePolicy, Tuning, TuningError};

/// Owned copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub tiles: Vec<Tile>,
    pub particles: Vec<Particle>,
}

#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    state: GameState,
    tiles: Vec<Tile>,
    particles: ParticleField,
    spawner: Spawner,
    clock: FrameClock,
    events: Vec<GameEvent>,
    visual_effects: bool,
    haptics: bool,
    /// Best score known when the current run started
    best_at_start: u64,
    /// Best score including finished runs of this session
    best_score: u64,
}

impl Session {
    /// Start a run. Fails only on invalid tuning.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!("New session: seed={seed}, lanes={}", tuning.lanes);
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            state: GameState::new(tuning.initial_speed),
            tuning,
            seed,
            tiles: Vec::new(),
            particles: ParticleField::new(),
            spawner: Spawner::new(),
            clock: FrameClock::new(),
            events: Vec::new(),
            visual_effects: true,
            haptics: true,
            best_at_start: 0,
            best_score: 0,
        })
    }

    /// Read the feedback flags from player settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.set_feedback(settings.visual_effects, settings.haptics);
        self
    }

    /// Best score so far, used only for the `new_best` summary flag
    pub fn with_best_score(mut self, best: u64) -> Self {
        self.best_at_start = best;
        self.best_score = best;
        self
    }

    pub fn set_feedback(&mut self, visual_effects: bool, haptics: bool) {
        self.visual_effects = visual_effects;
        self.haptics = haptics;
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Live tiles ordered by id
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            tiles: self.tiles.clone(),
            particles: self.particles.particles().to_vec(),
        }
    }

    /// Take the notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Summary of the current run (final once the run is over)
    pub fn summary(&self) -> GameSummary {
        GameSummary::from_state(&self.state, &self.tuning, self.best_at_start)
    }

    /// Drive one frame from a timestamp in milliseconds
    pub fn frame(&mut self, now_ms: f64) {
        if !self.state.is_active() {
            return;
        }
        let dt = self.clock.delta(now_ms, self.tuning.max_frame_delta);
        self.advance(dt);
    }

    /// Advance the simulation by `dt` seconds. No-op unless active or when
    /// `dt` is not a positive number.
    pub fn advance(&mut self, dt: f32) {
        if !self.state.is_active() || !(dt > 0.0) {
            return;
        }

        tick::settle(&mut self.tiles);

        let speed = self.state.fall_speed;
        if let Some(tile) = self
            .spawner
            .step(&mut self.tiles, &mut self.rng, &self.tuning, speed, dt)
        {
            log::debug!("Spawned tile {} in lane {}", tile.id, tile.lane);
            self.events.push(GameEvent::TileSpawned {
                id: tile.id,
                lane: tile.lane,
            });
        }

        let escaped = tick::fall(&mut self.tiles, &self.tuning, speed, dt);
        self.state.time_ticks += 1;
        self.state.elapsed += dt;
        if let Some(tile) = escaped {
            self.finish(OverCause::TileEscaped {
                tile_id: tile.id,
                lane: tile.lane,
            });
        }

        self.particles.advance(dt, &self.tuning.particles);
        self.state.fall_speed = ramp::fall_speed(&self.tuning, self.state.score);
    }

    /// Judge a tap in `lane`. `moment_ms` is informational: taps are judged
    /// against positions from the last completed frame.
    ///
    /// Returns the verdict, or `None` when the tap was ignored (not active,
    /// lane out of range, or an empty lane under `EmptyLanePolicy::Ignore`).
    pub fn tap(&mut self, lane: usize, moment_ms: f64) -> Option<Verdict> {
        if !self.state.is_active() {
            log::debug!("Tap at {moment_ms:.0}ms ignored: phase {:?}", self.state.phase);
            return None;
        }
        if lane >= self.tuning.lanes {
            log::warn!("Tap in lane {lane} ignored: only {} lanes", self.tuning.lanes);
            return None;
        }

        let Some((index, verdict)) = judge::judge(
            &self.tiles,
            lane,
            self.tuning.target_line_y,
            &self.tuning.windows,
        ) else {
            match self.tuning.empty_lane {
                EmptyLanePolicy::Ignore => {
                    log::debug!("Tap in empty lane {lane} ignored");
                }
                EmptyLanePolicy::EndRun => self.finish(OverCause::EmptyLaneTap { lane }),
            }
            return None;
        };

        if !verdict.tier.is_hit() {
            log::debug!(
                "Mistimed tap on tile {} (distance {:.1})",
                verdict.tile_id,
                verdict.distance
            );
            self.finish(OverCause::MistimedTap {
                tile_id: verdict.tile_id,
                lane,
                distance: verdict.distance,
            });
            return Some(verdict);
        }

        let note_index = self.state.melody_index;
        let points = scoring::record_hit(&mut self.state, verdict.tier, &self.tuning)?;
        self.tiles[index].status = TileStatus::Hit;
        log::debug!(
            "{} on tile {} (+{points}, combo {})",
            verdict.tier.label(),
            verdict.tile_id,
            self.state.combo
        );

        self.events.push(GameEvent::Hit {
            tile_id: verdict.tile_id,
            lane,
            tier: verdict.tier,
            points,
            combo: self.state.combo,
            note_index,
        });
        if self.haptics {
            self.events.push(GameEvent::Haptic(HapticCue::for_tier(verdict.tier)));
        }

        let origin = Vec2::new(self.tuning.lane_center_x(lane), self.tuning.target_line_y);
        self.particles
            .emit(verdict.tier, origin, self.visual_effects, &self.tuning.particles);

        Some(verdict)
    }

    /// Freeze the run; no-op unless active
    pub fn pause(&mut self) {
        if scoring::pause(&mut self.state) {
            log::debug!("Paused at tick {}", self.state.time_ticks);
            self.events.push(GameEvent::Paused);
        }
    }

    /// Continue a paused run. The next frame reports a zero delta so the
    /// pause duration is never simulated.
    pub fn resume(&mut self) {
        if scoring::resume(&mut self.state) {
            self.clock.invalidate();
            log::debug!("Resumed at tick {}", self.state.time_ticks);
            self.events.push(GameEvent::Resumed);
        }
    }

    /// Throw the current run away and start a new one with the same tuning.
    /// The RNG keeps its stream, so the next run gets a different pattern.
    pub fn reset(&mut self) {
        log::info!("Reset after score {}", self.state.score);
        self.state = GameState::new(self.tuning.initial_speed);
        self.tiles.clear();
        self.particles.clear();
        self.spawner = Spawner::new();
        self.clock.invalidate();
        self.events.clear();
        self.best_at_start = self.best_score;
    }

    fn finish(&mut self, cause: OverCause) {
        if !scoring::end_run(&mut self.state) {
            return;
        }
        let summary = self.summary();
        self.best_score = self.best_score.max(summary.score);
        log::info!(
            "Game over ({cause:?}): score={}, stars={}, precision={}%",
            summary.score,
            summary.stars,
            summary.precision
        );
        if self.haptics {
            self.events.push(GameEvent::Haptic(HapticCue::Error));
        }
        self.events.push(GameEvent::GameOver { cause, summary });
    }
}
