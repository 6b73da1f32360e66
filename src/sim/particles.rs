//! Hit feedback particles
//!
//! Purely visual. Nothing here reads or writes `GameState`.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::judge::HitTier;
use crate::tuning::ParticleTuning;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u64,
    pub pos: Vec2,
    /// px/s
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    /// Tier of the hit that emitted it (color lookup)
    pub tag: HitTier,
}

/// Live particle set plus its id counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleField {
    particles: Vec<Particle>,
    next_id: u64,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Radial burst at `origin`. Returns how many particles were created.
    /// Nothing is emitted for a miss or when effects are off.
    pub fn emit(&mut self, tier: HitTier, origin: Vec2, enabled: bool, tuning: &ParticleTuning) -> usize {
        let Some(index) = tier.hit_index() else {
            return 0;
        };
        if !enabled {
            return 0;
        }
        let room = tuning.max_particles.saturating_sub(self.particles.len());
        let count = tuning.counts[index];
        let speed = tuning.base_speed * tuning.speed_scale[index];

        let emitted = count.min(room);
        for i in 0..emitted {
            // Spread over the full burst even when the cap truncates it
            let angle = i as f32 / count as f32 * TAU;
            let id = self.next_id;
            self.next_id += 1;
            self.particles.push(Particle {
                id,
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                tag: tier,
            });
        }
        emitted
    }

    /// Integrate one frame: move, fall, fade, drop the dead
    pub fn advance(&mut self, dt: f32, tuning: &ParticleTuning) {
        if dt <= 0.0 {
            return;
        }
        for p in self.particles.iter_mut() {
            p.pos += p.vel * dt;
            p.vel.y += tuning.gravity * dt;
            p.life -= tuning.decay * dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Drop every particle and restart ids
    pub fn clear(&mut self) {
        self.particles.clear();
        self.next_id = 0;
    }
}
