//! Decorative animations for key presses
//!
//! Two independent effects, both advanced once per frame with the frame's
//! delta time:
//!
//! - [`ParticleSystem`] spawns a burst of small dots at a pressed key. The
//!   dots fall under gravity, lose speed to air resistance, bounce off the
//!   bottom of the window and fade out.
//! - [`PressAnimations`] shrinks a pressed key briefly and lets it spring
//!   back.
//!
//! Neither knows anything about the calculator; the app hands them press
//! events and draws what they hold.

use std::collections::HashMap;
use std::hash::Hash;

use egui::{Color32, Painter, Pos2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EffectsConfig;

/// Length of the key press animation in seconds.
pub const PRESS_DURATION: f32 = 0.18;

/// How far a key shrinks at the deepest point of a press.
pub const PRESS_DEPTH: f32 = 0.08;

/// Below this speed a bouncing particle comes to rest on the floor.
const REST_SPEED: f32 = 20.0;

/// Largest time step integrated at once; longer frames are split.
const MAX_STEP: f32 = 1.0 / 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Pos2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color32,
    /// 1.0 when spawned, removed at 0.0.
    pub opacity: f32,
    pub age: f32,
}

impl Particle {
    fn is_alive(&self, lifetime: f32) -> bool {
        self.opacity > 0.0 && self.age < lifetime
    }

    fn step(&mut self, dt: f32, floor: f32, fx: &EffectsConfig) {
        self.vel.y += fx.gravity * dt;
        let drag = (1.0 - fx.air_resistance).max(0.0).powf(dt);
        self.vel *= drag;
        self.pos += self.vel * dt;

        let bottom = floor - self.radius;
        if self.pos.y > bottom {
            self.pos.y = bottom;
            if self.vel.y > 0.0 {
                self.vel.y = -self.vel.y * fx.bounce;
                self.vel.x *= fx.bounce.max(0.5);
            }
            if self.vel.y.abs() < REST_SPEED {
                self.vel.y = 0.0;
            }
        }

        self.age += dt;
        self.opacity = (self.opacity - fx.fade_rate * dt).max(0.0);
    }
}

/// Owns every live particle.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    effects: EffectsConfig,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(effects: EffectsConfig) -> Self {
        Self {
            particles: Vec::new(),
            effects,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic spawns, for tests.
    pub fn with_seed(effects: EffectsConfig, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            effects,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.effects.enabled = enabled;
        if !enabled {
            self.particles.clear();
        }
    }

    /// Spawn a burst at `origin`, colors picked round-robin from `colors`.
    pub fn burst(&mut self, origin: Pos2, colors: &[Color32]) {
        if !self.effects.enabled || colors.is_empty() {
            return;
        }
        for i in 0..self.effects.particles_per_burst {
            // mostly upward, fanned out to both sides
            let angle = self
                .rng
                .gen_range(-std::f32::consts::PI * 0.9..-std::f32::consts::PI * 0.1);
            let speed = self.rng.gen_range(120.0..320.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::angled(angle) * speed,
                radius: self.rng.gen_range(1.5..3.5),
                color: colors[i % colors.len()],
                opacity: 1.0,
                age: 0.0,
            });
        }
    }

    /// Advance every particle by `dt` seconds. `floor` is the y coordinate
    /// particles bounce on.
    pub fn update(&mut self, dt: f32, floor: f32) {
        if dt <= 0.0 {
            return;
        }
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP);
            for particle in &mut self.particles {
                particle.step(step, floor, &self.effects);
            }
            remaining -= step;
        }
        let lifetime = self.effects.lifetime;
        self.particles.retain(|p| p.is_alive(lifetime));
    }

    pub fn draw(&self, painter: &Painter) {
        for p in &self.particles {
            painter.circle_filled(p.pos, p.radius, p.color.gamma_multiply(p.opacity));
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_animating(&self) -> bool {
        !self.particles.is_empty()
    }
}

/// Per-key press animation progress, keyed by whatever identifies a key.
#[derive(Debug)]
pub struct PressAnimations<K> {
    /// Seconds elapsed since each press.
    active: HashMap<K, f32>,
}

impl<K> Default for PressAnimations<K> {
    fn default() -> Self {
        Self { active: HashMap::new() }
    }
}

impl<K: Eq + Hash + Copy> PressAnimations<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the animation for `key`.
    pub fn trigger(&mut self, key: K) {
        self.active.insert(key, 0.0);
    }

    pub fn update(&mut self, dt: f32) {
        for elapsed in self.active.values_mut() {
            *elapsed += dt;
        }
        self.active.retain(|_, elapsed| *elapsed < PRESS_DURATION);
    }

    /// Current draw scale of `key`: 1.0 at rest.
    pub fn scale(&self, key: &K) -> f32 {
        match self.active.get(key) {
            Some(elapsed) => {
                let t = (elapsed / PRESS_DURATION).clamp(0.0, 1.0);
                1.0 - PRESS_DEPTH * (t * std::f32::consts::PI).sin()
            }
            None => 1.0,
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: f32 = 400.0;
    const COLORS: [Color32; 2] = [Color32::RED, Color32::BLUE];

    fn system() -> ParticleSystem {
        ParticleSystem::with_seed(EffectsConfig::default(), 7)
    }

    fn particle_at(pos: Pos2, vel: Vec2) -> Particle {
        Particle {
            pos,
            vel,
            radius: 2.0,
            color: Color32::WHITE,
            opacity: 1.0,
            age: 0.0,
        }
    }

    #[test]
    fn test_burst_spawns_configured_count() {
        let mut ps = system();
        ps.burst(Pos2::new(100.0, 100.0), &COLORS);
        assert_eq!(ps.particles().len(), EffectsConfig::default().particles_per_burst);
        assert!(ps.particles().iter().all(|p| p.vel.y < 0.0));
        assert!(ps.particles().iter().all(|p| p.opacity == 1.0));
        assert!(ps.is_animating());
    }

    #[test]
    fn test_disabled_effects_spawn_nothing() {
        let mut ps = system();
        ps.set_enabled(false);
        ps.burst(Pos2::new(100.0, 100.0), &COLORS);
        assert!(ps.particles().is_empty());

        let mut ps = system();
        ps.burst(Pos2::new(100.0, 100.0), &[]);
        assert!(ps.particles().is_empty());
    }

    #[test]
    fn test_gravity_pulls_down() {
        let fx = EffectsConfig::default();
        let mut p = particle_at(Pos2::new(0.0, 0.0), Vec2::ZERO);
        p.step(0.02, FLOOR, &fx);
        assert!(p.vel.y > 0.0);
        assert!(p.pos.y > 0.0);
    }

    #[test]
    fn test_air_resistance_slows_horizontal_motion() {
        let fx = EffectsConfig::default();
        let mut p = particle_at(Pos2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        p.step(0.02, FLOOR, &fx);
        assert!(p.vel.x < 100.0);
        assert!(p.vel.x > 0.0);
    }

    #[test]
    fn test_bounce_reflects_and_loses_energy() {
        let fx = EffectsConfig::default();
        let mut p = particle_at(Pos2::new(0.0, FLOOR - 3.0), Vec2::new(0.0, 300.0));
        p.step(0.02, FLOOR, &fx);
        assert_eq!(p.pos.y, FLOOR - p.radius);
        assert!(p.vel.y < 0.0);
        assert!(p.vel.y.abs() < 300.0);
    }

    #[test]
    fn test_particles_stay_above_floor() {
        let mut ps = system();
        ps.burst(Pos2::new(100.0, FLOOR - 10.0), &COLORS);
        for _ in 0..30 {
            ps.update(1.0 / 60.0, FLOOR);
            assert!(ps.particles().iter().all(|p| p.pos.y <= FLOOR - p.radius + 1e-3));
        }
    }

    #[test]
    fn test_opacity_fades_monotonically() {
        let mut ps = system();
        ps.burst(Pos2::new(100.0, 100.0), &COLORS);
        let mut last = 1.0;
        for _ in 0..10 {
            ps.update(1.0 / 60.0, FLOOR);
            let opacity = ps.particles()[0].opacity;
            assert!(opacity < last);
            last = opacity;
        }
    }

    #[test]
    fn test_dead_particles_removed() {
        let mut ps = system();
        ps.burst(Pos2::new(100.0, 100.0), &COLORS);
        ps.update(5.0, FLOOR);
        assert!(ps.particles().is_empty());
        assert!(!ps.is_animating());
    }

    #[test]
    fn test_press_scale_springs_back() {
        let mut presses = PressAnimations::new();
        assert_eq!(presses.scale(&1), 1.0);

        presses.trigger(1);
        presses.update(PRESS_DURATION / 2.0);
        let mid = presses.scale(&1);
        assert!(mid < 1.0);
        assert!(mid >= 1.0 - PRESS_DEPTH - 1e-6);
        assert!(presses.is_animating());

        presses.update(PRESS_DURATION);
        assert_eq!(presses.scale(&1), 1.0);
        assert!(!presses.is_animating());
    }

    #[test]
    fn test_press_retrigger_restarts() {
        let mut presses = PressAnimations::new();
        presses.trigger('a');
        presses.update(PRESS_DURATION * 0.9);
        presses.trigger('a');
        presses.update(PRESS_DURATION * 0.5);
        assert!(presses.is_animating());
        assert!(presses.scale(&'a') < 1.0);
    }
}
