//! Particle field simulation
//!
//! Pure state: no canvas or DOM types here. The renderer owns a [`SnowField`],
//! advances it once per frame and draws whatever [`SnowField::flakes`]
//! returns.

use crate::config::SceneConfig;
use crate::constants::*;
use crate::random::RandomSource;

use std::f64::consts::TAU;

/// A single snowflake. Flakes are independent; none of them interact.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Base fall speed (px/s), fixed at spawn.
    pub speed: f64,
    /// Sway phase offset in radians.
    pub offset: f64,
    /// Sway amplitude (px).
    pub amplitude: f64,
    /// CSS fill color, chosen once at spawn.
    pub fill: String,
}

impl Particle {
    /// Produce a new random flake.
    ///
    /// With `random_y` the flake lands somewhere inside the visible area
    /// (initial population, growth on resize); without it the flake starts
    /// at `y = -size`, just above the top edge, and falls into view.
    pub fn spawn(scene: &SceneConfig, random_y: bool, rng: &mut impl RandomSource) -> Self {
        Self {
            x: rng.sample() * scene.width.max(0.0),
            y: if random_y {
                rng.sample() * scene.height.max(0.0)
            } else {
                -scene.size
            },
            radius: rng.sample() * scene.size,
            speed: rng.range(scene.min_speed, scene.max_speed),
            offset: rng.sample() * TAU,
            amplitude: rng.sample() * scene.sway,
            fill: fill_color(scene, rng),
        }
    }

    /// Horizontal draw position: base x plus sinusoidal sway, wrapped across
    /// `[-2r, width + 2r)` so flakes re-enter from the opposite edge instead
    /// of vanishing.
    pub fn display_x(&self, width: f64) -> f64 {
        let x = self.x + (self.offset + self.y / SWAY_WAVELENGTH).sin() * self.amplitude;
        let low = -2.0 * self.radius;
        let span = width + 4.0 * self.radius;
        if span > 0.0 {
            low + (x - low).rem_euclid(span)
        } else {
            x
        }
    }
}

/// Pick a fill color: one random base brightness, scaled per channel by the
/// scene tint and offset by the brightness floor.
fn fill_color(scene: &SceneConfig, rng: &mut impl RandomSource) -> String {
    let base = (rng.sample() * BRIGHTNESS_RANGE).floor();
    let channel = |tint: f64| -> u32 {
        ((base * tint.clamp(0.0, 1.0)) as u32 + BRIGHTNESS_FLOOR).min(0xFF)
    };
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(scene.red),
        channel(scene.green),
        channel(scene.blue)
    )
}

/// The list of live flakes.
#[derive(Debug, Default)]
pub struct SnowField {
    particles: Vec<Particle>,
}

impl SnowField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flakes(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Discard all flakes and repopulate at random positions inside the
    /// visible area, so startup is not an empty screen.
    pub fn populate(&mut self, scene: &SceneConfig, rng: &mut impl RandomSource) {
        self.particles.clear();
        self.resize(scene, rng);
    }

    /// Bring the flake count in line with the scene's freshly computed
    /// target: trim extras, or grow with random-y spawns so growth does not
    /// look like a burst from the top edge.
    pub fn resize(&mut self, scene: &SceneConfig, rng: &mut impl RandomSource) {
        let target = scene.particle_count();
        if self.particles.len() > target {
            self.particles.truncate(target);
        }
        while self.particles.len() < target {
            self.particles.push(Particle::spawn(scene, true, rng));
        }
    }

    /// Advance every flake by `elapsed` seconds.
    ///
    /// The vertical step is deterministic (base speed plus the wind's
    /// vertical component); the horizontal step injects fresh randomness
    /// every frame on top of the wind's horizontal component. Flakes that
    /// fall fully below the visible area are replaced in the same slot by a
    /// fresh spawn entering from the top, which keeps the draw order stable.
    pub fn advance(&mut self, scene: &SceneConfig, elapsed: f64, rng: &mut impl RandomSource) {
        let dt = elapsed.clamp(0.0, MAX_FRAME_SECONDS);
        let angle = scene.wind_angle.to_radians();
        let drift_y = angle.cos() * scene.wind_force;
        let drift_x = angle.sin() * scene.wind_force;

        for flake in &mut self.particles {
            flake.y += (flake.speed + drift_y) * dt;
            flake.x += (rng.sample() + drift_x) * dt;

            if flake.y > scene.height + 2.0 * flake.radius {
                *flake = Particle::spawn(scene, false, rng);
            }
        }
    }
}
