//! Initial configurations for a fresh simulation
//!
//! Bodies start on the corners of an equilateral triangle inscribed in a
//! circle, with a velocity pattern that tends to produce chaotic, long-lived
//! orbits. A small random offset on each velocity makes every reset differ.

use crate::config::SimConfig;
use crate::engine::{Body, BODY_COUNT};
use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Starting velocities in units of the base orbital speed
const VELOCITY_PATTERN: [DVec2; BODY_COUNT] = [
    DVec2::new(0.0, -1.0),
    DVec2::new(0.6, 0.2),
    DVec2::new(-0.5, 0.5),
];

/// Orbital speed estimate `sqrt(G * M / r) * speed_factor`
pub fn base_speed(config: &SimConfig, radius: f64) -> f64 {
    let total_mass: f64 = config.masses.iter().sum();
    (config.gravity * total_mass / radius).sqrt() * config.speed_factor
}

/// Three bodies evenly spaced on a circle of `radius` around `center`.
///
/// Each velocity component gets an independent offset drawn uniformly from
/// `[-0.5, 0.5) * base_speed * perturbation`; with zero perturbation the
/// result is fully deterministic and `rng` is not consulted.
pub fn triangle_configuration<R: Rng + ?Sized>(
    center: DVec2,
    radius: f64,
    config: &SimConfig,
    rng: &mut R,
) -> [Body; BODY_COUNT] {
    let speed = base_speed(config, radius);
    let jitter = speed * config.perturbation;

    std::array::from_fn(|i| {
        let angle = TAU * i as f64 / BODY_COUNT as f64;
        let pos = center + DVec2::from_angle(angle) * radius;
        let mut vel = VELOCITY_PATTERN[i] * speed;
        if jitter > 0.0 {
            vel += DVec2::new(
                rng.gen_range(-0.5f64..0.5) * jitter,
                rng.gen_range(-0.5f64..0.5) * jitter,
            );
        }
        Body::new(
            config.masses[i],
            pos,
            vel,
            config.colors[i],
            config.trail_capacity,
        )
    })
}
