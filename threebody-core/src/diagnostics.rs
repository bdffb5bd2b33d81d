//! Conserved quantities of the three-body system
//!
//! Nothing outside the three bodies acts on them, so total momentum should
//! hold to within floating-point error and total energy should drift only
//! slowly. These are used to check integrator health, not to correct it.

use crate::engine::{Body, BODY_COUNT};
use glam::DVec2;

pub fn total_mass(bodies: &[Body; BODY_COUNT]) -> f64 {
    bodies.iter().map(|b| b.mass).sum()
}

pub fn center_of_mass(bodies: &[Body; BODY_COUNT]) -> DVec2 {
    let weighted: DVec2 = bodies.iter().map(|b| b.pos * b.mass).sum();
    weighted / total_mass(bodies)
}

/// `Σ m·v`
pub fn total_momentum(bodies: &[Body; BODY_COUNT]) -> DVec2 {
    bodies.iter().map(|b| b.vel * b.mass).sum()
}

pub fn kinetic_energy(bodies: &[Body; BODY_COUNT]) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * b.mass * b.vel.length_squared())
        .sum()
}

/// Softened pairwise potential, consistent with the force law
pub fn potential_energy(bodies: &[Body; BODY_COUNT], g: f64, softening: f64) -> f64 {
    let mut energy = 0.0;
    for i in 0..BODY_COUNT {
        for j in (i + 1)..BODY_COUNT {
            let r2 = bodies[i].pos.distance_squared(bodies[j].pos) + softening;
            energy -= g * bodies[i].mass * bodies[j].mass / r2.sqrt();
        }
    }
    energy
}

pub fn total_energy(bodies: &[Body; BODY_COUNT], g: f64, softening: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, g, softening)
}

/// Baseline momentum and energy to measure drift against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conservation {
    pub momentum: DVec2,
    pub energy: f64,
}

impl Conservation {
    pub fn measure(bodies: &[Body; BODY_COUNT], g: f64, softening: f64) -> Self {
        Self {
            momentum: total_momentum(bodies),
            energy: total_energy(bodies, g, softening),
        }
    }

    /// Magnitude of the change in total momentum since the baseline
    pub fn momentum_drift(&self, bodies: &[Body; BODY_COUNT]) -> f64 {
        (total_momentum(bodies) - self.momentum).length()
    }

    /// Change in total energy relative to the baseline's magnitude
    pub fn relative_energy_drift(&self, bodies: &[Body; BODY_COUNT], g: f64, softening: f64) -> f64 {
        let now = total_energy(bodies, g, softening);
        if self.energy == 0.0 {
            (now - self.energy).abs()
        } else {
            ((now - self.energy) / self.energy).abs()
        }
    }
}
