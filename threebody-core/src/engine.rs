use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of bodies in every simulation
pub const BODY_COUNT: usize = 3;

/// An RGB colour, serialised as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fixed-capacity history of past positions, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    /// Append a position, evicting the oldest once the trail is full
    pub fn push(&mut self, pos: DVec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent position, if any
    pub fn latest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }
}

/// A point mass in the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub mass: f64,
    pub pos: DVec2,
    pub vel: DVec2,
    color: Rgb,
    pub(crate) trail: Trail,
}

impl Body {
    pub fn new(mass: f64, pos: DVec2, vel: DVec2, color: Rgb, trail_capacity: usize) -> Self {
        Self {
            mass,
            pos,
            vel,
            color,
            trail: Trail::new(trail_capacity),
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.mass.is_finite() && self.pos.is_finite() && self.vel.is_finite()
    }
}

/// Gravitational acceleration on every body.
///
/// Each ordered pair `(i, j)` contributes `g * m_j * d / (|d|^2 + softening)^1.5`
/// with `d = pos_j - pos_i`. Coincident bodies contribute nothing since `d` is zero.
pub fn accelerations(
    positions: &[DVec2; BODY_COUNT],
    masses: &[f64; BODY_COUNT],
    g: f64,
    softening: f64,
) -> [DVec2; BODY_COUNT] {
    let mut accel = [DVec2::ZERO; BODY_COUNT];

    for i in 0..BODY_COUNT {
        for j in 0..BODY_COUNT {
            if i == j {
                continue;
            }
            let d = positions[j] - positions[i];
            let r2 = d.length_squared() + softening;
            let inv_r3 = 1.0 / (r2.sqrt() * r2);
            accel[i] += d * (g * masses[j] * inv_r3);
        }
    }

    accel
}
