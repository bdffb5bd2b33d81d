//! Simulation configuration
//!
//! Every field has a default, so a configuration file only needs to name the
//! values it changes.

use crate::engine::{Rgb, BODY_COUNT};
use crate::error::{ConfigError, SimError};
use crate::runtime::MAX_TIME_SCALE;
use serde::{Deserialize, Serialize};

/// Smallest width or height a viewport is allowed to have
pub const MIN_VIEWPORT_SIDE: f64 = 100.0;

/// Tunable parameters for physics, time stepping and reset geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant (visual scale, not physically calibrated)
    pub gravity: f64,
    /// Added to squared distances so near-coincident bodies stay finite
    pub softening: f64,
    /// Simulated seconds per wall-clock second
    pub time_scale: f64,
    /// Largest single RK4 step, in simulated seconds
    pub max_substep: f64,
    /// Wall-clock frame time is clamped to this many seconds
    pub max_frame_time: f64,
    /// Number of past positions kept per body
    pub trail_capacity: usize,
    pub masses: [f64; BODY_COUNT],
    pub colors: [Rgb; BODY_COUNT],
    /// Starting circle radius as a fraction of the viewport's shorter side
    pub radius_fraction: f64,
    /// Multiplier on the estimated orbital speed
    pub speed_factor: f64,
    /// Random velocity offset per component, as a fraction of base speed
    pub perturbation: f64,
    /// Fixed seed for reproducible resets; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            softening: 1e-6,
            time_scale: 0.7,
            max_substep: 0.02,
            max_frame_time: 0.06,
            trail_capacity: 160,
            masses: [1.0, 0.9, 0.7],
            colors: [Rgb(200, 160, 255), Rgb(255, 190, 130), Rgb(160, 255, 190)],
            radius_fraction: 0.18,
            speed_factor: 0.55,
            perturbation: 0.12,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document and validate the result
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        positive("gravity", self.gravity)?;
        positive("softening", self.softening)?;
        positive("max_substep", self.max_substep)?;
        positive("max_frame_time", self.max_frame_time)?;
        positive("radius_fraction", self.radius_fraction)?;
        non_negative("time_scale", self.time_scale)?;
        if self.time_scale > MAX_TIME_SCALE {
            return Err(SimError::InvalidParameter {
                name: "time_scale",
                value: self.time_scale,
            });
        }
        non_negative("speed_factor", self.speed_factor)?;
        non_negative("perturbation", self.perturbation)?;

        if self.trail_capacity == 0 {
            return Err(SimError::ZeroTrailCapacity);
        }

        for (index, &mass) in self.masses.iter().enumerate() {
            if !(mass.is_finite() && mass > 0.0) {
                return Err(SimError::NonPositiveMass { index, mass });
            }
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

/// Drawing area in pixels; reset geometry is derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Each side is clamped to at least [`MIN_VIEWPORT_SIDE`]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: clamp_side(width),
            height: clamp_side(height),
        }
    }

    pub fn center(&self) -> glam::DVec2 {
        glam::DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

fn clamp_side(side: f64) -> f64 {
    if side.is_finite() {
        side.floor().max(MIN_VIEWPORT_SIDE)
    } else {
        MIN_VIEWPORT_SIDE
    }
}
