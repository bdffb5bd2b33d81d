use crate::config::{SimConfig, Viewport};
use crate::engine::{Body, Rgb, Trail, BODY_COUNT};
use crate::error::SimError;
use crate::integrator::rk4_step;
use crate::scenario::triangle_configuration;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Remaining budget below which the substep loop stops
pub const RESIDUAL_EPSILON: f64 = 1e-8;

/// Largest time scale `advance` honours; larger values are clamped
pub const MAX_TIME_SCALE: f64 = 100.0;

/// Hard limit on RK4 steps taken by a single `integrate` call
pub const MAX_SUBSTEPS_PER_CALL: usize = 100_000;

/// Whether `advance` integrates or is a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Read-only view of one body for drawing
#[derive(Debug, Clone, Copy)]
pub struct BodyView<'a> {
    pub position: DVec2,
    pub color: Rgb,
    pub trail: &'a Trail,
}

/// Three gravitating bodies and the driver that advances them
#[derive(Debug)]
pub struct Simulation {
    bodies: [Body; BODY_COUNT],
    config: SimConfig,
    viewport: Viewport,
    rng: StdRng,
    state: RunState,
    elapsed: f64,
}

impl Simulation {
    /// Validate `config` and start from a random configuration sized to `viewport`
    pub fn new(config: SimConfig, viewport: Viewport) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let radius = viewport.shorter_side() * config.radius_fraction;
        let bodies = triangle_configuration(viewport.center(), radius, &config, &mut rng);
        log::info!(
            "simulation created: {}x{} viewport, radius {:.1}",
            viewport.width,
            viewport.height,
            radius
        );
        Ok(Self {
            bodies,
            config,
            viewport,
            rng,
            state: RunState::Running,
            elapsed: 0.0,
        })
    }

    /// Start from explicit bodies; subsequent resets use `config` and `viewport`
    pub fn from_bodies(
        bodies: [Body; BODY_COUNT],
        config: SimConfig,
        viewport: Viewport,
    ) -> Result<Self, SimError> {
        config.validate()?;
        for (index, body) in bodies.iter().enumerate() {
            if !(body.mass.is_finite() && body.mass > 0.0) {
                return Err(SimError::NonPositiveMass {
                    index,
                    mass: body.mass,
                });
            }
            if !body.is_finite() {
                return Err(SimError::NonFiniteState { index });
            }
        }
        log::info!("simulation created from explicit bodies");
        Ok(Self {
            bodies,
            rng: seeded_rng(config.seed),
            config,
            viewport,
            state: RunState::Running,
            elapsed: 0.0,
        })
    }

    /// Replace all bodies with a fresh randomised configuration and clear trails.
    /// The run state is left as it was.
    pub fn reset(&mut self) {
        let radius = self.viewport.shorter_side() * self.config.radius_fraction;
        self.bodies = triangle_configuration(
            self.viewport.center(),
            radius,
            &self.config,
            &mut self.rng,
        );
        self.elapsed = 0.0;
        log::info!(
            "reset: radius {:.1} around ({:.1}, {:.1})",
            radius,
            self.viewport.center().x,
            self.viewport.center().y
        );
    }

    /// Record a new drawing area; takes effect at the next reset
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
    }

    /// One RK4 step of exactly `dt` simulated seconds, regardless of run state.
    /// Non-finite or non-positive `dt` is ignored.
    pub fn step(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            log::debug!("ignoring step of {}s", dt);
            return;
        }
        rk4_step(
            &mut self.bodies,
            dt,
            self.config.gravity,
            self.config.softening,
        );
        self.elapsed += dt;
    }

    /// Consume `budget` simulated seconds in steps no larger than `max_substep`.
    /// Returns the number of steps taken, at most [`MAX_SUBSTEPS_PER_CALL`].
    pub fn integrate(&mut self, budget: f64) -> usize {
        if !budget.is_finite() {
            log::debug!("ignoring non-finite budget {}", budget);
            return 0;
        }

        let max_substep = self.config.max_substep;
        let mut remaining = budget;
        let mut substeps = 0;

        // negative budgets fail the comparison and do nothing
        while remaining > RESIDUAL_EPSILON {
            if substeps == MAX_SUBSTEPS_PER_CALL {
                log::warn!(
                    "substep limit reached, dropping {:.3}s of simulated time",
                    remaining
                );
                break;
            }
            let h = max_substep.min(remaining);
            self.step(h);
            remaining -= h;
            substeps += 1;
        }

        substeps
    }

    /// Advance by a wall-clock frame interval scaled by `time_scale`.
    ///
    /// Has no effect while stopped. `elapsed` is clamped to `max_frame_time`
    /// so a stalled host does not produce one enormous jump.
    pub fn advance(&mut self, elapsed: f64, time_scale: f64) -> usize {
        if self.state == RunState::Stopped {
            return 0;
        }

        let frame = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let frame = if frame > self.config.max_frame_time {
            log::debug!(
                "frame time {:.3}s clamped to {:.3}s",
                frame,
                self.config.max_frame_time
            );
            self.config.max_frame_time
        } else {
            frame
        };

        if !(time_scale.is_finite() && time_scale >= 0.0) {
            log::debug!("ignoring time scale {}", time_scale);
            return 0;
        }
        let time_scale = if time_scale > MAX_TIME_SCALE {
            log::debug!("time scale {} clamped to {}", time_scale, MAX_TIME_SCALE);
            MAX_TIME_SCALE
        } else {
            time_scale
        };

        let substeps = self.integrate(frame * time_scale);
        log::trace!("advanced {:.4}s in {} substeps", frame * time_scale, substeps);
        substeps
    }

    /// Advance using the configured time scale
    pub fn advance_frame(&mut self, elapsed: f64) -> usize {
        self.advance(elapsed, self.config.time_scale)
    }

    pub fn snapshot(&self) -> [BodyView<'_>; BODY_COUNT] {
        self.bodies.each_ref().map(|b| BodyView {
            position: b.pos,
            color: b.color(),
            trail: b.trail(),
        })
    }

    pub fn bodies(&self) -> &[Body; BODY_COUNT] {
        &self.bodies
    }

    pub fn start(&mut self) {
        if self.state != RunState::Running {
            log::debug!("simulation started");
            self.state = RunState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            log::debug!("simulation stopped");
            self.state = RunState::Stopped;
        }
    }

    pub fn toggle(&mut self) {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Simulated seconds since the last reset
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
