pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod runtime;
pub mod scenario;

pub use config::{SimConfig, Viewport};
pub use diagnostics::Conservation;
pub use engine::{accelerations, Body, Rgb, Trail, BODY_COUNT};
pub use error::{ConfigError, SimError};
pub use integrator::rk4_step;
pub use runtime::{BodyView, RunState, Simulation};
