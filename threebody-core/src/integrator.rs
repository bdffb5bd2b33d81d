use crate::engine::{accelerations, Body, BODY_COUNT};
use glam::DVec2;

/// Kinematic state of all bodies, decoupled from trails and colours
#[derive(Debug, Clone, Copy)]
struct State {
    pos: [DVec2; BODY_COUNT],
    vel: [DVec2; BODY_COUNT],
}

/// Time derivative of a [`State`]
#[derive(Debug, Clone, Copy)]
struct Derivative {
    dpos: [DVec2; BODY_COUNT],
    dvel: [DVec2; BODY_COUNT],
}

impl State {
    fn capture(bodies: &[Body; BODY_COUNT]) -> Self {
        Self {
            pos: bodies.each_ref().map(|b| b.pos),
            vel: bodies.each_ref().map(|b| b.vel),
        }
    }

    fn offset(&self, k: &Derivative, h: f64) -> Self {
        let mut next = *self;
        for i in 0..BODY_COUNT {
            next.pos[i] += k.dpos[i] * h;
            next.vel[i] += k.dvel[i] * h;
        }
        next
    }

    fn derivative(&self, masses: &[f64; BODY_COUNT], g: f64, softening: f64) -> Derivative {
        Derivative {
            dpos: self.vel,
            dvel: accelerations(&self.pos, masses, g, softening),
        }
    }
}

/// Step the simulation forward by dt using classical fourth-order Runge-Kutta.
///
/// Every stage is evaluated from a full copy of the pre-step state, and the
/// result is committed to all bodies at once before the trails are extended.
pub fn rk4_step(bodies: &mut [Body; BODY_COUNT], dt: f64, g: f64, softening: f64) {
    let masses = bodies.each_ref().map(|b| b.mass);
    let s0 = State::capture(bodies);

    let k1 = s0.derivative(&masses, g, softening);
    let k2 = s0.offset(&k1, dt * 0.5).derivative(&masses, g, softening);
    let k3 = s0.offset(&k2, dt * 0.5).derivative(&masses, g, softening);
    let k4 = s0.offset(&k3, dt).derivative(&masses, g, softening);

    let w = dt / 6.0;
    for (i, body) in bodies.iter_mut().enumerate() {
        body.pos += (k1.dpos[i] + 2.0 * k2.dpos[i] + 2.0 * k3.dpos[i] + k4.dpos[i]) * w;
        body.vel += (k1.dvel[i] + 2.0 * k2.dvel[i] + 2.0 * k3.dvel[i] + k4.dvel[i]) * w;
        body.trail.push(body.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Rgb;

    fn still_bodies() -> [Body; BODY_COUNT] {
        [
            Body::new(1.0, DVec2::new(-10.0, 0.0), DVec2::ZERO, Rgb(255, 0, 0), 8),
            Body::new(1.0, DVec2::new(10.0, 0.0), DVec2::ZERO, Rgb(0, 255, 0), 8),
            Body::new(1.0, DVec2::new(0.0, 10.0), DVec2::ZERO, Rgb(0, 0, 255), 8),
        ]
    }

    #[test]
    fn zero_dt_only_extends_trails() {
        let mut bodies = still_bodies();
        let before = bodies.clone();
        rk4_step(&mut bodies, 0.0, 1.0, 1e-6);
        for (b, a) in bodies.iter().zip(before.iter()) {
            assert_eq!(b.pos, a.pos);
            assert_eq!(b.vel, a.vel);
            assert_eq!(b.trail().len(), 1);
            assert_eq!(b.trail().latest(), Some(b.pos));
        }
    }

    #[test]
    fn bodies_at_rest_fall_inward() {
        let mut bodies = still_bodies();
        let center = DVec2::new(0.0, 10.0 / 3.0);
        let before: Vec<f64> = bodies.iter().map(|b| b.pos.distance(center)).collect();
        rk4_step(&mut bodies, 0.1, 1.0, 1e-6);
        for (b, d0) in bodies.iter().zip(before) {
            assert!(b.pos.distance(center) < d0);
        }
    }
}
