use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Per-axis RK4 integrator with constant acceleration over the step
// ---------------------------------------------------------------------------

/// Motion axis. The state vector is always `[position, rate]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `[altitude, v_down]`: altitude falls while v_down is positive.
    Vertical,
    /// `[horiz_pos, horiz_speed]`.
    Horizontal,
}

impl Axis {
    fn position_sign(self) -> f64 {
        match self {
            Axis::Vertical => -1.0,
            Axis::Horizontal => 1.0,
        }
    }

    /// d/dt of `[position, rate]`.
    pub fn derivative(self, state: &Vector2<f64>, accel: f64) -> Vector2<f64> {
        Vector2::new(self.position_sign() * state.y, accel)
    }
}

/// Single RK4 step for one axis.
pub fn rk4_step(axis: Axis, state: &Vector2<f64>, accel: f64, dt: f64) -> Vector2<f64> {
    let k1 = axis.derivative(state, accel);
    let k2 = axis.derivative(&(state + k1 * (dt * 0.5)), accel);
    let k3 = axis.derivative(&(state + k2 * (dt * 0.5)), accel);
    let k4 = axis.derivative(&(state + k3 * dt), accel);

    state + (k1 + 2.0 * k2 + 2.0 * k3 + k4) * (dt / 6.0)
}
