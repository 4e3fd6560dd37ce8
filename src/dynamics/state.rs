use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const LUNAR_GRAVITY: f64 = 5.331_364_83; // ft/s^2
pub const STANDARD_GRAVITY: f64 = 32.174; // ft/s^2, lb -> slug conversion
pub const LUNAR_ORBITAL_SPEED: f64 = 5512.0; // ft/s, approximate low lunar orbit

// ---------------------------------------------------------------------------
// Vehicle state
// ---------------------------------------------------------------------------

/// Descent state of the lunar module at a single point in time.
/// Vertical axis is positive down for speed, horizontal is signed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub time: f64,         // s
    pub altitude: f64,     // ft
    pub v_down: f64,       // ft/s (positive = descending)
    pub horiz_pos: f64,    // ft
    pub horiz_speed: f64,  // ft/s
    pub descent_fuel: f64, // lb, never negative
    pub ascent_fuel: f64,  // lb, only read on abort
}

impl VehicleState {
    /// Vertical axis as `[altitude, v_down]`.
    pub fn vertical(&self) -> Vector2<f64> {
        Vector2::new(self.altitude, self.v_down)
    }

    /// Horizontal axis as `[horiz_pos, horiz_speed]`.
    pub fn horizontal(&self) -> Vector2<f64> {
        Vector2::new(self.horiz_pos, self.horiz_speed)
    }

    pub fn set_vertical(&mut self, v: Vector2<f64>) {
        self.altitude = v.x;
        self.v_down = v.y;
    }

    pub fn set_horizontal(&mut self, h: Vector2<f64>) {
        self.horiz_pos = h.x;
        self.horiz_speed = h.y;
    }

    pub fn fuel_exhausted(&self) -> bool {
        self.descent_fuel <= 0.0
    }

    pub fn on_surface(&self) -> bool {
        self.altitude <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> VehicleState {
        VehicleState {
            time: 0.0,
            altitude: 7500.0,
            v_down: 300.0,
            horiz_pos: 0.0,
            horiz_speed: 80.0,
            descent_fuel: 1500.0,
            ascent_fuel: 5187.0,
        }
    }

    #[test]
    fn axis_round_trip() {
        let mut s = state();
        s.set_vertical(Vector2::new(7000.0, 250.0));
        s.set_horizontal(Vector2::new(120.0, -3.0));
        assert_eq!(s.vertical(), Vector2::new(7000.0, 250.0));
        assert_eq!(s.horizontal(), Vector2::new(120.0, -3.0));
    }

    #[test]
    fn fuel_and_surface_flags() {
        let mut s = state();
        assert!(!s.fuel_exhausted());
        assert!(!s.on_surface());
        s.descent_fuel = 0.0;
        s.altitude = 0.0;
        assert!(s.fuel_exhausted());
        assert!(s.on_surface());
    }
}
