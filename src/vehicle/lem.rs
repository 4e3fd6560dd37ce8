use serde::Deserialize;

use crate::dynamics::state::STANDARD_GRAVITY;

// ---------------------------------------------------------------------------
// Lunar module definition (descent stage + ascent stage)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LunarModule {
    pub descent_dry_mass: f64,      // lb
    pub descent_fuel: f64,          // lb, loaded at start
    pub ascent_dry_mass: f64,       // lb
    pub ascent_fuel: f64,           // lb
    pub vex: f64,                   // ft/s, descent engine exhaust velocity
    pub ascent_vex: f64,            // ft/s
    pub max_vertical_burn: f64,     // lb/s
    pub max_horiz_burn: f64,        // lb/s, symmetric about zero
    pub min_abort_altitude: f64,    // ft
}

impl LunarModule {
    /// Total mass with both stages for the fuel currently on board.
    pub fn total_mass(&self, descent_fuel: f64, ascent_fuel: f64) -> f64 {
        self.descent_dry_mass + descent_fuel + self.ascent_dry_mass + ascent_fuel
    }

    pub fn mass_slugs(&self, descent_fuel: f64, ascent_fuel: f64) -> f64 {
        self.total_mass(descent_fuel, ascent_fuel) / STANDARD_GRAVITY
    }

    /// Ideal ascent-stage delta-v (Tsiolkovsky) with the given ascent fuel.
    pub fn ascent_delta_v(&self, ascent_fuel: f64) -> f64 {
        let mass_ratio = (self.ascent_dry_mass + ascent_fuel) / self.ascent_dry_mass;
        self.ascent_vex * mass_ratio.ln()
    }

    pub fn vertical_burn_in_range(&self, v_burn: f64) -> bool {
        (0.0..=self.max_vertical_burn).contains(&v_burn)
    }

    pub fn horiz_burn_in_range(&self, h_burn: f64) -> bool {
        (-self.max_horiz_burn..=self.max_horiz_burn).contains(&h_burn)
    }
}

impl Default for LunarModule {
    fn default() -> Self {
        presets::apollo()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct LunarModuleBuilder {
    lem: LunarModule,
}

impl LunarModuleBuilder {
    pub fn new() -> Self {
        Self { lem: presets::apollo() }
    }

    pub fn descent_dry_mass(mut self, v: f64) -> Self { self.lem.descent_dry_mass = v; self }
    pub fn descent_fuel(mut self, v: f64) -> Self { self.lem.descent_fuel = v; self }
    pub fn ascent_dry_mass(mut self, v: f64) -> Self { self.lem.ascent_dry_mass = v; self }
    pub fn ascent_fuel(mut self, v: f64) -> Self { self.lem.ascent_fuel = v; self }
    pub fn vex(mut self, v: f64) -> Self { self.lem.vex = v; self }
    pub fn ascent_vex(mut self, v: f64) -> Self { self.lem.ascent_vex = v; self }
    pub fn max_vertical_burn(mut self, v: f64) -> Self { self.lem.max_vertical_burn = v; self }
    pub fn max_horiz_burn(mut self, v: f64) -> Self { self.lem.max_horiz_burn = v; self }
    pub fn min_abort_altitude(mut self, v: f64) -> Self { self.lem.min_abort_altitude = v; self }

    pub fn build(self) -> LunarModule {
        self.lem
    }
}

impl Default for LunarModuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

pub mod presets {
    use super::LunarModule;

    /// Apollo LM after AGC failure at 7500 ft (16,237 lb total).
    pub fn apollo() -> LunarModule {
        LunarModule {
            descent_dry_mass: 4700.0,
            descent_fuel: 1500.0,
            ascent_dry_mass: 4850.0,
            ascent_fuel: 5187.0,
            vex: 10_000.0,
            ascent_vex: 10_000.0,
            max_vertical_burn: 250.0,
            max_horiz_burn: 10.0,
            min_abort_altitude: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apollo_total_mass() {
        let lem = presets::apollo();
        let total = lem.total_mass(lem.descent_fuel, lem.ascent_fuel);
        assert!((total - 16_237.0).abs() < 1e-9);
        assert!((lem.mass_slugs(lem.descent_fuel, lem.ascent_fuel) - 16_237.0 / 32.174).abs() < 1e-9);
    }

    #[test]
    fn total_mass_counts_ascent_fuel_on_board() {
        let lem = presets::apollo();
        assert!((lem.total_mass(1500.0, 0.0) - 11_050.0).abs() < 1e-9);
        assert!((lem.total_mass(0.0, 1000.0) - 10_550.0).abs() < 1e-9);
    }

    #[test]
    fn ascent_delta_v_matches_rocket_equation() {
        let lem = presets::apollo();
        let dv = lem.ascent_delta_v(lem.ascent_fuel);
        let expected = 10_000.0 * ((4850.0_f64 + 5187.0) / 4850.0).ln();
        assert!((dv - expected).abs() < 1e-9);
        assert!((dv - 7273.0).abs() < 1.0, "Ascent delta-v ~7273 ft/s, got {:.1}", dv);
    }

    #[test]
    fn no_ascent_fuel_no_delta_v() {
        let lem = presets::apollo();
        assert_eq!(lem.ascent_delta_v(0.0), 0.0);
    }

    #[test]
    fn burn_ranges() {
        let lem = presets::apollo();
        assert!(lem.vertical_burn_in_range(0.0));
        assert!(lem.vertical_burn_in_range(250.0));
        assert!(!lem.vertical_burn_in_range(-0.1));
        assert!(!lem.vertical_burn_in_range(250.1));
        assert!(lem.horiz_burn_in_range(-10.0));
        assert!(!lem.horiz_burn_in_range(10.5));
        assert!(!lem.horiz_burn_in_range(f64::NAN));
    }

    #[test]
    fn builder_overrides_preset() {
        let lem = LunarModuleBuilder::new().ascent_fuel(100.0).min_abort_altitude(50.0).build();
        assert_eq!(lem.ascent_fuel, 100.0);
        assert_eq!(lem.min_abort_altitude, 50.0);
        assert_eq!(lem.descent_dry_mass, 4700.0);
    }
}
