use std::f64::consts::PI;

use crate::constants::{
    GAS_CONSTANT_AIR, HEAT_CAPACITY_RATIO, SUBSONIC_DRAG_COEFFICIENT,
    SUPERSONIC_DRAG_COEFFICIENT, TRANSONIC_MACH_END, TRANSONIC_MACH_START,
};
use crate::control::environment::AtmosphereSample;

/// Axial drag of a cylindrical body with a transonic drag rise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub subsonic_drag_coefficient: f64,
    pub supersonic_drag_coefficient: f64,
    pub transonic_start: f64, // Mach
    pub transonic_end: f64,   // Mach
}

impl Aerodynamics {
    pub fn new(
        subsonic_drag_coefficient: f64,
        supersonic_drag_coefficient: f64,
        transonic_start: f64,
        transonic_end: f64,
    ) -> Self {
        Aerodynamics {
            subsonic_drag_coefficient,
            supersonic_drag_coefficient,
            transonic_start,
            transonic_end,
        }
    }

    /// Zero when the sample carries no atmosphere data.
    pub fn speed_of_sound(atmosphere: &AtmosphereSample) -> f64 {
        if atmosphere.is_available() {
            (HEAT_CAPACITY_RATIO * GAS_CONSTANT_AIR * atmosphere.temperature).sqrt()
        } else {
            0.0
        }
    }

    pub fn mach_number(velocity: f64, speed_of_sound: f64) -> f64 {
        if speed_of_sound > 0.0 {
            velocity / speed_of_sound
        } else {
            0.0
        }
    }

    pub fn calculate_drag_coefficient(&self, mach: f64) -> f64 {
        if mach < self.transonic_start {
            self.subsonic_drag_coefficient
        } else if mach < self.transonic_end {
            let progress = (mach - self.transonic_start) / (self.transonic_end - self.transonic_start);
            self.subsonic_drag_coefficient
                + progress * (self.supersonic_drag_coefficient - self.subsonic_drag_coefficient)
        } else {
            self.supersonic_drag_coefficient
        }
    }

    pub fn cross_sectional_area(diameter: f64) -> f64 {
        PI * diameter * diameter / 4.0
    }

    pub fn calculate_dynamic_pressure(density: f64, velocity: f64) -> f64 {
        0.5 * density * velocity * velocity
    }

    /// Drag magnitude from an already computed dynamic pressure.
    pub fn calculate_drag(dynamic_pressure: f64, drag_coefficient: f64, area: f64) -> f64 {
        dynamic_pressure * drag_coefficient * area
    }
}

impl Default for Aerodynamics {
    fn default() -> Self {
        Aerodynamics::new(
            SUBSONIC_DRAG_COEFFICIENT,
            SUPERSONIC_DRAG_COEFFICIENT,
            TRANSONIC_MACH_START,
            TRANSONIC_MACH_END,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_drag_coefficient_regimes() {
        let aero = Aerodynamics::default();

        assert_eq!(aero.calculate_drag_coefficient(0.0), 0.5);
        assert_eq!(aero.calculate_drag_coefficient(0.79), 0.5);
        assert_relative_eq!(aero.calculate_drag_coefficient(0.8), 0.5, epsilon = EPSILON);
        assert_relative_eq!(aero.calculate_drag_coefficient(1.0), 0.65, epsilon = EPSILON);
        assert_eq!(aero.calculate_drag_coefficient(1.2), 0.8);
        assert_eq!(aero.calculate_drag_coefficient(7.0), 0.8);
    }

    #[test]
    fn test_drag_coefficient_continuous_through_transonic() {
        let aero = Aerodynamics::default();

        assert_relative_eq!(
            aero.calculate_drag_coefficient(1.2 - 1e-12),
            0.8,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_speed_of_sound_at_sea_level() {
        let atmosphere = AtmosphereSample {
            density: 1.225,
            pressure: 101_325.0,
            temperature: 288.15,
        };

        assert_relative_eq!(Aerodynamics::speed_of_sound(&atmosphere), 340.3, epsilon = 0.05);
    }

    #[test]
    fn test_no_atmosphere_gives_zero_mach() {
        let speed_of_sound = Aerodynamics::speed_of_sound(&AtmosphereSample::NONE);

        assert_eq!(speed_of_sound, 0.0);
        assert_eq!(Aerodynamics::mach_number(500.0, speed_of_sound), 0.0);
    }

    #[test]
    fn test_drag_at_sea_level() {
        let q = Aerodynamics::calculate_dynamic_pressure(1.225, 100.0);
        let area = Aerodynamics::cross_sectional_area(2.0);
        let drag = Aerodynamics::calculate_drag(q, 0.5, area);

        assert_relative_eq!(q, 6_125.0, epsilon = EPSILON);
        assert_relative_eq!(area, PI, epsilon = EPSILON);
        assert_relative_eq!(drag, 0.5 * 1.225 * 100.0 * 100.0 * 0.5 * PI, epsilon = 1e-6);
    }

    #[test]
    fn test_drag_independent_of_velocity_sign() {
        let up = Aerodynamics::calculate_dynamic_pressure(0.5, 300.0);
        let down = Aerodynamics::calculate_dynamic_pressure(0.5, -300.0);

        assert_eq!(up, down);
    }
}
