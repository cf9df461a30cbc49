use crate::constants::{
    GAS_CONSTANT_AIR, MIN_ATMOSPHERE_TEMPERATURE, SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE,
    STANDARD_GRAVITY,
};
use crate::errors::SimulationError;

/// One layer of the piecewise barometric model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereLayer {
    pub base_altitude: f64,    // m
    pub lapse_rate: f64,       // K/m
    pub base_temperature: f64, // K
    pub base_pressure: f64,    // Pa
}

impl AtmosphereLayer {
    pub const fn new(
        base_altitude: f64,
        lapse_rate: f64,
        base_temperature: f64,
        base_pressure: f64,
    ) -> Self {
        AtmosphereLayer {
            base_altitude,
            lapse_rate,
            base_temperature,
            base_pressure,
        }
    }

    /// Pressure and temperature at `altitude`, extrapolating this layer's profile.
    pub fn conditions_at(&self, altitude: f64, gravity: f64) -> (f64, f64) {
        let delta_height = altitude - self.base_altitude;
        let temperature = self.base_temperature + self.lapse_rate * delta_height;

        let pressure = if self.lapse_rate == 0.0 {
            self.base_pressure
                * (-gravity * delta_height / (GAS_CONSTANT_AIR * self.base_temperature)).exp()
        } else {
            self.base_pressure
                * (self.base_temperature / temperature)
                    .powf(gravity / (self.lapse_rate * GAS_CONSTANT_AIR))
        };

        (pressure, temperature)
    }
}

/// Nominal International Standard Atmosphere, sea level to 71 km.
pub const ISA_LAYERS: [AtmosphereLayer; 7] = [
    AtmosphereLayer::new(0.0, -0.0065, SEA_LEVEL_TEMPERATURE, SEA_LEVEL_PRESSURE),
    AtmosphereLayer::new(11_000.0, 0.0, 216.65, 22_632.1),
    AtmosphereLayer::new(20_000.0, 0.001, 216.65, 5_474.89),
    AtmosphereLayer::new(32_000.0, 0.0028, 228.65, 868.019),
    AtmosphereLayer::new(47_000.0, 0.0, 270.65, 110.906),
    AtmosphereLayer::new(51_000.0, -0.0028, 270.65, 66.9389),
    AtmosphereLayer::new(71_000.0, -0.002, 214.65, 3.956_42),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereSample {
    pub density: f64,     // kg/m³
    pub pressure: f64,    // Pa
    pub temperature: f64, // K
}

impl AtmosphereSample {
    /// Returned for altitudes below the lowest layer.
    pub const NONE: AtmosphereSample = AtmosphereSample {
        density: 0.0,
        pressure: 0.0,
        temperature: 0.0,
    };

    pub fn is_available(&self) -> bool {
        self.temperature > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct AtmosphereModel {
    layers: Vec<AtmosphereLayer>,
    gravity: f64,
    ceiling_altitude: f64,
    ceiling_pressure: f64,
    ceiling_temperature: f64,
}

impl AtmosphereModel {
    /// Builds a model from `layers`, re-deriving each upper layer's base conditions from the
    /// layer below so the profile is continuous across boundaries.
    pub fn new(layers: &[AtmosphereLayer], gravity: f64) -> Result<Self, SimulationError> {
        let first = layers.first().ok_or_else(|| {
            SimulationError::AtmosphereError("layer table is empty".to_string())
        })?;
        if !(gravity.is_finite() && gravity > 0.0) {
            return Err(SimulationError::AtmosphereError(format!(
                "gravity must be positive, got {}",
                gravity
            )));
        }
        if !(first.base_temperature > 0.0 && first.base_pressure > 0.0) {
            return Err(SimulationError::AtmosphereError(format!(
                "base layer needs positive temperature and pressure, got {} K / {} Pa",
                first.base_temperature, first.base_pressure
            )));
        }

        let mut chained: Vec<AtmosphereLayer> = Vec::with_capacity(layers.len());
        chained.push(*first);

        for layer in &layers[1..] {
            let below = chained[chained.len() - 1];
            if layer.base_altitude <= below.base_altitude {
                return Err(SimulationError::AtmosphereError(format!(
                    "layer at {} m does not lie above layer at {} m",
                    layer.base_altitude, below.base_altitude
                )));
            }

            let (pressure, temperature) = below.conditions_at(layer.base_altitude, gravity);
            if !(temperature > 0.0 && pressure > 0.0 && pressure.is_finite()) {
                return Err(SimulationError::AtmosphereError(format!(
                    "layer below {} m leaves no atmosphere at its top",
                    layer.base_altitude
                )));
            }

            chained.push(AtmosphereLayer {
                base_temperature: temperature,
                base_pressure: pressure,
                ..*layer
            });
        }

        // A cooling top layer would reach 0 K; hold it isothermal at the floor instead.
        let top = chained[chained.len() - 1];
        let (ceiling_altitude, ceiling_pressure, ceiling_temperature) = if top.lapse_rate < 0.0 {
            let floor = MIN_ATMOSPHERE_TEMPERATURE.min(top.base_temperature);
            let altitude = top.base_altitude + (floor - top.base_temperature) / top.lapse_rate;
            let (pressure, _) = top.conditions_at(altitude, gravity);
            if !(pressure > 0.0 && pressure.is_finite()) {
                return Err(SimulationError::AtmosphereError(format!(
                    "top layer leaves no atmosphere below {} m",
                    altitude
                )));
            }
            (altitude, pressure, floor)
        } else {
            (f64::INFINITY, top.base_pressure, top.base_temperature)
        };

        Ok(AtmosphereModel {
            layers: chained,
            gravity,
            ceiling_altitude,
            ceiling_pressure,
            ceiling_temperature,
        })
    }

    pub fn standard() -> Self {
        // The ISA table is known to chain cleanly.
        match AtmosphereModel::new(&ISA_LAYERS, STANDARD_GRAVITY) {
            Ok(model) => model,
            Err(err) => unreachable!("standard atmosphere rejected: {}", err),
        }
    }

    pub fn layers(&self) -> &[AtmosphereLayer] {
        &self.layers
    }

    pub fn ceiling_altitude(&self) -> f64 {
        self.ceiling_altitude
    }

    pub fn sample(&self, altitude: f64) -> AtmosphereSample {
        if altitude > self.ceiling_altitude {
            return self.sample_above_ceiling(altitude);
        }

        match self
            .layers
            .iter()
            .rev()
            .find(|layer| altitude >= layer.base_altitude)
        {
            Some(layer) => {
                let (pressure, temperature) = layer.conditions_at(altitude, self.gravity);
                AtmosphereSample {
                    density: pressure / (GAS_CONSTANT_AIR * temperature),
                    pressure,
                    temperature,
                }
            }
            None => AtmosphereSample::NONE,
        }
    }

    // Isothermal continuation of the ceiling conditions. Pressure underflows to zero far above.
    fn sample_above_ceiling(&self, altitude: f64) -> AtmosphereSample {
        let temperature = self.ceiling_temperature;
        let pressure = self.ceiling_pressure
            * (-self.gravity * (altitude - self.ceiling_altitude)
                / (GAS_CONSTANT_AIR * temperature))
                .exp();

        AtmosphereSample {
            density: pressure / (GAS_CONSTANT_AIR * temperature),
            pressure,
            temperature,
        }
    }
}

impl Default for AtmosphereModel {
    fn default() -> Self {
        AtmosphereModel::standard()
    }
}

/// Display name of the atmospheric region at `altitude`.
pub fn layer_name(altitude: f64) -> &'static str {
    if altitude < 11_000.0 {
        "Troposphere"
    } else if altitude < 20_000.0 {
        "Stratosphere"
    } else if altitude < 32_000.0 {
        "Stratopause"
    } else if altitude < 47_000.0 {
        "Mesosphere"
    } else {
        "Thermosphere"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const BOUNDARIES: [f64; 6] = [11_000.0, 20_000.0, 32_000.0, 47_000.0, 51_000.0, 71_000.0];

    #[test]
    fn test_sea_level_conditions() {
        let atmosphere = AtmosphereModel::standard();
        let sample = atmosphere.sample(0.0);

        assert_relative_eq!(sample.density, 1.225, max_relative = 1e-3);
        assert_relative_eq!(sample.pressure, 101_325.0, max_relative = 1e-3);
        assert_relative_eq!(sample.temperature, 288.15, max_relative = 1e-3);
    }

    #[test]
    fn test_tropopause_conditions() {
        let atmosphere = AtmosphereModel::standard();
        let sample = atmosphere.sample(11_000.0);

        assert_abs_diff_eq!(sample.temperature, 216.65, epsilon = 1e-6);
        assert_abs_diff_eq!(sample.pressure, 22_632.0, epsilon = 5.0);
        assert_abs_diff_eq!(sample.density, 0.3639, epsilon = 1e-3);
    }

    #[test]
    fn test_continuity_at_layer_boundaries() {
        let atmosphere = AtmosphereModel::standard();
        let layers = atmosphere.layers();

        for (index, boundary) in BOUNDARIES.iter().enumerate() {
            let (pressure_below, temperature_below) =
                layers[index].conditions_at(*boundary, STANDARD_GRAVITY);
            let density_below = pressure_below / (GAS_CONSTANT_AIR * temperature_below);
            let at_boundary = atmosphere.sample(*boundary);

            assert_relative_eq!(at_boundary.pressure, pressure_below, max_relative = 1e-6);
            assert_relative_eq!(
                at_boundary.temperature,
                temperature_below,
                max_relative = 1e-6
            );
            assert_relative_eq!(at_boundary.density, density_below, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_continuity_at_ceiling() {
        let atmosphere = AtmosphereModel::standard();
        let ceiling = atmosphere.ceiling_altitude();

        let at_ceiling = atmosphere.sample(ceiling);
        let just_above = atmosphere.sample(ceiling + 1e-6);

        assert_relative_eq!(at_ceiling.pressure, just_above.pressure, max_relative = 1e-6);
        assert_relative_eq!(at_ceiling.density, just_above.density, max_relative = 1e-6);
        assert_relative_eq!(
            at_ceiling.temperature,
            just_above.temperature,
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_derived_layers_match_nominal_table() {
        let atmosphere = AtmosphereModel::standard();

        for (derived, nominal) in atmosphere.layers().iter().zip(ISA_LAYERS.iter()) {
            assert_eq!(derived.base_altitude, nominal.base_altitude);
            assert_relative_eq!(
                derived.base_temperature,
                nominal.base_temperature,
                max_relative = 1e-9
            );
            assert_relative_eq!(
                derived.base_pressure,
                nominal.base_pressure,
                max_relative = 1e-3
            );
        }
    }

    #[test]
    fn test_below_lowest_layer_returns_sentinel() {
        let atmosphere = AtmosphereModel::standard();
        let sample = atmosphere.sample(-1.0);

        assert_eq!(sample, AtmosphereSample::NONE);
        assert!(!sample.is_available());
    }

    #[test]
    fn test_density_decreases_with_altitude() {
        let atmosphere = AtmosphereModel::standard();
        let mut previous = atmosphere.sample(0.0).density;

        for step in 1..=80 {
            let altitude = step as f64 * 5_000.0;
            let density = atmosphere.sample(altitude).density;
            if previous > 0.0 {
                assert!(
                    density < previous,
                    "Density should fall with altitude. At {} m: {} >= {}",
                    altitude,
                    density,
                    previous
                );
            } else {
                assert_eq!(density, 0.0, "Vacuum should stay vacuum at {} m", altitude);
            }
            previous = density;
        }
    }

    #[test]
    fn test_top_layer_profile_above_86_km() {
        let atmosphere = AtmosphereModel::standard();
        let top = atmosphere.layers()[6];

        for altitude in [86_000.0, 100_000.0, 150_000.0, 175_000.0] {
            let (pressure, temperature) = top.conditions_at(altitude, STANDARD_GRAVITY);
            let sample = atmosphere.sample(altitude);

            assert_relative_eq!(sample.temperature, temperature, max_relative = 1e-12);
            assert_relative_eq!(sample.pressure, pressure, max_relative = 1e-12);
        }
        assert_relative_eq!(atmosphere.sample(100_000.0).temperature, 156.65, epsilon = 1e-6);
        assert_relative_eq!(atmosphere.sample(150_000.0).temperature, 56.65, epsilon = 1e-6);
    }

    #[test]
    fn test_isothermal_above_temperature_floor() {
        let atmosphere = AtmosphereModel::standard();
        let ceiling = atmosphere.ceiling_altitude();

        assert_relative_eq!(ceiling, 71_000.0 + 213.65 / 0.002, epsilon = 1e-3);
        for altitude in [ceiling + 100.0, 250_000.0, 400_000.0] {
            let sample = atmosphere.sample(altitude);
            assert_eq!(sample.temperature, MIN_ATMOSPHERE_TEMPERATURE);
            assert!(sample.pressure.is_finite() && sample.pressure >= 0.0);
        }
    }

    #[test]
    fn test_samples_finite_at_random_altitudes() {
        let atmosphere = AtmosphereModel::standard();
        let mut rng = StdRng::seed_from_u64(0x15A);

        for _ in 0..10_000 {
            let altitude = rng.gen_range(0.0..1_000_000.0);
            let sample = atmosphere.sample(altitude);

            assert!(sample.is_available(), "No data at {} m", altitude);
            assert!(
                sample.density.is_finite() && sample.density >= 0.0,
                "Density at {} m: {}",
                altitude,
                sample.density
            );
            assert!(sample.pressure.is_finite() && sample.pressure >= 0.0);
            assert!(sample.temperature.is_finite() && sample.temperature > 0.0);
        }
    }

    #[test]
    fn test_warming_top_layer_has_no_ceiling() {
        let layers = [AtmosphereLayer::new(0.0, 0.001, 250.0, 50_000.0)];
        let atmosphere = AtmosphereModel::new(&layers, STANDARD_GRAVITY).unwrap();

        assert!(atmosphere.ceiling_altitude().is_infinite());
        assert_relative_eq!(atmosphere.sample(100_000.0).temperature, 350.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_unordered_layers() {
        let layers = [
            AtmosphereLayer::new(0.0, -0.0065, 288.15, 101_325.0),
            AtmosphereLayer::new(0.0, 0.0, 216.65, 22_632.1),
        ];

        let result = AtmosphereModel::new(&layers, STANDARD_GRAVITY);
        assert!(matches!(result, Err(SimulationError::AtmosphereError(_))));
    }

    #[test]
    fn test_rejects_empty_table() {
        let result = AtmosphereModel::new(&[], STANDARD_GRAVITY);
        assert!(matches!(result, Err(SimulationError::AtmosphereError(_))));
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_name(0.0), "Troposphere");
        assert_eq!(layer_name(15_000.0), "Stratosphere");
        assert_eq!(layer_name(25_000.0), "Stratopause");
        assert_eq!(layer_name(40_000.0), "Mesosphere");
        assert_eq!(layer_name(300_000.0), "Thermosphere");
    }
}
