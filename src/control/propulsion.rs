use crate::constants::{SPECIFIC_IMPULSE_SEA_LEVEL, SPECIFIC_IMPULSE_VACUUM};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionOutput {
    pub isp: f64,              // s
    pub exhaust_velocity: f64, // m/s
    pub thrust: f64,           // N
    pub mass_flow: f64,        // kg/s
}

/// Engine model whose specific impulse moves from the sea-level to the vacuum value as
/// ambient pressure drops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionSystem {
    pub isp_sea_level: f64,
    pub isp_vacuum: f64,
}

impl PropulsionSystem {
    pub fn new(isp_sea_level: f64, isp_vacuum: f64) -> Self {
        PropulsionSystem {
            isp_sea_level,
            isp_vacuum,
        }
    }

    pub fn specific_impulse(&self, ambient_pressure: f64, sea_level_pressure: f64) -> f64 {
        let isp = self.isp_sea_level
            + (self.isp_vacuum - self.isp_sea_level) * (1.0 - ambient_pressure / sea_level_pressure);
        isp.clamp(self.isp_sea_level, self.isp_vacuum)
    }

    pub fn update(
        &self,
        thrust_max: f64,
        throttle: f64,
        ambient_pressure: f64,
        sea_level_pressure: f64,
        g0: f64,
    ) -> PropulsionOutput {
        let isp = self.specific_impulse(ambient_pressure, sea_level_pressure);
        let exhaust_velocity = isp * g0;
        let thrust = thrust_max * throttle;

        PropulsionOutput {
            isp,
            exhaust_velocity,
            thrust,
            mass_flow: thrust / exhaust_velocity,
        }
    }
}

impl Default for PropulsionSystem {
    fn default() -> Self {
        PropulsionSystem::new(SPECIFIC_IMPULSE_SEA_LEVEL, SPECIFIC_IMPULSE_VACUUM)
    }
}
