use crate::{
    constants::VERTICAL_PITCH,
    control::{
        environment::AtmosphereSample, guidance::GuidanceSystem, launch_stages::Stage,
        mission::MissionConfig, propulsion::PropulsionSystem,
    },
};

use super::aerodynamics::Aerodynamics;

/// Vertical-axis vehicle state. Altitude and velocity are scalars along the local vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub altitude: f64,    // m
    pub velocity: f64,    // m/s
    pub total_mass: f64,  // kg
    pub pitch_angle: f64, // degrees
    pub current_stage_index: usize,
    pub elapsed_time: f64, // s
}

impl VehicleState {
    pub fn on_pad(total_mass: f64) -> Self {
        VehicleState {
            altitude: 0.0,
            velocity: 0.0,
            total_mass,
            pitch_angle: VERTICAL_PITCH,
            current_stage_index: 0,
            elapsed_time: 0.0,
        }
    }
}

/// Everything computed during one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationStep {
    pub state: VehicleState,
    pub gravity: f64,          // m/s²
    pub speed_of_sound: f64,   // m/s
    pub mach: f64,
    pub drag_coefficient: f64,
    pub dynamic_pressure: f64, // Pa
    pub throttle: f64,
    pub isp: f64,              // s
    pub thrust: f64,           // N
    pub mass_flow: f64,        // kg/s
    pub fuel_used: f64,        // kg
    pub drag: f64,             // N
    pub net_force: f64,        // N
    pub acceleration: f64,     // m/s²
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AscentIntegrator {
    pub aerodynamics: Aerodynamics,
    pub propulsion: PropulsionSystem,
    pub guidance: GuidanceSystem,
}

impl AscentIntegrator {
    /// Advances `state` by one time step.
    ///
    /// Every force term is evaluated at the pre-step altitude and velocity. The position
    /// update then uses the freshly updated velocity (semi-implicit Euler). The burned fuel
    /// is taken off `total_mass` here; removing it from the stage is left to the caller.
    pub fn step(
        &self,
        state: &VehicleState,
        stage: &Stage,
        atmosphere: &AtmosphereSample,
        config: &MissionConfig,
    ) -> IntegrationStep {
        let delta_time = config.time_step();
        let altitude = state.altitude;
        let velocity = state.velocity;

        let gravity = Self::gravity_at(altitude, config.g0(), config.earth_radius());

        let speed_of_sound = Aerodynamics::speed_of_sound(atmosphere);
        let mach = Aerodynamics::mach_number(velocity, speed_of_sound);
        let drag_coefficient = self.aerodynamics.calculate_drag_coefficient(mach);
        let area = Aerodynamics::cross_sectional_area(stage.diameter);
        let dynamic_pressure = Aerodynamics::calculate_dynamic_pressure(atmosphere.density, velocity);

        let throttle = self.guidance.calculate_throttle(altitude, dynamic_pressure);

        let engine = self.propulsion.update(
            stage.thrust_max,
            throttle,
            atmosphere.pressure,
            config.sea_level_pressure(),
            config.g0(),
        );
        let fuel_used = engine.mass_flow * delta_time;

        let drag = Aerodynamics::calculate_drag(dynamic_pressure, drag_coefficient, area);
        let net_force = engine.thrust - drag - state.total_mass * gravity;
        let acceleration = net_force / state.total_mass;

        let pitch_angle = self.guidance.get_target_pitch(altitude);

        let next_velocity = velocity + acceleration * delta_time;
        let next_altitude = altitude + next_velocity * delta_time;

        IntegrationStep {
            state: VehicleState {
                altitude: next_altitude,
                velocity: next_velocity,
                total_mass: state.total_mass - fuel_used,
                pitch_angle,
                current_stage_index: state.current_stage_index,
                elapsed_time: state.elapsed_time + delta_time,
            },
            gravity,
            speed_of_sound,
            mach,
            drag_coefficient,
            dynamic_pressure,
            throttle,
            isp: engine.isp,
            thrust: engine.thrust,
            mass_flow: engine.mass_flow,
            fuel_used,
            drag,
            net_force,
            acceleration,
        }
    }

    /// Inverse-square falloff of surface gravity.
    pub fn gravity_at(altitude: f64, g0: f64, earth_radius: f64) -> f64 {
        let ratio = earth_radius / (earth_radius + altitude);
        g0 * ratio * ratio
    }
}
