use log::info;

use crate::control::environment::AtmosphereSample;
use crate::control::life_support::LifeSupportState;
use crate::control::rocket::{MissionOutcome, RocketState};
use crate::trajectory_system::kinematics::{IntegrationStep, VehicleState};

/// Immutable per-tick record handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    pub elapsed_time: f64,     // s
    pub altitude: f64,         // m
    pub velocity: f64,         // m/s
    pub acceleration: f64,     // m/s²
    pub thrust: f64,           // N
    pub throttle: f64,
    pub net_force: f64,        // N
    pub mass_flow: f64,        // kg/s
    pub total_mass: f64,       // kg
    pub density: f64,          // kg/m³
    pub drag: f64,             // N
    pub dynamic_pressure: f64, // Pa
    pub gravity: f64,          // m/s²
    pub isp: f64,              // s
    pub cabin_pressure: f64,   // Pa
    pub oxygen_mass: f64,      // kg
    pub co2_mass: f64,         // kg
    pub mach: f64,
    pub drag_coefficient: f64,
    pub pitch_angle: f64,      // degrees
    pub current_stage_index: usize,
    pub stage_count: usize,
}

impl TelemetrySnapshot {
    pub fn new(
        step: &IntegrationStep,
        atmosphere: &AtmosphereSample,
        life_support: &LifeSupportState,
        cabin_pressure: f64,
        stage_count: usize,
    ) -> Self {
        TelemetrySnapshot {
            elapsed_time: step.state.elapsed_time,
            altitude: step.state.altitude,
            velocity: step.state.velocity,
            acceleration: step.acceleration,
            thrust: step.thrust,
            throttle: step.throttle,
            net_force: step.net_force,
            mass_flow: step.mass_flow,
            total_mass: step.state.total_mass,
            density: atmosphere.density,
            drag: step.drag,
            dynamic_pressure: step.dynamic_pressure,
            gravity: step.gravity,
            isp: step.isp,
            cabin_pressure,
            oxygen_mass: life_support.oxygen_mass,
            co2_mass: life_support.co2_mass,
            mach: step.mach,
            drag_coefficient: step.drag_coefficient,
            pitch_angle: step.state.pitch_angle,
            current_stage_index: step.state.current_stage_index,
            stage_count,
        }
    }

    /// Name of the first non-finite field, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let fields = [
            ("elapsed_time", self.elapsed_time),
            ("altitude", self.altitude),
            ("velocity", self.velocity),
            ("acceleration", self.acceleration),
            ("thrust", self.thrust),
            ("throttle", self.throttle),
            ("net_force", self.net_force),
            ("mass_flow", self.mass_flow),
            ("total_mass", self.total_mass),
            ("density", self.density),
            ("drag", self.drag),
            ("dynamic_pressure", self.dynamic_pressure),
            ("gravity", self.gravity),
            ("isp", self.isp),
            ("cabin_pressure", self.cabin_pressure),
            ("oxygen_mass", self.oxygen_mass),
            ("co2_mass", self.co2_mass),
            ("mach", self.mach),
            ("drag_coefficient", self.drag_coefficient),
            ("pitch_angle", self.pitch_angle),
        ];

        fields
            .iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| *name)
    }
}

/// Consumer of simulation output. The simulation never reads anything back.
pub trait TelemetrySink {
    fn record(&mut self, snapshot: &TelemetrySnapshot);

    fn stage_separated(&mut self, _stage_index: usize, _vehicle: &VehicleState) {}

    fn mission_ended(&mut self, _outcome: &MissionOutcome) {}
}

/// Forwards every event to several sinks in order.
#[derive(Default)]
pub struct TelemetryFanOut<'a> {
    sinks: Vec<&'a mut dyn TelemetrySink>,
}

impl<'a> TelemetryFanOut<'a> {
    pub fn new() -> Self {
        TelemetryFanOut { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: &'a mut dyn TelemetrySink) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl TelemetrySink for TelemetryFanOut<'_> {
    fn record(&mut self, snapshot: &TelemetrySnapshot) {
        for sink in self.sinks.iter_mut() {
            sink.record(snapshot);
        }
    }

    fn stage_separated(&mut self, stage_index: usize, vehicle: &VehicleState) {
        for sink in self.sinks.iter_mut() {
            sink.stage_separated(stage_index, vehicle);
        }
    }

    fn mission_ended(&mut self, outcome: &MissionOutcome) {
        for sink in self.sinks.iter_mut() {
            sink.mission_ended(outcome);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSeparationRecord {
    pub stage_index: usize,
    pub elapsed_time: f64, // s
    pub altitude: f64,     // m
    pub velocity: f64,     // m/s
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySummary {
    pub ticks: usize,
    pub max_velocity: f64,
    pub max_altitude: f64,
    pub max_acceleration: f64,
    pub max_mach: f64,
    pub max_dynamic_pressure: f64,
    pub max_q_altitude: f64,
    pub min_oxygen: f64,
    pub separations: Vec<StageSeparationRecord>,
    pub final_state: Option<RocketState>,
}

/// Flight recorder keeping every snapshot plus running extremes.
pub struct Telemetry {
    pub log: Vec<TelemetrySnapshot>,
    max_velocity: f64,
    max_altitude: f64,
    max_acceleration: f64,
    max_mach: f64,
    max_dynamic_pressure: f64,
    max_q_altitude: f64,
    min_oxygen: f64,
    separations: Vec<StageSeparationRecord>,
    final_state: Option<RocketState>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            max_velocity: 0.0,
            max_altitude: 0.0,
            max_acceleration: 0.0,
            max_mach: 0.0,
            max_dynamic_pressure: 0.0,
            max_q_altitude: 0.0,
            min_oxygen: f64::MAX,
            separations: Vec::new(),
            final_state: None,
        }
    }

    pub fn summary(&self) -> TelemetrySummary {
        TelemetrySummary {
            ticks: self.log.len(),
            max_velocity: self.max_velocity,
            max_altitude: self.max_altitude,
            max_acceleration: self.max_acceleration,
            max_mach: self.max_mach,
            max_dynamic_pressure: self.max_dynamic_pressure,
            max_q_altitude: self.max_q_altitude,
            min_oxygen: self.min_oxygen,
            separations: self.separations.clone(),
            final_state: self.final_state,
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn display_data(&self) {
        info!("--- Simulation Summary ---");
        info!("Ticks recorded: {}", self.log.len());
        info!("Max Velocity: {:.2} m/s (Mach {:.2})", self.max_velocity, self.max_mach);
        info!("Max Altitude: {}", Self::format_altitude(self.max_altitude));
        info!("Max Acceleration: {:.2} m/s²", self.max_acceleration);
        info!(
            "Max-Q: {:.0} Pa at {}",
            self.max_dynamic_pressure,
            Self::format_altitude(self.max_q_altitude)
        );
        if !self.log.is_empty() {
            info!("Min Oxygen: {:.2} kg", self.min_oxygen);
        }

        for separation in &self.separations {
            info!(
                "Stage {} separated at {} ({}, {:.1} m/s)",
                separation.stage_index + 1,
                Self::format_time(separation.elapsed_time),
                Self::format_altitude(separation.altitude),
                separation.velocity
            );
        }

        if let Some(state) = self.final_state {
            info!("Final state: {:?}", state);
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Telemetry::new()
    }
}

impl TelemetrySink for Telemetry {
    fn record(&mut self, snapshot: &TelemetrySnapshot) {
        self.max_velocity = self.max_velocity.max(snapshot.velocity);
        self.max_altitude = self.max_altitude.max(snapshot.altitude);
        self.max_acceleration = self.max_acceleration.max(snapshot.acceleration.abs());
        self.max_mach = self.max_mach.max(snapshot.mach);
        self.min_oxygen = self.min_oxygen.min(snapshot.oxygen_mass);

        if snapshot.dynamic_pressure > self.max_dynamic_pressure {
            self.max_dynamic_pressure = snapshot.dynamic_pressure;
            self.max_q_altitude = snapshot.altitude;
        }

        self.log.push(*snapshot);
    }

    fn stage_separated(&mut self, stage_index: usize, vehicle: &VehicleState) {
        self.separations.push(StageSeparationRecord {
            stage_index,
            elapsed_time: vehicle.elapsed_time,
            altitude: vehicle.altitude,
            velocity: vehicle.velocity,
        });
    }

    fn mission_ended(&mut self, outcome: &MissionOutcome) {
        self.final_state = Some(outcome.final_state);
    }
}
