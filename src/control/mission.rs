use log::debug;

use crate::constants::{
    CABIN_PRESSURE, EARTH_RADIUS, ORBIT_ALTITUDE, PAYLOAD_MASS, SEA_LEVEL_PRESSURE,
    STANDARD_GRAVITY, TIME_STEP,
};
use crate::control::life_support::LifeSupportState;
use crate::errors::SimulationError;

/// Static definition of one rocket stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageSpec {
    pub dry_mass: f64,   // kg
    pub fuel_mass: f64,  // kg
    pub thrust_max: f64, // N
    pub diameter: f64,   // m
}

impl StageSpec {
    pub fn new(dry_mass: f64, fuel_mass: f64, thrust_max: f64, diameter: f64) -> Self {
        StageSpec {
            dry_mass,
            fuel_mass,
            thrust_max,
            diameter,
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.dry_mass + self.fuel_mass
    }
}

/// Validated, read-only mission parameters.
#[derive(Clone, Debug)]
pub struct MissionConfig {
    stages: Vec<StageSpec>,
    payload_mass: f64,
    time_step: f64,
    orbit_altitude: f64,
    earth_radius: f64,
    sea_level_pressure: f64,
    g0: f64,
    cabin_pressure: f64,
    life_support: LifeSupportState,
}

impl MissionConfig {
    pub fn builder() -> MissionBuilder {
        MissionBuilder::new()
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    pub fn payload_mass(&self) -> f64 {
        self.payload_mass
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn orbit_altitude(&self) -> f64 {
        self.orbit_altitude
    }

    pub fn earth_radius(&self) -> f64 {
        self.earth_radius
    }

    pub fn sea_level_pressure(&self) -> f64 {
        self.sea_level_pressure
    }

    pub fn g0(&self) -> f64 {
        self.g0
    }

    pub fn cabin_pressure(&self) -> f64 {
        self.cabin_pressure
    }

    pub fn life_support(&self) -> LifeSupportState {
        self.life_support
    }

    /// Liftoff mass: every stage fully fuelled plus payload.
    pub fn initial_mass(&self) -> f64 {
        self.stages.iter().map(StageSpec::total_mass).sum::<f64>() + self.payload_mass
    }
}

pub struct MissionBuilder {
    stages: Vec<StageSpec>,
    payload_mass: f64,
    time_step: f64,
    orbit_altitude: f64,
    earth_radius: f64,
    sea_level_pressure: f64,
    g0: f64,
    cabin_pressure: f64,
    life_support: LifeSupportState,
}

impl MissionBuilder {
    pub fn new() -> Self {
        MissionBuilder {
            stages: Vec::new(),
            payload_mass: PAYLOAD_MASS,
            time_step: TIME_STEP,
            orbit_altitude: ORBIT_ALTITUDE,
            earth_radius: EARTH_RADIUS,
            sea_level_pressure: SEA_LEVEL_PRESSURE,
            g0: STANDARD_GRAVITY,
            cabin_pressure: CABIN_PRESSURE,
            life_support: LifeSupportState::default(),
        }
    }

    pub fn stage(mut self, stage: StageSpec) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(mut self, stages: Vec<StageSpec>) -> Self {
        self.stages = stages;
        self
    }

    pub fn payload_mass(mut self, payload_mass: f64) -> Self {
        self.payload_mass = payload_mass;
        self
    }

    pub fn time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn orbit_altitude(mut self, orbit_altitude: f64) -> Self {
        self.orbit_altitude = orbit_altitude;
        self
    }

    pub fn earth_radius(mut self, earth_radius: f64) -> Self {
        self.earth_radius = earth_radius;
        self
    }

    pub fn sea_level_pressure(mut self, sea_level_pressure: f64) -> Self {
        self.sea_level_pressure = sea_level_pressure;
        self
    }

    pub fn g0(mut self, g0: f64) -> Self {
        self.g0 = g0;
        self
    }

    pub fn cabin_pressure(mut self, cabin_pressure: f64) -> Self {
        self.cabin_pressure = cabin_pressure;
        self
    }

    pub fn life_support(mut self, life_support: LifeSupportState) -> Self {
        self.life_support = life_support;
        self
    }

    pub fn build(self) -> Result<MissionConfig, SimulationError> {
        require_positive("time step", self.time_step)?;
        require_positive("orbit altitude", self.orbit_altitude)?;
        require_positive("earth radius", self.earth_radius)?;
        require_positive("sea level pressure", self.sea_level_pressure)?;
        require_positive("g0", self.g0)?;

        require_non_negative("payload mass", self.payload_mass)?;
        require_non_negative("cabin pressure", self.cabin_pressure)?;
        validate_life_support(&self.life_support)?;

        for (index, stage) in self.stages.iter().enumerate() {
            validate_stage(index, stage)?;
        }
        validate_burnout_masses(&self.stages, self.payload_mass)?;

        let config = MissionConfig {
            stages: self.stages,
            payload_mass: self.payload_mass,
            time_step: self.time_step,
            orbit_altitude: self.orbit_altitude,
            earth_radius: self.earth_radius,
            sea_level_pressure: self.sea_level_pressure,
            g0: self.g0,
            cabin_pressure: self.cabin_pressure,
            life_support: self.life_support,
        };

        if config.initial_mass() <= 0.0 {
            return Err(SimulationError::InitializationError(
                "vehicle has no mass".to_string(),
            ));
        }

        debug!(
            "Mission configured: {} stages, {:.0} kg liftoff mass, target {:.0} m",
            config.stages.len(),
            config.initial_mass(),
            config.orbit_altitude
        );

        Ok(config)
    }
}

impl Default for MissionBuilder {
    fn default() -> Self {
        MissionBuilder::new()
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InitializationError(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InitializationError(format!(
            "{} must be non-negative, got {}",
            name, value
        )))
    }
}

fn validate_life_support(state: &LifeSupportState) -> Result<(), SimulationError> {
    require_non_negative("oxygen mass", state.oxygen_mass)?;
    require_non_negative("CO2 mass", state.co2_mass)?;
    require_non_negative("oxygen rate", state.oxygen_rate)?;
    require_non_negative("CO2 rate", state.co2_rate)
}

fn validate_stage(index: usize, stage: &StageSpec) -> Result<(), SimulationError> {
    let stage_number = index + 1;
    require_non_negative(&format!("stage {} dry mass", stage_number), stage.dry_mass)?;
    require_non_negative(&format!("stage {} fuel mass", stage_number), stage.fuel_mass)?;
    require_positive(&format!("stage {} thrust", stage_number), stage.thrust_max)?;
    require_positive(&format!("stage {} diameter", stage_number), stage.diameter)
}

/// Every stage must leave something behind when its fuel runs out: its own dry mass, the
/// stages above it and the payload.
fn validate_burnout_masses(stages: &[StageSpec], payload_mass: f64) -> Result<(), SimulationError> {
    let mut mass_above = payload_mass;
    for (index, stage) in stages.iter().enumerate().rev() {
        if stage.dry_mass + mass_above <= 0.0 {
            return Err(SimulationError::InitializationError(format!(
                "vehicle is massless once stage {} burns out",
                index + 1
            )));
        }
        mass_above += stage.total_mass();
    }
    Ok(())
}

pub struct MissionFactory;

impl MissionFactory {
    /// Three-stage crewed ascent to a 400 km orbit.
    pub fn standard_ascent() -> Result<MissionConfig, SimulationError> {
        MissionBuilder::new()
            .stage(StageSpec::new(30_000.0, 400_000.0, 8e6, 5.0))
            .stage(StageSpec::new(8_000.0, 150_000.0, 2e6, 4.0))
            .stage(StageSpec::new(3_000.0, 50_000.0, 0.5e6, 3.0))
            .build()
    }

    pub fn single_stage(stage: StageSpec, payload_mass: f64) -> Result<MissionConfig, SimulationError> {
        MissionBuilder::new()
            .stage(stage)
            .payload_mass(payload_mass)
            .build()
    }
}
