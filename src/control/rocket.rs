use std::time::Duration;

use log::{info, trace, warn};

use crate::{
    constants::STAGE_SEPARATION_PAUSE,
    errors::SimulationError,
    telemetry_system::{
        pacing::Pacer,
        telemetry::{TelemetrySink, TelemetrySnapshot},
    },
    trajectory_system::kinematics::{AscentIntegrator, VehicleState},
};

use super::{
    environment::{AtmosphereModel, ISA_LAYERS},
    launch_stages::StageSet,
    life_support::{LifeSupportState, LifeSupportTracker},
    mission::MissionConfig,
};

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum RocketState {
    Running,
    StageTransition,
    OrbitAchieved,
    StagesExhausted,
}

impl RocketState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RocketState::OrbitAchieved | RocketState::StagesExhausted)
    }
}

/// Result of a single [`Rocket::update`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Tick(TelemetrySnapshot),
    StageSeparation {
        stage_index: usize,
        vehicle: VehicleState,
    },
    Terminated(RocketState),
}

impl StepOutcome {
    /// Wall-clock delay a paced front end should wait before the next update.
    pub fn pacing_hint(&self, time_step: f64) -> Option<Duration> {
        match self {
            StepOutcome::Tick(_) => Some(Duration::from_secs_f64(time_step.max(0.0))),
            StepOutcome::StageSeparation { .. } => {
                Some(Duration::from_secs_f64(STAGE_SEPARATION_PAUSE))
            }
            StepOutcome::Terminated(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionOutcome {
    pub final_state: RocketState,
    pub vehicle: VehicleState,
    pub life_support: LifeSupportState,
    pub ticks: usize,
}

pub struct Rocket {
    config: MissionConfig,
    atmosphere: AtmosphereModel,
    integrator: AscentIntegrator,
    stages: StageSet,
    life_support: LifeSupportTracker,
    vehicle: VehicleState,
    state: RocketState,
    ticks: usize,
    oxygen_warning_issued: bool,
}

impl Rocket {
    pub fn new(config: MissionConfig) -> Result<Self, SimulationError> {
        let atmosphere = AtmosphereModel::new(&ISA_LAYERS, config.g0())?;
        let stages = StageSet::from_specs(config.stages());
        let vehicle = VehicleState::on_pad(config.initial_mass());
        let life_support = LifeSupportTracker::new(config.life_support());

        info!(
            "Rocket ready: {} stage(s), {:.0} kg on the pad, orbit at {:.0} m",
            stages.len(),
            vehicle.total_mass,
            config.orbit_altitude()
        );

        Ok(Rocket {
            config,
            atmosphere,
            integrator: AscentIntegrator::default(),
            stages,
            life_support,
            vehicle,
            state: RocketState::Running,
            ticks: 0,
            oxygen_warning_issued: false,
        })
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn state(&self) -> RocketState {
        self.state
    }

    pub fn stages(&self) -> &StageSet {
        &self.stages
    }

    pub fn life_support(&self) -> LifeSupportState {
        self.life_support.state()
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn outcome(&self) -> MissionOutcome {
        MissionOutcome {
            final_state: self.state,
            vehicle: self.vehicle,
            life_support: self.life_support.state(),
            ticks: self.ticks,
        }
    }

    pub fn update(&mut self) -> Result<StepOutcome, SimulationError> {
        match self.state {
            RocketState::OrbitAchieved | RocketState::StagesExhausted => {
                return Ok(StepOutcome::Terminated(self.state));
            }
            RocketState::StageTransition => {
                self.state = RocketState::Running;
            }
            RocketState::Running => {}
        }

        if self.stages.is_exhausted() {
            self.state = RocketState::StagesExhausted;
            info!(
                "All stages exhausted at {:.0} m after {:.1} s",
                self.vehicle.altitude, self.vehicle.elapsed_time
            );
            return Ok(StepOutcome::Terminated(self.state));
        }

        if self.vehicle.altitude >= self.config.orbit_altitude() {
            self.state = RocketState::OrbitAchieved;
            info!(
                "Orbit achieved at {:.0} m, {:.1} m/s after {:.1} s",
                self.vehicle.altitude, self.vehicle.velocity, self.vehicle.elapsed_time
            );
            return Ok(StepOutcome::Terminated(self.state));
        }

        // An empty stage is dropped before it can produce thrust.
        let stage_index = self.stages.current_index();
        if self.stages.advance_if_depleted(&mut self.vehicle) {
            self.state = RocketState::StageTransition;
            return Ok(StepOutcome::StageSeparation {
                stage_index,
                vehicle: self.vehicle,
            });
        }

        self.tick()
    }

    fn tick(&mut self) -> Result<StepOutcome, SimulationError> {
        let stage = self.stages.current_stage().ok_or_else(|| {
            SimulationError::PhysicsError("No active stage for a running tick".to_string())
        })?;

        let sample = self.atmosphere.sample(self.vehicle.altitude);
        let step = self.integrator.step(&self.vehicle, stage, &sample, &self.config);

        self.stages.burn(step.fuel_used);
        self.life_support.update(self.config.time_step());
        self.vehicle = step.state;
        self.ticks += 1;

        let snapshot = TelemetrySnapshot::new(
            &step,
            &sample,
            &self.life_support.state(),
            self.config.cabin_pressure(),
            self.stages.len(),
        );

        if let Some(field) = snapshot.first_non_finite() {
            return Err(SimulationError::PhysicsError(format!(
                "Non-finite {} at t = {:.1} s",
                field, snapshot.elapsed_time
            )));
        }

        if self.life_support.is_oxygen_depleted() && !self.oxygen_warning_issued {
            warn!("Cabin oxygen depleted at t = {:.1} s", snapshot.elapsed_time);
            self.oxygen_warning_issued = true;
        }

        trace!(
            "t={:.1}s h={:.1}m v={:.2}m/s m={:.1}kg q={:.0}Pa",
            snapshot.elapsed_time,
            snapshot.altitude,
            snapshot.velocity,
            snapshot.total_mass,
            snapshot.dynamic_pressure
        );

        Ok(StepOutcome::Tick(snapshot))
    }

    /// Drives the state machine to a terminal state.
    pub fn run(
        &mut self,
        sink: &mut dyn TelemetrySink,
        pacer: &mut dyn Pacer,
    ) -> Result<MissionOutcome, SimulationError> {
        if self.state.is_terminal() {
            return Err(SimulationError::MissionError(format!(
                "Mission already ended in state {:?}",
                self.state
            )));
        }

        let time_step = self.config.time_step();
        loop {
            let outcome = self.update()?;
            match &outcome {
                StepOutcome::Tick(snapshot) => sink.record(snapshot),
                StepOutcome::StageSeparation {
                    stage_index,
                    vehicle,
                } => sink.stage_separated(*stage_index, vehicle),
                StepOutcome::Terminated(_) => break,
            }

            if let Some(delay) = outcome.pacing_hint(time_step) {
                pacer.pause(delay);
            }
        }

        let outcome = self.outcome();
        sink.mission_ended(&outcome);
        Ok(outcome)
    }
}
