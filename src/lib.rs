pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use control::environment::{layer_name, AtmosphereModel, AtmosphereSample};
pub use control::guidance::GuidanceSystem;
pub use control::launch_stages::{Stage, StageSet};
pub use control::life_support::{LifeSupportState, LifeSupportTracker};
pub use control::mission::{MissionBuilder, MissionConfig, MissionFactory, StageSpec};
pub use control::propulsion::PropulsionSystem;
pub use control::rocket::{MissionOutcome, Rocket, RocketState, StepOutcome};
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::kinematics::{AscentIntegrator, IntegrationStep, VehicleState};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::display::ConsoleDisplay;
pub use telemetry_system::pacing::{NoPacing, Pacer, RealTimePacer};
pub use telemetry_system::telemetry::{
    Telemetry, TelemetryFanOut, TelemetrySink, TelemetrySnapshot, TelemetrySummary,
};
