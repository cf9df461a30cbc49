pub mod display;
pub mod pacing;
pub mod telemetry;
