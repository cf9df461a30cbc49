use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Atmosphere error: {0}")]
    AtmosphereError(String),

    #[error("Mission error: {0}")]
    MissionError(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),
}
