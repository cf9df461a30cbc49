pub mod environment;
pub mod guidance;
pub mod launch_stages;
pub mod life_support;
pub mod mission;
pub mod propulsion;
pub mod rocket;
