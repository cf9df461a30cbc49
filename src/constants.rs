// Physical Constants
pub const STANDARD_GRAVITY: f64 = 9.80665; // m/s²
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters
pub const GAS_CONSTANT_AIR: f64 = 287.05; // J/(kg·K)
pub const HEAT_CAPACITY_RATIO: f64 = 1.4; // γ for dry air

// Environmental Constants
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0; // Pa (pascals)
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15; // K
pub const MIN_ATMOSPHERE_TEMPERATURE: f64 = 1.0; // K, the top layer is held isothermal from here
pub const CABIN_PRESSURE: f64 = 101_325.0; // Pa, held constant

// Propulsion Constants
pub const SPECIFIC_IMPULSE_SEA_LEVEL: f64 = 300.0; // seconds
pub const SPECIFIC_IMPULSE_VACUUM: f64 = 450.0; // seconds

// Aerodynamic Constants
pub const SUBSONIC_DRAG_COEFFICIENT: f64 = 0.5;
pub const SUPERSONIC_DRAG_COEFFICIENT: f64 = 0.8;
pub const TRANSONIC_MACH_START: f64 = 0.8;
pub const TRANSONIC_MACH_END: f64 = 1.2;

// Guidance Constants
pub const MAX_DYNAMIC_PRESSURE: f64 = 35_000.0; // Pa
pub const THROTTLE_LIMIT_ALTITUDE: f64 = 5_000.0; // m, no Max-Q throttling below this
pub const PITCH_PROGRAM_START: f64 = 10_000.0; // m
pub const PITCH_PROGRAM_END: f64 = 100_000.0; // m
pub const VERTICAL_PITCH: f64 = 90.0; // degrees

// Simulation Parameters
pub const TIME_STEP: f64 = 0.1; // s
pub const ORBIT_ALTITUDE: f64 = 400_000.0; // m
pub const STAGE_SEPARATION_PAUSE: f64 = 2.0; // s of wall-clock pause, presentation only

// Mission Constants
pub const PAYLOAD_MASS: f64 = 1_000.0; // kg
pub const CREW_COUNT: u32 = 4;
pub const INITIAL_OXYGEN_MASS: f64 = 2_000.0; // kg
pub const OXYGEN_RATE: f64 = 0.5; // kg per crew member per hour
pub const CO2_RATE: f64 = 0.4; // kg per crew member per hour
