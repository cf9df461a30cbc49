use crate::constants::{
    MAX_DYNAMIC_PRESSURE, PITCH_PROGRAM_END, PITCH_PROGRAM_START, THROTTLE_LIMIT_ALTITUDE,
    VERTICAL_PITCH,
};

/// Open-loop ascent guidance: a Max-Q throttle limiter and an altitude-scheduled pitch
/// program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceSystem {
    pub max_dynamic_pressure: f64,    // Pa
    pub throttle_limit_altitude: f64, // m
    pub pitch_start_altitude: f64,    // m
    pub pitch_end_altitude: f64,      // m
}

impl GuidanceSystem {
    pub fn new(
        max_dynamic_pressure: f64,
        throttle_limit_altitude: f64,
        pitch_start_altitude: f64,
        pitch_end_altitude: f64,
    ) -> Self {
        GuidanceSystem {
            max_dynamic_pressure,
            throttle_limit_altitude,
            pitch_start_altitude,
            pitch_end_altitude,
        }
    }

    /// Throttles down, never up, to hold dynamic pressure at the limit once above the
    /// limiter altitude.
    pub fn calculate_throttle(&self, altitude: f64, dynamic_pressure: f64) -> f64 {
        if altitude <= self.throttle_limit_altitude {
            return 1.0;
        }

        if dynamic_pressure > self.max_dynamic_pressure {
            (self.max_dynamic_pressure / dynamic_pressure).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Pitch angle in degrees. Recorded for display only; thrust stays vertical.
    pub fn get_target_pitch(&self, altitude: f64) -> f64 {
        if altitude <= self.pitch_start_altitude {
            VERTICAL_PITCH
        } else if altitude < self.pitch_end_altitude {
            let progress = (altitude - self.pitch_start_altitude)
                / (self.pitch_end_altitude - self.pitch_start_altitude);
            VERTICAL_PITCH - progress * VERTICAL_PITCH
        } else {
            0.0
        }
    }
}

impl Default for GuidanceSystem {
    fn default() -> Self {
        GuidanceSystem::new(
            MAX_DYNAMIC_PRESSURE,
            THROTTLE_LIMIT_ALTITUDE,
            PITCH_PROGRAM_START,
            PITCH_PROGRAM_END,
        )
    }
}
