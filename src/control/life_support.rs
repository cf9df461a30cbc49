use crate::constants::{CO2_RATE, CREW_COUNT, INITIAL_OXYGEN_MASS, OXYGEN_RATE};

const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifeSupportState {
    pub oxygen_mass: f64, // kg
    pub co2_mass: f64,    // kg
    pub crew_count: u32,
    pub oxygen_rate: f64, // kg per crew member per hour
    pub co2_rate: f64,    // kg per crew member per hour
}

impl LifeSupportState {
    pub fn new(crew_count: u32, oxygen_mass: f64, oxygen_rate: f64, co2_rate: f64) -> Self {
        LifeSupportState {
            oxygen_mass,
            co2_mass: 0.0,
            crew_count,
            oxygen_rate,
            co2_rate,
        }
    }
}

impl Default for LifeSupportState {
    fn default() -> Self {
        LifeSupportState::new(CREW_COUNT, INITIAL_OXYGEN_MASS, OXYGEN_RATE, CO2_RATE)
    }
}

/// Linear oxygen/CO₂ bookkeeping for the crew cabin.
///
/// Nothing is clamped: negative oxygen is left for consumers to interpret.
#[derive(Debug, Clone)]
pub struct LifeSupportTracker {
    state: LifeSupportState,
}

impl LifeSupportTracker {
    pub fn new(state: LifeSupportState) -> Self {
        LifeSupportTracker { state }
    }

    pub fn update(&mut self, delta_time: f64) {
        let crew = f64::from(self.state.crew_count);
        self.state.oxygen_mass -= self.state.oxygen_rate * crew * delta_time / SECONDS_PER_HOUR;
        self.state.co2_mass += self.state.co2_rate * crew * delta_time / SECONDS_PER_HOUR;
    }

    pub fn state(&self) -> LifeSupportState {
        self.state
    }

    pub fn is_oxygen_depleted(&self) -> bool {
        self.state.oxygen_mass < 0.0
    }

    /// Hours until oxygen runs out at the current rate.
    pub fn oxygen_endurance_hours(&self) -> f64 {
        let hourly_use = self.state.oxygen_rate * f64::from(self.state.crew_count);
        if hourly_use > 0.0 {
            self.state.oxygen_mass / hourly_use
        } else {
            f64::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_crew_cabin() {
        let tracker = LifeSupportTracker::new(LifeSupportState::default());
        let state = tracker.state();

        assert_eq!(state.crew_count, 4);
        assert_eq!(state.oxygen_mass, 2000.0);
        assert_eq!(state.co2_mass, 0.0);
        assert_relative_eq!(tracker.oxygen_endurance_hours(), 1000.0);
    }

    #[test]
    fn test_one_hour_of_consumption() {
        let mut tracker = LifeSupportTracker::new(LifeSupportState::default());

        for _ in 0..36_000 {
            tracker.update(0.1);
        }

        let state = tracker.state();
        assert_relative_eq!(state.oxygen_mass, 2000.0 - 0.5 * 4.0, max_relative = 1e-9);
        assert_relative_eq!(state.co2_mass, 0.4 * 4.0, max_relative = 1e-9);
    }

    #[test]
    fn test_single_tick_rates() {
        let mut tracker = LifeSupportTracker::new(LifeSupportState::new(2, 10.0, 0.9, 0.72));

        tracker.update(1.0);

        let state = tracker.state();
        assert_relative_eq!(state.oxygen_mass, 10.0 - 0.9 * 2.0 / 3600.0);
        assert_relative_eq!(state.co2_mass, 0.72 * 2.0 / 3600.0);
    }

    #[test]
    fn test_oxygen_may_go_negative() {
        let mut tracker = LifeSupportTracker::new(LifeSupportState::new(4, 0.001, 0.5, 0.4));

        assert!(!tracker.is_oxygen_depleted());
        tracker.update(60.0);

        assert!(tracker.state().oxygen_mass < 0.0);
        assert!(tracker.is_oxygen_depleted());
    }

    #[test]
    fn test_empty_cabin_consumes_nothing() {
        let mut tracker = LifeSupportTracker::new(LifeSupportState::new(0, 100.0, 0.5, 0.4));

        tracker.update(3600.0);

        assert_eq!(tracker.state().oxygen_mass, 100.0);
        assert_eq!(tracker.state().co2_mass, 0.0);
        assert!(tracker.oxygen_endurance_hours().is_infinite());
    }
}
