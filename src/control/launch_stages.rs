use log::info;

use crate::control::mission::StageSpec;
use crate::trajectory_system::kinematics::VehicleState;

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub dry_mass: f64,   // kg
    pub fuel_mass: f64,  // kg, may dip below zero for one tick before jettison
    pub thrust_max: f64, // N
    pub diameter: f64,   // m
    pub jettisoned: bool,
}

impl Stage {
    pub fn new(dry_mass: f64, fuel_mass: f64, thrust_max: f64, diameter: f64) -> Self {
        Stage {
            dry_mass,
            fuel_mass,
            thrust_max,
            diameter,
            jettisoned: false,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.fuel_mass <= 0.0
    }

    pub fn get_total_mass(&self) -> f64 {
        if self.jettisoned {
            0.0
        } else {
            self.dry_mass + self.fuel_mass
        }
    }
}

impl From<&StageSpec> for Stage {
    fn from(spec: &StageSpec) -> Self {
        Stage::new(spec.dry_mass, spec.fuel_mass, spec.thrust_max, spec.diameter)
    }
}

/// Stages in burn order, bottom stage first.
#[derive(Debug, Clone, Default)]
pub struct StageSet {
    stages: Vec<Stage>,
    current: usize,
}

impl StageSet {
    pub fn new(stages: Vec<Stage>) -> Self {
        StageSet { stages, current: 0 }
    }

    pub fn from_specs(specs: &[StageSpec]) -> Self {
        StageSet::new(specs.iter().map(Stage::from).collect())
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        self.stages.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_exhausted(&self) -> bool {
        self.current >= self.stages.len()
    }

    /// Removes `fuel_used` from the active stage. No clamping; depletion is picked up by
    /// [`StageSet::advance_if_depleted`].
    pub fn burn(&mut self, fuel_used: f64) {
        if let Some(stage) = self.stages.get_mut(self.current) {
            stage.fuel_mass -= fuel_used;
        }
    }

    /// Jettisons the active stage once its fuel is gone. Returns whether a stage was dropped.
    pub fn advance_if_depleted(&mut self, vehicle: &mut VehicleState) -> bool {
        let Some(stage) = self.stages.get_mut(self.current) else {
            return false;
        };
        if !stage.is_depleted() {
            return false;
        }

        // Also drop any overshoot residue so total mass matches what is still attached.
        vehicle.total_mass -= stage.dry_mass + stage.fuel_mass;
        stage.jettisoned = true;

        info!(
            "Stage {} jettisoned at {:.0} m ({:.1} kg dry mass dropped)",
            self.current + 1,
            vehicle.altitude,
            stage.dry_mass
        );

        self.current += 1;
        vehicle.current_stage_index = self.current;
        true
    }

    /// Fuel left across stages still attached.
    pub fn remaining_fuel(&self) -> f64 {
        self.stages
            .iter()
            .filter(|stage| !stage.jettisoned)
            .map(|stage| stage.fuel_mass.max(0.0))
            .sum()
    }

    /// Mass of every stage still attached, fuel included.
    pub fn initial_mass(&self) -> f64 {
        self.stages.iter().map(|stage| stage.get_total_mass()).sum()
    }
}
