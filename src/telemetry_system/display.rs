use std::io::{self, Write};

use log::warn;

use crate::control::environment::layer_name;
use crate::control::rocket::{MissionOutcome, RocketState};
use crate::trajectory_system::kinematics::VehicleState;

use super::telemetry::{TelemetrySink, TelemetrySnapshot};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const PROGRESS_BAR_WIDTH: usize = 60;
const PROGRESS_BAR_STEP: f64 = 5_000.0; // m per '#'

/// Text telemetry panel redrawn every tick.
pub struct ConsoleDisplay<W: Write> {
    out: W,
    clear_screen: bool,
}

impl ConsoleDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleDisplay::new(io::stdout(), true)
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        ConsoleDisplay { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        Ok(())
    }

    fn draw_frame(&mut self, snapshot: &TelemetrySnapshot) -> io::Result<()> {
        self.clear()?;
        self.draw_stage_indicator(snapshot.current_stage_index + 1, snapshot.stage_count)?;
        self.draw_telemetry(snapshot)?;
        self.draw_progress(snapshot.altitude, snapshot.velocity)?;
        writeln!(self.out, "{}", layer_name(snapshot.altitude))?;
        self.out.flush()
    }

    fn draw_stage_indicator(&mut self, current: usize, total: usize) -> io::Result<()> {
        write!(self.out, "Stage: ")?;
        for stage in 1..=total {
            write!(self.out, "{}", if stage == current { "[#]" } else { "[ ]" })?;
        }
        writeln!(self.out)
    }

    fn draw_telemetry(&mut self, s: &TelemetrySnapshot) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "╔═ Telemetry ═════════════════════════════════╗")?;
        writeln!(out, "│ Altitude        : {:.0} m    Mach: {:.2}", s.altitude, s.mach)?;
        writeln!(out, "│ Velocity        : {:.1} m/s      Cd: {:.2}", s.velocity, s.drag_coefficient)?;
        writeln!(out, "│ Acceleration    : {:.2} m/s²", s.acceleration)?;
        writeln!(out, "│ Total Thrust    : {:.0} N ({:.0}%)", s.thrust, s.throttle * 100.0)?;
        writeln!(out, "│ Net Thrust      : {:.0} N", s.net_force)?;
        writeln!(out, "│ Mass Flow       : {:.1} kg/s", s.mass_flow)?;
        writeln!(out, "│ Total Mass      : {:.0} kg", s.total_mass)?;
        writeln!(out, "│ Air Density     : {:.4} kg/m³", s.density)?;
        writeln!(out, "│ Drag Force      : {:.0} N", s.drag)?;
        writeln!(out, "│ Dynamic Pressure: {:.0} Pa", s.dynamic_pressure)?;
        writeln!(out, "│ Gravity         : {:.3} m/s²", s.gravity)?;
        writeln!(out, "│ Isp             : {:.1} s", s.isp)?;
        writeln!(out, "│ Cabin Pressure  : {:.0} Pa", s.cabin_pressure)?;
        writeln!(out, "│ O₂ Remaining    : {:.1} kg", s.oxygen_mass)?;
        writeln!(out, "│ CO₂ Produced    : {:.1} kg", s.co2_mass)?;
        writeln!(out, "│ Pitch Angle     : {:.2}°", s.pitch_angle)?;
        writeln!(out, "╚══════════════════════════════════════════════╝")
    }

    fn draw_progress(&mut self, altitude: f64, velocity: f64) -> io::Result<()> {
        let bars = (altitude.max(0.0) / PROGRESS_BAR_STEP) as usize;
        let rocket = "#".repeat(bars);
        writeln!(
            self.out,
            "Ascent Progress: [{:<width$}] {:.0} m",
            rocket,
            altitude,
            width = PROGRESS_BAR_WIDTH
        )?;
        writeln!(self.out, "Speed          : {:.0} m/s", velocity)
    }

    fn draw_separation(&mut self, stage_index: usize) -> io::Result<()> {
        self.clear()?;
        writeln!(self.out, "=> Stage {} jettisoned!", stage_index + 1)?;
        self.out.flush()
    }

    fn draw_outcome(&mut self, outcome: &MissionOutcome) -> io::Result<()> {
        match outcome.final_state {
            RocketState::OrbitAchieved => {
                self.clear()?;
                writeln!(self.out, "=> Orbit achieved!")?;
            }
            RocketState::StagesExhausted => {
                writeln!(self.out, "=> All stages exhausted at {:.0} m", outcome.vehicle.altitude)?;
            }
            _ => {}
        }
        writeln!(self.out, "Simulation finished.")?;
        self.out.flush()
    }
}

// Console output failures must not stop the simulation.
impl<W: Write> TelemetrySink for ConsoleDisplay<W> {
    fn record(&mut self, snapshot: &TelemetrySnapshot) {
        if let Err(err) = self.draw_frame(snapshot) {
            warn!("Failed to draw telemetry: {}", err);
        }
    }

    fn stage_separated(&mut self, stage_index: usize, _vehicle: &VehicleState) {
        if let Err(err) = self.draw_separation(stage_index) {
            warn!("Failed to draw stage separation: {}", err);
        }
    }

    fn mission_ended(&mut self, outcome: &MissionOutcome) {
        if let Err(err) = self.draw_outcome(outcome) {
            warn!("Failed to draw mission outcome: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_snapshot(altitude: f64) -> TelemetrySnapshot {
        TelemetrySnapshot {
            elapsed_time: 10.0,
            altitude,
            velocity: 250.0,
            acceleration: 15.0,
            thrust: 8e6,
            throttle: 1.0,
            net_force: 1e6,
            mass_flow: 2_500.0,
            total_mass: 600_000.0,
            density: 0.5,
            drag: 10_000.0,
            dynamic_pressure: 15_000.0,
            gravity: 9.79,
            isp: 350.0,
            cabin_pressure: 101_325.0,
            oxygen_mass: 1_999.9,
            co2_mass: 0.1,
            mach: 0.8,
            drag_coefficient: 0.5,
            pitch_angle: 90.0,
            current_stage_index: 1,
            stage_count: 3,
        }
    }

    fn render(snapshot: &TelemetrySnapshot) -> String {
        let mut display = ConsoleDisplay::new(Vec::new(), false);
        display.record(snapshot);
        String::from_utf8(display.into_inner()).expect("display writes UTF-8")
    }

    #[test]
    fn test_stage_indicator_marks_current_stage() {
        let output = render(&create_snapshot(12_000.0));
        assert!(output.starts_with("Stage: [ ][#][ ]\n"), "Got: {}", output);
    }

    #[test]
    fn test_progress_bar_scales_with_altitude() {
        let output = render(&create_snapshot(25_000.0));
        let expected = format!("Ascent Progress: [{:<60}] 25000 m", "#####");
        assert!(output.contains(&expected), "Got: {}", output);
    }

    #[test]
    fn test_layer_name_shown() {
        assert!(render(&create_snapshot(12_000.0)).contains("Stratosphere"));
        assert!(render(&create_snapshot(150_000.0)).contains("Thermosphere"));
    }

    #[test]
    fn test_separation_message() {
        let mut display = ConsoleDisplay::new(Vec::new(), false);
        display.stage_separated(0, &VehicleState::on_pad(5_000.0));

        let output = String::from_utf8(display.into_inner()).expect("display writes UTF-8");
        assert_eq!(output, "=> Stage 1 jettisoned!\n");
    }
}
