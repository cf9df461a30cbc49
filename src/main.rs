use ascent_simulation::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let mission = MissionFactory::standard_ascent()?;
    let mut rocket = Rocket::new(mission)?;

    let mut display = ConsoleDisplay::stdout();
    let mut telemetry = Telemetry::new();
    let mut pacer = RealTimePacer::default();

    let outcome = {
        let mut sink = TelemetryFanOut::new()
            .with(&mut display)
            .with(&mut telemetry);
        rocket.run(&mut sink, &mut pacer)?
    };

    println!(
        "Final state: {:?} at {:.0} m after {:.1} s",
        outcome.final_state, outcome.vehicle.altitude, outcome.vehicle.elapsed_time
    );

    telemetry.display_data();

    Ok(())
}
