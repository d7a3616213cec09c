use solar_grid::{logging, Clock, ManualClock, SimulationConfig, SolarFarm};

const FRAME_MS: u64 = 16;
const RUN_MS: u64 = 10_000;

fn main() -> solar_grid::Result<()> {
    logging::init();

    let config = match std::env::var("SOLAR_GRID_CONFIG") {
        Ok(path) => SimulationConfig::from_json_file(path)?,
        Err(_) => SimulationConfig::default(),
    };

    let clock = ManualClock::new();
    let mut farm = SolarFarm::with_file_sink(config)?;

    println!("=== Headless Solar Grid Run ===");
    println!("Orbit: {:?}", farm.config().orbit);
    println!("Log file: {}", farm.config().log_path.display());
    println!();

    while clock.elapsed_millis() < RUN_MS {
        clock.advance_millis(FRAME_MS);
        let frame = farm.advance(clock.elapsed_millis());
        if let Some(report) = &frame.sample {
            println!(
                "t={:.2}s time_of_day={:.3} sun=({:.2}, {:.2}, {:.2}) brightness={:.1} -> {:?}",
                report.timestamp,
                frame.time_of_day,
                frame.light_position.x,
                frame.light_position.y,
                frame.light_position.z,
                frame.brightness,
                report.flush
            );
            for panel in &frame.panels {
                println!(
                    "  panel {}: tilt {:.1}°, strength {:.3}",
                    panel.id, panel.tilt_degrees, panel.sunlight_strength
                );
            }
        }
    }

    println!();
    println!("--- Overlay ---");
    for line in farm.overlay() {
        println!("{}", line);
    }
    println!();
    println!("Recorded {} entries", farm.history().len());
    Ok(())
}
