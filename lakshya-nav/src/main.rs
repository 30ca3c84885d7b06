//! Demo entrypoint: runs the full mission against the simulated robot.

use std::env;
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use drishti_io::mock::{Pillar, SimConfig, SimRobot, SimWorld};
use drishti_io::LogDiagnostics;
use lakshya_nav::{LakshyaConfig, Mission, MissionOutcome, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lakshya_nav=info,diagnostics=info")),
        )
        .init();

    let config = load_config()?;

    // Two pillars ahead: a narrow one dead ahead and a wide one off to the
    // left. The mission should pick the narrow one.
    let world = SimWorld::new(vec![
        Pillar::new(0.0, 900.0, 80.0),
        Pillar::new(-600.0, 700.0, 150.0),
    ]);
    let sim_config = SimConfig {
        robot_radius_mm: 50.0,
        ..SimConfig::default()
    };
    let robot = SimRobot::new(world, sim_config, 0.0, 0.0, FRAC_PI_2);

    // One simulated platform, handed out as head and chassis
    let mut mission = Mission::new(robot.clone(), robot.clone(), LogDiagnostics, config);
    let outcome = mission.run()?;

    let (x, y, theta) = robot.pose();
    match outcome {
        MissionOutcome::TargetReached => tracing::info!(x, y, theta, "target reached"),
        MissionOutcome::NothingFound => tracing::info!(x, y, theta, "no target found"),
    }
    Ok(())
}

/// Config from argv[1], else `lakshya.toml` if present, else defaults tuned
/// for the ideal simulated chassis (no slip, no overshoot).
fn load_config() -> Result<LakshyaConfig> {
    if let Some(path) = env::args().nth(1) {
        return LakshyaConfig::load(Path::new(&path));
    }
    let fallback = Path::new("lakshya.toml");
    if fallback.exists() {
        return LakshyaConfig::load(fallback);
    }
    let mut config = LakshyaConfig::default();
    config.navigation.turn_calibration_deg = 0.0;
    config.navigation.forward_scale = 1.0;
    Ok(config)
}
