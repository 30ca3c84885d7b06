//! End-to-end mission run against the simulated robot: sweep, detect two
//! pillars, pick the narrow one, and drive up to it.

use std::f32::consts::FRAC_PI_2;

use drishti_io::mock::{BufferDiagnostics, Pillar, SimConfig, SimRobot, SimWorld};
use lakshya_nav::{LakshyaConfig, Mission, MissionOutcome};

fn sim_config() -> SimConfig {
    SimConfig {
        robot_radius_mm: 50.0,
        range_stddev_cm: 0.0,
        ir_stddev: 0.0,
        seed: 42,
        ..SimConfig::default()
    }
}

fn mission_config() -> LakshyaConfig {
    let mut config = LakshyaConfig::default();
    // The simulator has no wheel slip or overshoot
    config.navigation.turn_calibration_deg = 0.0;
    config.navigation.forward_scale = 1.0;
    config
}

#[test]
fn test_mission_drives_to_narrow_pillar() {
    // Robot at the origin facing +Y. Narrow pillar dead ahead at 900 mm,
    // wide pillar up-left; the narrow one must win selection.
    let world = SimWorld::new(vec![
        Pillar::new(0.0, 900.0, 80.0),
        Pillar::new(-600.0, 700.0, 150.0),
    ]);
    let robot = SimRobot::new(world, sim_config(), 0.0, 0.0, FRAC_PI_2);

    let mut mission = Mission::new(
        robot.clone(),
        robot.clone(),
        BufferDiagnostics::default(),
        mission_config(),
    );
    let outcome = mission.run().unwrap();
    let (_, _, diag) = mission.into_parts();

    assert_eq!(outcome, MissionOutcome::TargetReached);

    // Nearest narrow-pillar surface reading is ~82 cm; minus the 10 cm
    // standoff the chassis drives ~720 mm straight up the +Y axis.
    let (x, y, theta) = robot.pose();
    assert!(x.abs() < 5.0, "x = {x}");
    assert!((650.0..760.0).contains(&y), "y = {y}");
    assert!((theta - FRAC_PI_2).abs() < 0.05, "theta = {theta}");

    // Both pillars reported, then the narrow one chosen dead ahead
    assert!(diag.lines.iter().any(|l| l.contains("Objects found: 2")));
    assert!(diag
        .lines
        .iter()
        .any(|l| l.contains("Target: center 90.0 deg")));
    assert!(diag.lines.iter().any(|l| l.contains("Navigation complete")));
}

#[test]
fn test_mission_gives_up_on_empty_floor() {
    let world = SimWorld::new(Vec::new());
    let robot = SimRobot::new(world, sim_config(), 0.0, 0.0, FRAC_PI_2);

    let mut mission = Mission::new(
        robot.clone(),
        robot.clone(),
        BufferDiagnostics::default(),
        mission_config(),
    );
    let outcome = mission.run().unwrap();

    assert_eq!(outcome, MissionOutcome::NothingFound);
    // Only the blind nudge between the two scans moved the chassis
    let (x, y, _) = robot.pose();
    assert!(x.abs() < 5.0);
    assert!((90.0..=115.0).contains(&y), "y = {y}");
}
