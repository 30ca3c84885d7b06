//! Simulated robot: sensor head, chassis kinematics, and bump detection.
//!
//! `SimRobot` is cheaply cloneable; clones share one robot state, so a
//! single simulated platform can be handed out once as a [`SensorHead`]
//! and once as a [`Chassis`], the way the real head and chassis are two
//! views of one machine.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use crate::capture::LatestCell;
use crate::error::{Error, Result};
use crate::hal::{check_head_angle, Chassis, SensorHead};
use crate::types::{ChassisDelta, HeadSample};

use super::noise::NoiseGenerator;
use super::world::SimWorld;

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Simulated time advanced per chassis update (seconds).
    pub tick_s: f32,
    /// Distance between wheels (millimeters).
    pub wheel_base_mm: f32,
    /// Robot collision radius (millimeters).
    pub robot_radius_mm: f32,
    /// PING maximum range (centimeters).
    pub max_range_cm: f32,
    /// IR response numerator: `ir = ir_gain / (distance_cm + ir_offset_cm)`.
    pub ir_gain: f32,
    /// IR response denominator offset (centimeters).
    pub ir_offset_cm: f32,
    /// Gaussian noise on PING readings (centimeters).
    pub range_stddev_cm: f32,
    /// Gaussian noise on IR readings (ADC counts).
    pub ir_stddev: f32,
    /// Noise seed; 0 = entropy.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_s: 0.01,
            wheel_base_mm: 233.0,
            robot_radius_mm: 160.0,
            max_range_cm: 300.0,
            ir_gain: 60_000.0,
            ir_offset_cm: 30.0,
            range_stddev_cm: 0.0,
            ir_stddev: 0.0,
            seed: 42,
        }
    }
}

/// One ranging request handed to the echo worker.
#[derive(Debug, Clone, Copy)]
struct PingRequest {
    x_mm: f32,
    y_mm: f32,
    angle_rad: f32,
    max_range_mm: f32,
}

/// Trigger-then-listen ranging unit.
///
/// Mirrors the interrupt-driven echo capture on real hardware: the
/// measurement completes on a worker thread and lands in a [`LatestCell`];
/// the consumer blocks on the cell until the reading is available.
struct PingUnit {
    request_tx: Option<Sender<PingRequest>>,
    result: Arc<LatestCell<f32>>,
    worker: Option<JoinHandle<()>>,
}

impl PingUnit {
    /// Spawn the echo worker against the given world.
    fn spawn(world: Arc<SimWorld>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<PingRequest>();
        let result = Arc::new(LatestCell::new());
        let cell = Arc::clone(&result);

        let worker = std::thread::spawn(move || {
            while let Ok(req) = request_rx.recv() {
                let dist = world.ray_cast(req.x_mm, req.y_mm, req.angle_rad, req.max_range_mm);
                cell.publish(dist);
            }
        });

        Self {
            request_tx: Some(request_tx),
            result,
            worker: Some(worker),
        }
    }

    /// Trigger a measurement and block until the echo returns (millimeters).
    fn measure(&self, x_mm: f32, y_mm: f32, angle_rad: f32, max_range_mm: f32) -> Result<f32> {
        let tx = self.request_tx.as_ref().ok_or(Error::ChannelClosed)?;
        tx.send(PingRequest {
            x_mm,
            y_mm,
            angle_rad,
            max_range_mm,
        })
        .map_err(|_| Error::ChannelClosed)?;
        Ok(self.result.wait())
    }
}

impl Drop for PingUnit {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.request_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Mutable robot state shared between cloned handles.
struct SimState {
    x_mm: f32,
    y_mm: f32,
    theta_rad: f32,
    left_mm_s: i16,
    right_mm_s: i16,
    noise: NoiseGenerator,
}

/// Simulated robot implementing [`SensorHead`] and [`Chassis`].
#[derive(Clone)]
pub struct SimRobot {
    world: Arc<SimWorld>,
    config: SimConfig,
    ping: Arc<PingUnit>,
    state: Arc<Mutex<SimState>>,
}

impl SimRobot {
    /// Place a robot in `world` at the given pose (mm, mm, radians).
    pub fn new(world: SimWorld, config: SimConfig, x_mm: f32, y_mm: f32, theta_rad: f32) -> Self {
        let world = Arc::new(world);
        let ping = Arc::new(PingUnit::spawn(Arc::clone(&world)));
        let state = SimState {
            x_mm,
            y_mm,
            theta_rad,
            left_mm_s: 0,
            right_mm_s: 0,
            noise: NoiseGenerator::new(config.seed),
        };
        Self {
            world,
            config,
            ping,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Current pose (mm, mm, radians), for test assertions.
    pub fn pose(&self) -> (f32, f32, f32) {
        let st = self.lock_state();
        (st.x_mm, st.y_mm, st.theta_rad)
    }

    fn lock_state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SensorHead for SimRobot {
    fn sample(&mut self, angle_deg: f32) -> Result<HeadSample> {
        check_head_angle(angle_deg)?;

        // Servo frame: 0° = right of chassis, 90° = straight ahead, 180° = left
        let (x, y, world_angle) = {
            let st = self.lock_state();
            (
                st.x_mm,
                st.y_mm,
                st.theta_rad + (angle_deg - 90.0).to_radians(),
            )
        };

        let max_range_mm = self.config.max_range_cm * 10.0;
        let dist_mm = self.ping.measure(x, y, world_angle, max_range_mm)?;
        let true_cm = dist_mm / 10.0;

        let mut st = self.lock_state();
        let ping_cm = (true_cm + st.noise.gaussian(self.config.range_stddev_cm))
            .clamp(0.0, self.config.max_range_cm);
        let ideal_ir = self.config.ir_gain / (true_cm + self.config.ir_offset_cm);
        let ir_raw = (ideal_ir + st.noise.gaussian(self.config.ir_stddev))
            .clamp(0.0, f32::from(u16::MAX)) as u16;

        Ok(HeadSample { ping_cm, ir_raw })
    }
}

impl Chassis for SimRobot {
    fn set_wheels(&mut self, left: i16, right: i16) -> Result<()> {
        let mut st = self.lock_state();
        st.left_mm_s = left;
        st.right_mm_s = right;
        Ok(())
    }

    fn update(&mut self) -> Result<ChassisDelta> {
        let dt = self.config.tick_s;
        let mut st = self.lock_state();

        let v = (st.left_mm_s as f32 + st.right_mm_s as f32) / 2.0;
        let w = (st.right_mm_s as f32 - st.left_mm_s as f32) / self.config.wheel_base_mm;

        let dtheta = w * dt;
        let mid_theta = st.theta_rad + dtheta / 2.0;
        let step = v * dt;
        let new_x = st.x_mm + step * mid_theta.cos();
        let new_y = st.y_mm + step * mid_theta.sin();

        let mut delta = ChassisDelta {
            distance_mm: step,
            angle_deg: dtheta.to_degrees(),
            bump_left: false,
            bump_right: false,
        };

        match self.world.contact(new_x, new_y, self.config.robot_radius_mm) {
            Some((pillar, _)) => {
                // Translation blocked; rotation still applies. Bumpers only
                // report when driving into the contact.
                delta.distance_mm = 0.0;
                if v > 0.0 {
                    let bearing = (pillar.y_mm - st.y_mm).atan2(pillar.x_mm - st.x_mm);
                    let rel = normalize_angle(bearing - st.theta_rad);
                    if rel >= 0.0 {
                        delta.bump_left = true;
                    } else {
                        delta.bump_right = true;
                    }
                }
            }
            None => {
                st.x_mm = new_x;
                st.y_mm = new_y;
            }
        }

        st.theta_rad = normalize_angle(st.theta_rad + dtheta);
        Ok(delta)
    }
}

/// Normalize angle to [-π, π)
fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut a = angle % TAU;
    if a >= PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}
