//! Lightweight skid-steer simulator.
//!
//! Built-in kinematics with no external physics engine, suitable for CI and
//! route playback. Acts as both collaborators of the bridge: it accepts track
//! commands as an [`Actuator`] and reports its pose as a [`KinematicsProvider`].
//! Stepping is driven by the host tick loop through [`SkidSteerSim::step`].

use nalgebra::{UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skidsteer_core::control::DriveOutput;
use skidsteer_core::state::KinematicsState;
use tracing::debug;

use crate::adapter::{Actuator, KinematicsProvider};
use crate::config::SimConfig;
use crate::error::SimulatorError;

/// Internal vehicle state for kinematics integration.
#[derive(Debug, Clone, Default)]
struct SimState {
    /// X position in meters.
    x: f32,
    /// Y position in meters.
    y: f32,
    /// Heading in radians (0 = +X, counter-clockwise positive).
    heading: f32,
    /// Forward velocity in m/s.
    velocity: f32,
    /// Yaw rate in rad/s.
    yaw_rate: f32,
    /// Left track command (-1.0 to 1.0).
    left_track: f32,
    /// Right track command (-1.0 to 1.0).
    right_track: f32,
}

/// Skid-steer simulator with built-in differential kinematics.
pub struct SkidSteerSim {
    config: SimConfig,
    state: SimState,
    rng: StdRng,
    sim_time_us: u64,
    running: bool,
    step_count: u64,
    gear: i32,
    manual_gear: bool,
}

impl SkidSteerSim {
    pub fn new(config: SimConfig) -> Self {
        let rng = seeded_rng(config.seed);
        Self {
            config,
            state: SimState::default(),
            rng,
            sim_time_us: 0,
            running: false,
            step_count: 0,
            gear: 0,
            manual_gear: false,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SimConfig::default())
    }

    /// Start (or restart) the simulation from the origin at time zero.
    pub fn start(&mut self) {
        self.state = SimState::default();
        self.sim_time_us = 0;
        self.step_count = 0;
        self.gear = 0;
        self.manual_gear = false;
        self.rng = seeded_rng(self.config.seed);
        self.running = true;
        debug!("skid-steer simulator started");
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Teleport back to the origin at rest. Simulation time keeps running.
    pub fn respawn(&mut self) {
        self.state = SimState::default();
        debug!(sim_time_us = self.sim_time_us, "vehicle respawned at origin");
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> Result<(), SimulatorError> {
        if !self.running {
            return Err(SimulatorError::NotRunning);
        }
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimulatorError::InvalidStep(dt));
        }
        self.integrate(dt);
        self.sim_time_us += (dt as f64 * 1_000_000.0).round() as u64;
        self.step_count += 1;
        Ok(())
    }

    /// Advance the simulation by the configured fixed step.
    pub fn step_fixed(&mut self) -> Result<(), SimulatorError> {
        self.step(self.config.step_dt_s())
    }

    /// Integrate skid-steer kinematics for one time step.
    fn integrate(&mut self, dt: f32) {
        let v_left = self.state.left_track * self.config.max_speed_ms;
        let v_right = self.state.right_track * self.config.max_speed_ms;

        // Left faster than right yaws clockwise (negative about +Z)
        let velocity = (v_left + v_right) / 2.0;
        let yaw_rate = ((v_right - v_left) / self.config.track_width_m)
            .clamp(-self.config.max_turn_rate_rads, self.config.max_turn_rate_rads);

        self.state.velocity = velocity + self.gaussian_noise(self.config.velocity_noise_ms);
        self.state.yaw_rate = yaw_rate + self.gaussian_noise(self.config.yaw_rate_noise_rads);

        self.state.heading = normalize_angle(self.state.heading + self.state.yaw_rate * dt);
        self.state.x += self.state.velocity * self.state.heading.cos() * dt;
        self.state.y += self.state.velocity * self.state.heading.sin() * dt;
    }

    /// Generate Gaussian noise using Box-Muller transform.
    fn gaussian_noise(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f32 = self.rng.gen::<f32>().max(f32::EPSILON);
        let u2: f32 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        z * stddev
    }

    /// Current rigid-body state, stamped with simulation time.
    pub fn kinematics(&self) -> KinematicsState {
        let (sin_h, cos_h) = self.state.heading.sin_cos();
        KinematicsState {
            position: Vector3::new(self.state.x, self.state.y, 0.0),
            orientation: UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.state.heading),
            linear_velocity: Vector3::new(
                self.state.velocity * cos_h,
                self.state.velocity * sin_h,
                0.0,
            ),
            angular_velocity: Vector3::new(0.0, 0.0, self.state.yaw_rate),
            timestamp_us: self.sim_time_us,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.state.x, self.state.y)
    }

    pub fn heading(&self) -> f32 {
        self.state.heading
    }

    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    /// Track commands currently driving the vehicle.
    pub fn track_commands(&self) -> (f32, f32) {
        (self.state.left_track, self.state.right_track)
    }

    pub fn current_gear(&self) -> i32 {
        self.gear
    }

    pub fn sim_time_us(&self) -> u64 {
        self.sim_time_us
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

impl std::fmt::Debug for SkidSteerSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkidSteerSim")
            .field("running", &self.running)
            .field("sim_time_us", &self.sim_time_us)
            .field("gear", &self.gear)
            .finish()
    }
}

impl KinematicsProvider for SkidSteerSim {
    fn sample(&self) -> Option<KinematicsState> {
        self.running.then(|| self.kinematics())
    }
}

impl Actuator for SkidSteerSim {
    fn apply(&mut self, output: &DriveOutput, _dt: f32) {
        self.gear = output.target_gear;
        self.manual_gear = output.manual_gear_engaged;

        // Manual neutral disengages both tracks
        if self.manual_gear && self.gear == 0 {
            self.state.left_track = 0.0;
            self.state.right_track = 0.0;
        } else {
            self.state.left_track = output.left_track.clamp(-1.0, 1.0);
            self.state.right_track = output.right_track.clamp(-1.0, 1.0);
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Normalize angle to [-pi, pi].
fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * std::f32::consts::PI);
    if a > std::f32::consts::PI {
        a -= 2.0 * std::f32::consts::PI;
    } else if a < -std::f32::consts::PI {
        a += 2.0 * std::f32::consts::PI;
    }
    a
}
