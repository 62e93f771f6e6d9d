//! Route playback against the built-in simulator, with per-tick recording.

use std::cell::{Ref, RefCell};
use std::io::Write;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use skidsteer_core::control::{ControlCommand, DriveOutput};
use skidsteer_core::state::VehicleState;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::{Route, RouteAction};
use crate::adapter::SkidSteerSim;
use crate::bridge::ControlBridge;
use crate::config::SimConfig;
use crate::error::RouteError;
use crate::time::SimClock;

type SimHandle = Weak<RefCell<SkidSteerSim>>;

/// One recorded tick: what was commanded and where the vehicle ended up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub tick: u64,
    pub timestamp_us: u64,
    pub x_m: f32,
    pub y_m: f32,
    pub heading_rad: f32,
    pub speed_ms: f32,
    pub yaw_rate_rads: f32,
    pub left_track: f32,
    pub right_track: f32,
    pub gear: i32,
    pub handbrake: bool,
}

impl StateRecord {
    fn new(tick: u64, state: &VehicleState, output: &DriveOutput) -> Self {
        let k = &state.kinematics;
        let (_, _, yaw) = k.orientation.euler_angles();
        Self {
            tick,
            timestamp_us: state.timestamp_us,
            x_m: k.position.x,
            y_m: k.position.y,
            heading_rad: yaw,
            speed_ms: state.speed,
            yaw_rate_rads: k.angular_velocity.z,
            left_track: output.left_track,
            right_track: output.right_track,
            gear: state.current_gear,
            handbrake: state.handbrake,
        }
    }
}

/// Plays a [`Route`] through a [`ControlBridge`] bound to a [`SkidSteerSim`].
///
/// The player owns the simulator; the bridge holds only weak handles to it,
/// mirroring a host that owns the vehicle and lends it to the bridge.
pub struct RoutePlayer {
    route: Route,
    sim: Rc<RefCell<SkidSteerSim>>,
    bridge: ControlBridge<SimHandle, SimHandle, SimClock>,
    clock: SimClock,
    step_size_us: u64,
    next_step: usize,
    tick: u64,
}

impl RoutePlayer {
    pub fn new(route: Route, config: SimConfig) -> Result<Self, RouteError> {
        route.validate()?;
        config.validate()?;

        let step_size_us = config.step_size_us;
        let sim = Rc::new(RefCell::new(SkidSteerSim::new(config)));
        sim.borrow_mut().start();

        let clock = SimClock::new();
        let bridge =
            ControlBridge::with_clock(Rc::downgrade(&sim), Rc::downgrade(&sim), clock.clone())?;

        info!(
            route = %route.name,
            steps = route.steps.len(),
            duration_s = route.duration_s(),
            "route loaded"
        );

        Ok(Self {
            route,
            sim,
            bridge,
            clock,
            step_size_us,
            next_step: 0,
            tick: 0,
        })
    }

    /// Playback time at the start of the next tick.
    pub fn elapsed_s(&self) -> f64 {
        self.tick.saturating_mul(self.step_size_us) as f64 / 1_000_000.0
    }

    pub fn is_finished(&self) -> bool {
        self.next_step >= self.route.steps.len()
            && self.elapsed_s() + 1e-6 >= f64::from(self.route.duration_s())
    }

    fn apply_due_steps(&mut self) {
        let now = self.elapsed_s();
        while let Some(step) = self.route.steps.get(self.next_step) {
            if f64::from(step.at_s) > now + 1e-6 {
                break;
            }
            match &step.action {
                RouteAction::Command(spec) => {
                    debug!(at_s = step.at_s, ?spec, "route command");
                    self.bridge.set_controls(ControlCommand::from(spec));
                }
                RouteAction::Reset => {
                    info!(at_s = step.at_s, "route reset");
                    self.sim.borrow_mut().respawn();
                    self.bridge.reset();
                }
            }
            self.next_step += 1;
        }
    }

    /// Run one simulation tick and record the resulting state.
    pub fn tick(&mut self) -> Result<StateRecord, RouteError> {
        self.apply_due_steps();

        let dt = self.step_size_us as f32 / 1_000_000.0;
        let output = self.bridge.update(dt)?;
        {
            let mut sim = self.sim.borrow_mut();
            sim.step(dt)?;
            self.clock.set(sim.sim_time_us());
        }

        let state = self.bridge.car_state()?;
        let record = StateRecord::new(self.tick, &state, &output);
        self.tick += 1;
        Ok(record)
    }

    /// Play the whole route as fast as possible.
    pub fn run_to_end(&mut self) -> Result<Vec<StateRecord>, RouteError> {
        let mut records = Vec::new();
        while !self.is_finished() {
            records.push(self.tick()?);
        }
        info!(ticks = records.len(), "route finished");
        Ok(records)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn bridge(&self) -> &ControlBridge<SimHandle, SimHandle, SimClock> {
        &self.bridge
    }

    pub fn sim(&self) -> Ref<'_, SkidSteerSim> {
        self.sim.borrow()
    }

    pub fn step_size_us(&self) -> u64 {
        self.step_size_us
    }
}

/// Play a route paced to wall-clock time, one tick per simulation step.
///
/// `on_record` sees every record as it is produced. Returns the tick count.
pub async fn run_realtime<F>(player: &mut RoutePlayer, mut on_record: F) -> Result<u64, RouteError>
where
    F: FnMut(&StateRecord) -> Result<(), RouteError>,
{
    let mut interval = tokio::time::interval(Duration::from_micros(player.step_size_us()));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = 0;
    while !player.is_finished() {
        interval.tick().await;
        let record = player.tick()?;
        on_record(&record)?;
        ticks += 1;
    }
    info!(ticks, "realtime playback finished");
    Ok(ticks)
}

/// Write one record as a JSON line.
pub fn write_json_line<W: Write>(record: &StateRecord, mut writer: W) -> Result<(), RouteError> {
    serde_json::to_writer(&mut writer, record)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write records as JSON lines and flush.
pub fn write_json_lines<W: Write>(records: &[StateRecord], mut writer: W) -> Result<(), RouteError> {
    for record in records {
        write_json_line(record, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}
