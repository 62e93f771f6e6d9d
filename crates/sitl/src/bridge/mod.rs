//! Control bridge between a driver-command source and one vehicle.

pub mod mode;

pub use mode::BridgeMode;

use skidsteer_core::control::{ControlCommand, DriveOutput};
use skidsteer_core::kinematics::SkidSteerMixer;
use skidsteer_core::state::VehicleState;
use skidsteer_core::traits::TimeSource;
use tracing::{debug, trace};

use crate::adapter::{Actuator, KinematicsProvider};
use crate::error::{BridgeError, Collaborator};
use crate::time::StdTime;

/// Control bridge for one skid-steer vehicle.
///
/// Caches the most recent driver command, applies it to the actuator once per
/// tick, and assembles vehicle snapshots from the kinematics provider. The
/// collaborators are handles supplied by the host; the bridge never extends
/// their lifetime and must not outlive them.
///
/// All calls are synchronous and expected on the simulation tick thread.
pub struct ControlBridge<K, A, C = StdTime> {
    kinematics: K,
    actuator: A,
    clock: C,
    pending: ControlCommand,
    last_applied: ControlCommand,
    mode: BridgeMode,
}

impl<K, A> ControlBridge<K, A, StdTime>
where
    K: KinematicsProvider,
    A: Actuator,
{
    /// Bind a bridge to one vehicle's collaborators using the wall clock.
    pub fn new(kinematics: K, actuator: A) -> Result<Self, BridgeError> {
        Self::with_clock(kinematics, actuator, StdTime::new())
    }
}

impl<K, A, C> ControlBridge<K, A, C>
where
    K: KinematicsProvider,
    A: Actuator,
    C: TimeSource,
{
    /// Bind a bridge with an explicit time source for snapshot timestamps.
    ///
    /// Fails with [`BridgeError::Binding`] if either handle is not bound.
    pub fn with_clock(kinematics: K, actuator: A, clock: C) -> Result<Self, BridgeError> {
        if !kinematics.is_bound() {
            return Err(BridgeError::Binding(Collaborator::Kinematics));
        }
        if !actuator.is_bound() {
            return Err(BridgeError::Binding(Collaborator::Actuator));
        }
        Ok(Self {
            kinematics,
            actuator,
            clock,
            pending: ControlCommand::neutral(),
            last_applied: ControlCommand::neutral(),
            mode: BridgeMode::Idle,
        })
    }

    /// Store `command` for the next [`update`](Self::update).
    ///
    /// Last write wins. Out-of-range axes are clamped; an unstamped command
    /// (timestamp 0, see [`ControlCommand::timestamp_us`]) is stamped with the
    /// bridge clock. Nothing reaches the actuator until the next tick.
    pub fn set_controls(&mut self, command: ControlCommand) {
        let mut command = command.clamped();
        if !command.is_stamped() {
            command.timestamp_us = self.clock.now_us();
        }

        if self.mode == BridgeMode::Idle && !command.is_neutral() {
            self.mode = BridgeMode::Active;
            debug!("bridge active");
        }
        self.pending = command;
    }

    /// Per-tick entry point: mix the pending command and apply it.
    ///
    /// `dt` is passed through to the actuator; the bridge keeps no timing
    /// state. Repeated calls without a new command re-issue the same output.
    pub fn update(&mut self, dt: f32) -> Result<DriveOutput, BridgeError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(BridgeError::InvalidTimestep { dt });
        }

        let command = self.pending;
        let output = SkidSteerMixer::drive_output(&command);
        self.actuator.apply(&output, dt);

        if !command.same_intent(&self.last_applied) {
            debug!(
                left = output.left_track,
                right = output.right_track,
                gear = output.target_gear,
                handbrake = command.handbrake,
                "applied new command"
            );
        }
        trace!(dt, ?output, "tick");

        self.last_applied = command;
        Ok(output)
    }

    /// Point-in-time vehicle snapshot.
    ///
    /// Samples whatever the provider currently holds; never steps physics and
    /// never touches the command cache.
    pub fn car_state(&self) -> Result<VehicleState, BridgeError> {
        let kinematics = self
            .kinematics
            .sample()
            .ok_or(BridgeError::UnavailableState)?;

        Ok(VehicleState {
            kinematics,
            speed: kinematics.forward_speed(),
            current_gear: self.last_applied.effective_gear(),
            handbrake: self.last_applied.handbrake,
            timestamp_us: self.clock.now_us(),
        })
    }

    /// Drop any cached intent and return to `Idle`.
    ///
    /// Used after the host teleports or respawns the vehicle so the next
    /// tick does not replay a stale command. Kinematics are left alone.
    pub fn reset(&mut self) {
        self.pending = ControlCommand::neutral();
        self.last_applied = ControlCommand::neutral();
        if self.mode != BridgeMode::Idle {
            debug!("bridge reset to idle");
        }
        self.mode = BridgeMode::Idle;
    }

    pub fn mode(&self) -> BridgeMode {
        self.mode
    }

    /// Command that the next `update` will apply.
    pub fn pending(&self) -> &ControlCommand {
        &self.pending
    }

    /// Command applied by the most recent `update`.
    pub fn last_applied(&self) -> &ControlCommand {
        &self.last_applied
    }

    pub fn kinematics(&self) -> &K {
        &self.kinematics
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Release the collaborator handles.
    pub fn into_parts(self) -> (K, A) {
        (self.kinematics, self.actuator)
    }
}
