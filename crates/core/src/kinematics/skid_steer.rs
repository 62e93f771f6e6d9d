//! Skid-steer mixing for tracked vehicles
//!
//! Converts throttle/steering intent into independent left/right track commands.
//! Unlike a proportional mixer, each track saturates on its own: pushing full
//! throttle and some steering keeps the outer track pinned at 1.0 while the inner
//! track slows down.
//!
//! # Examples
//!
//! ```
//! use skidsteer_core::kinematics::SkidSteerMixer;
//!
//! // Straight forward at half speed
//! let (left, right) = SkidSteerMixer::mix(0.5, 0.0);
//! assert_eq!(left, 0.5);
//! assert_eq!(right, 0.5);
//!
//! // Pivot turn to the right
//! let (left, right) = SkidSteerMixer::mix(0.0, 1.0);
//! assert_eq!(left, 1.0);
//! assert_eq!(right, -1.0);
//! ```

use crate::control::{ControlCommand, DriveOutput};

/// Skid-steer mixer (zero-sized type)
///
/// Namespace for the pure conversion functions. Ordering of the stages is
/// fixed: mix, then brake attenuation, then handbrake override.
pub struct SkidSteerMixer;

impl SkidSteerMixer {
    /// Convert throttle/steering to left/right track commands.
    ///
    /// `left = clamp(throttle + steering)`, `right = clamp(throttle - steering)`,
    /// both clamped to [-1.0, +1.0].
    ///
    /// # Arguments
    ///
    /// * `throttle` - -1.0 (full reverse) to +1.0 (full forward)
    /// * `steering` - -1.0 (full left) to +1.0 (full right)
    #[inline]
    pub fn mix(throttle: f32, steering: f32) -> (f32, f32) {
        let left = (throttle + steering).clamp(-1.0, 1.0);
        let right = (throttle - steering).clamp(-1.0, 1.0);
        (left, right)
    }

    /// Attenuate both tracks linearly toward zero.
    ///
    /// `brake = 0.0` leaves the tracks untouched, `brake = 1.0` stops them.
    #[inline]
    pub fn apply_brake(left: f32, right: f32, brake: f32) -> (f32, f32) {
        let factor = 1.0 - brake.clamp(0.0, 1.0);
        (left * factor, right * factor)
    }

    /// Full pipeline from a command to the output forwarded to the actuator.
    ///
    /// The command is clamped first, so any input yields tracks in range.
    /// With an automatic gearbox a negative target gear is raised to 0.
    pub fn drive_output(command: &ControlCommand) -> DriveOutput {
        let command = command.clamped();

        let (left, right) = Self::mix(command.throttle, command.steering);
        let (left, right) = Self::apply_brake(left, right, command.brake);
        let (left, right) = if command.handbrake {
            (0.0, 0.0)
        } else {
            (left, right)
        };

        DriveOutput {
            left_track: left,
            right_track: right,
            manual_gear_engaged: command.manual_gear_engaged,
            target_gear: command.effective_gear(),
            gear_immediate: command.gear_immediate,
        }
    }
}
