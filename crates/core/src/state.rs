//! Vehicle state snapshots
//!
//! # Coordinate System
//!
//! - Body frame: +X forward, +Y left, +Z up
//! - Quaternion rotates body-frame vectors into the world frame
//! - Velocities are expressed in the world frame

use nalgebra::{UnitQuaternion, Vector3};

/// Instantaneous rigid-body reading from a kinematics provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicsState {
    /// Position in meters (world frame)
    pub position: Vector3<f32>,
    /// Body-to-world rotation
    pub orientation: UnitQuaternion<f32>,
    /// Linear velocity in m/s (world frame)
    pub linear_velocity: Vector3<f32>,
    /// Angular velocity in rad/s (world frame)
    pub angular_velocity: Vector3<f32>,
    /// Provider time at which the sample was taken (microseconds)
    pub timestamp_us: u64,
}

impl KinematicsState {
    /// Vehicle at rest at the origin, facing +X.
    pub fn at_rest() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            timestamp_us: 0,
        }
    }

    /// Unit forward axis of the vehicle in the world frame.
    pub fn forward_axis(&self) -> Vector3<f32> {
        self.orientation * Vector3::x()
    }

    /// Signed speed along the forward axis in m/s.
    ///
    /// Positive when moving forward, negative when reversing. Lateral slip
    /// does not contribute.
    pub fn forward_speed(&self) -> f32 {
        self.linear_velocity.dot(&self.forward_axis())
    }
}

impl Default for KinematicsState {
    fn default() -> Self {
        Self::at_rest()
    }
}

/// Outward-facing vehicle snapshot returned to the caller.
///
/// Built fresh on every query and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub kinematics: KinematicsState,
    /// Signed forward speed in m/s
    pub speed: f32,
    /// Gear from the most recently applied command
    pub current_gear: i32,
    /// Handbrake from the most recently applied command
    pub handbrake: bool,
    /// Time of the query (microseconds)
    pub timestamp_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn at_rest_has_zero_speed() {
        let k = KinematicsState::at_rest();
        assert_eq!(k.forward_speed(), 0.0);
        assert!((k.forward_axis() - Vector3::x()).norm() < 1e-6);
    }

    #[test]
    fn forward_motion_is_positive() {
        let k = KinematicsState {
            linear_velocity: Vector3::new(2.0, 0.0, 0.0),
            ..KinematicsState::at_rest()
        };
        assert!((k.forward_speed() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn reversing_is_negative() {
        let k = KinematicsState {
            orientation: UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI),
            linear_velocity: Vector3::new(1.5, 0.0, 0.0),
            ..KinematicsState::at_rest()
        };
        assert!((k.forward_speed() + 1.5).abs() < 1e-5);
    }

    #[test]
    fn lateral_velocity_is_ignored() {
        let k = KinematicsState {
            orientation: UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
            linear_velocity: Vector3::new(3.0, 0.5, 0.0),
            ..KinematicsState::at_rest()
        };
        // Facing +Y: only the 0.5 m/s component is along the forward axis
        assert!((k.forward_speed() - 0.5).abs() < 1e-5);
    }
}
