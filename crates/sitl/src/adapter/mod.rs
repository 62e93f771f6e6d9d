pub mod handles;
pub mod lightweight;

pub use lightweight::SkidSteerSim;

use skidsteer_core::control::DriveOutput;
use skidsteer_core::state::KinematicsState;

/// Read side of a physics backend: the vehicle's current rigid-body state.
///
/// The bridge only samples; it never asks the provider to step.
pub trait KinematicsProvider {
    /// Latest kinematics sample, or `None` if the backend cannot produce one
    /// yet (not started, torn down, or momentarily busy).
    fn sample(&self) -> Option<KinematicsState>;

    /// Whether this handle still refers to a live backend.
    fn is_bound(&self) -> bool {
        true
    }
}

/// Write side of a physics backend: turns track commands into motion.
pub trait Actuator {
    /// Apply one tick's drive output. `dt` is the caller's step in seconds,
    /// passed through for backends that pace their own stepping.
    fn apply(&mut self, output: &DriveOutput, dt: f32);

    /// Whether this handle still refers to a live backend.
    fn is_bound(&self) -> bool {
        true
    }
}
