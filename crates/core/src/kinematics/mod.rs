//! Vehicle motion mixing algorithms.

pub mod skid_steer;

pub use skid_steer::SkidSteerMixer;
