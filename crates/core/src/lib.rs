//! skidsteer_core - Pure no_std types and algorithms for the skid-steer bridge
//!
//! This crate contains platform-agnostic value types and the track mixing
//! algorithm, testable on host without any simulator attached.
//!
//! # Modules
//!
//! - [`control`]: Driver intent (`ControlCommand`) and per-tick `DriveOutput`
//! - [`kinematics`]: Skid-steer mixing (throttle/steering → track commands)
//! - [`state`]: Kinematics samples and outward-facing vehicle snapshots
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)

#![no_std]

pub mod control;
pub mod kinematics;
pub mod state;
pub mod traits;

pub use control::{ControlCommand, DriveOutput};
pub use kinematics::SkidSteerMixer;
pub use state::{KinematicsState, VehicleState};
pub use traits::{MockTime, TimeSource};
