//! Host side of the skid-steer control bridge.
//!
//! [`ControlBridge`] connects driver commands to a vehicle's actuator and
//! kinematics provider. [`SkidSteerSim`] is a built-in vehicle that plays both
//! collaborator roles, and [`RoutePlayer`] drives it from scripted routes.

pub mod adapter;
pub mod bridge;
pub mod config;
pub mod error;
pub mod logging;
pub mod route;
pub mod time;

pub use adapter::{Actuator, KinematicsProvider, SkidSteerSim};
pub use bridge::{BridgeMode, ControlBridge};
pub use config::SimConfig;
pub use error::{BridgeError, Collaborator, ConfigError, RouteError, SimulatorError};
pub use route::{Route, RoutePlayer, StateRecord};
pub use time::{SimClock, StdTime};

pub use skidsteer_core::control::{ControlCommand, DriveOutput};
pub use skidsteer_core::state::{KinematicsState, VehicleState};
