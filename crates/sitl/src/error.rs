use core::fmt;

/// Collaborator role a bridge is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Kinematics,
    Actuator,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Kinematics => write!(f, "kinematics provider"),
            Collaborator::Actuator => write!(f, "actuator"),
        }
    }
}

/// Errors reported by the control bridge.
///
/// None of them leave partial side effects behind: a failed `update` has not
/// written to the actuator and a failed state query returns no snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    #[error("Binding failed: {0} is not bound")]
    Binding(Collaborator),

    #[error("Invalid timestep: {dt} s")]
    InvalidTimestep { dt: f32 },

    #[error("Vehicle state unavailable: kinematics provider has no sample")]
    UnavailableState,
}

impl BridgeError {
    /// True when retrying on a later tick may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, BridgeError::UnavailableState)
    }
}

/// Errors raised by the built-in skid-steer simulator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulatorError {
    #[error("Simulator is not running")]
    NotRunning,

    #[error("Invalid step duration: {0} s")]
    InvalidStep(f32),
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Errors that can occur while loading or playing a route.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Route step {index} at {at_s} s is out of order or not a valid time")]
    Unordered { index: usize, at_s: f32 },

    #[error("Route hold time {hold_s} s must be finite and non-negative")]
    InvalidHold { hold_s: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Simulator(#[from] SimulatorError),
}
