//! Scripted routes: timed driver commands played through the bridge.
//!
//! A route is a JSON document of steps ordered by time:
//!
//! ```json
//! {
//!   "name": "pivot",
//!   "hold_s": 1.0,
//!   "steps": [
//!     { "at_s": 0.0, "action": { "command": { "throttle": 0.5 } } },
//!     { "at_s": 2.0, "action": { "command": { "steering": 1.0 } } },
//!     { "at_s": 4.0, "action": "reset" }
//!   ]
//! }
//! ```

pub mod player;

pub use player::{run_realtime, write_json_line, write_json_lines, RoutePlayer, StateRecord};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skidsteer_core::control::ControlCommand;

use crate::error::RouteError;

/// Default time to keep ticking after the last step
const DEFAULT_HOLD_S: f32 = 1.0;

/// Driver command as written in a route file.
///
/// Omitted fields are neutral. `manual_gear` engages manual selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSpec {
    pub throttle: f32,
    pub steering: f32,
    pub brake: f32,
    pub handbrake: bool,
    pub manual_gear: Option<i32>,
    pub gear_immediate: bool,
}

impl From<&CommandSpec> for ControlCommand {
    fn from(spec: &CommandSpec) -> Self {
        let command = ControlCommand::drive(spec.throttle, spec.steering)
            .with_brake(spec.brake)
            .with_handbrake(spec.handbrake);
        match spec.manual_gear {
            Some(gear) => command.with_manual_gear(gear, spec.gear_immediate),
            None => command,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAction {
    /// Hand a new command to the bridge.
    Command(CommandSpec),
    /// Respawn the vehicle at the origin and reset the bridge.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Seconds from the start of playback.
    pub at_s: f32,
    pub action: RouteAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub name: String,
    /// Seconds to keep running after the last step.
    #[serde(default = "default_hold_s")]
    pub hold_s: f32,
    pub steps: Vec<RouteStep>,
}

fn default_hold_s() -> f32 {
    DEFAULT_HOLD_S
}

impl Route {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, RouteError> {
        let route: Route = serde_json::from_str(text)?;
        route.validate()?;
        Ok(route)
    }

    /// Steps must have finite, non-negative, non-decreasing times, and the
    /// hold time must be finite and non-negative.
    pub fn validate(&self) -> Result<(), RouteError> {
        if !(self.hold_s.is_finite() && self.hold_s >= 0.0) {
            return Err(RouteError::InvalidHold {
                hold_s: self.hold_s,
            });
        }
        let mut previous = 0.0_f32;
        for (index, step) in self.steps.iter().enumerate() {
            if !(step.at_s.is_finite() && step.at_s >= previous) {
                return Err(RouteError::Unordered {
                    index,
                    at_s: step.at_s,
                });
            }
            previous = step.at_s;
        }
        Ok(())
    }

    /// Total playback time: last step plus the hold time.
    pub fn duration_s(&self) -> f32 {
        let last = self.steps.last().map_or(0.0, |step| step.at_s);
        last + self.hold_s
    }

    /// Drive a square: straight legs joined by quarter pivot turns.
    ///
    /// The pivot duration assumes the simulator's default turn-rate limit.
    pub fn square(leg_s: f32, pivot_s: f32) -> Self {
        let mut steps = Vec::with_capacity(9);
        let mut at_s = 0.0;
        for _ in 0..4 {
            steps.push(RouteStep {
                at_s,
                action: RouteAction::Command(CommandSpec {
                    throttle: 0.6,
                    ..Default::default()
                }),
            });
            at_s += leg_s;
            steps.push(RouteStep {
                at_s,
                action: RouteAction::Command(CommandSpec {
                    steering: 1.0,
                    ..Default::default()
                }),
            });
            at_s += pivot_s;
        }
        steps.push(RouteStep {
            at_s,
            action: RouteAction::Command(CommandSpec {
                handbrake: true,
                ..Default::default()
            }),
        });
        Self {
            name: "square".to_string(),
            hold_s: DEFAULT_HOLD_S,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "pivot",
        "steps": [
            { "at_s": 0.0, "action": { "command": { "throttle": 0.5 } } },
            { "at_s": 2.0, "action": { "command": { "steering": 1.0, "manual_gear": 1 } } },
            { "at_s": 4.0, "action": "reset" }
        ]
    }"#;

    #[test]
    fn parses_commands_and_resets() {
        let route = Route::from_json_str(SAMPLE).unwrap();
        assert_eq!(route.name, "pivot");
        assert_eq!(route.hold_s, DEFAULT_HOLD_S);
        assert_eq!(route.steps.len(), 3);
        assert_eq!(route.steps[2].action, RouteAction::Reset);
        assert_eq!(route.duration_s(), 5.0);

        match &route.steps[1].action {
            RouteAction::Command(spec) => {
                let cmd = ControlCommand::from(spec);
                assert_eq!(cmd.steering, 1.0);
                assert!(cmd.manual_gear_engaged);
                assert_eq!(cmd.target_gear, 1);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn omitted_fields_are_neutral() {
        let cmd = ControlCommand::from(&CommandSpec::default());
        assert!(cmd.is_neutral());
    }

    #[test]
    fn rejects_out_of_order_steps() {
        let text = r#"{ "steps": [
            { "at_s": 1.0, "action": "reset" },
            { "at_s": 0.5, "action": "reset" }
        ] }"#;
        let err = Route::from_json_str(text).unwrap_err();
        assert!(matches!(err, RouteError::Unordered { index: 1, .. }));
    }

    #[test]
    fn rejects_negative_time() {
        let text = r#"{ "steps": [ { "at_s": -1.0, "action": "reset" } ] }"#;
        assert!(Route::from_json_str(text).is_err());
    }

    #[test]
    fn rejects_infinite_hold() {
        let text = r#"{ "hold_s": 1e39, "steps": [ { "at_s": 0.0, "action": "reset" } ] }"#;
        let err = Route::from_json_str(text).unwrap_err();
        assert!(matches!(err, RouteError::InvalidHold { hold_s } if hold_s.is_infinite()));
    }

    #[test]
    fn rejects_negative_hold() {
        let text = r#"{ "hold_s": -1.0, "steps": [ { "at_s": 0.0, "action": "reset" } ] }"#;
        let err = Route::from_json_str(text).unwrap_err();
        assert!(matches!(err, RouteError::InvalidHold { hold_s } if hold_s == -1.0));
    }

    #[test]
    fn rejects_nan_hold_built_in_code() {
        let route = Route {
            hold_s: f32::NAN,
            ..Route::square(1.0, 0.5)
        };
        assert!(matches!(route.validate(), Err(RouteError::InvalidHold { .. })));
    }

    #[test]
    fn square_is_ordered_and_ends_stopped() {
        let route = Route::square(2.0, 0.6);
        assert!(route.validate().is_ok());
        assert_eq!(route.steps.len(), 9);
        match &route.steps[8].action {
            RouteAction::Command(spec) => assert!(spec.handbrake),
            other => panic!("unexpected action {:?}", other),
        }
        assert!((route.duration_s() - (4.0 * 2.6 + DEFAULT_HOLD_S)).abs() < 1e-4);
    }

    #[test]
    fn round_trips_through_json() {
        let route = Route::square(1.0, 0.5);
        let text = serde_json::to_string(&route).unwrap();
        assert_eq!(Route::from_json_str(&text).unwrap(), route);
    }
}
