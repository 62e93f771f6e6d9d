//! Driver intent as issued by the control-command source.

/// Most recently requested driver intent.
///
/// Value type: a new command supersedes the previous one as a whole and is
/// never edited in place after being handed to the bridge.
///
/// Axis conventions:
/// - `throttle`: -1.0 full reverse, +1.0 full forward
/// - `steering`: -1.0 full left, +1.0 full right
/// - `brake`: 0.0 released, 1.0 full brake
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlCommand {
    pub throttle: f32,
    pub steering: f32,
    pub brake: f32,
    pub handbrake: bool,
    /// Manual gear selection; when false the gearbox is automatic.
    pub manual_gear_engaged: bool,
    pub target_gear: i32,
    /// Shift without waiting for the gearbox's own shift delay.
    pub gear_immediate: bool,
    /// Monotonic instant the command was issued (microseconds).
    ///
    /// 0 means unstamped: the bridge replaces it with its own clock reading
    /// on receipt. Sources whose clock can read 0 should start it at 1.
    pub timestamp_us: u64,
}

impl ControlCommand {
    /// Zero throttle and steering, brakes released, automatic gear 0.
    pub const fn neutral() -> Self {
        Self {
            throttle: 0.0,
            steering: 0.0,
            brake: 0.0,
            handbrake: false,
            manual_gear_engaged: false,
            target_gear: 0,
            gear_immediate: false,
            timestamp_us: 0,
        }
    }

    /// Throttle and steering only, everything else neutral.
    pub const fn drive(throttle: f32, steering: f32) -> Self {
        Self {
            throttle,
            steering,
            ..Self::neutral()
        }
    }

    pub const fn with_brake(mut self, brake: f32) -> Self {
        self.brake = brake;
        self
    }

    pub const fn with_handbrake(mut self, engaged: bool) -> Self {
        self.handbrake = engaged;
        self
    }

    /// Engage manual gear selection with the given target gear.
    pub const fn with_manual_gear(mut self, gear: i32, immediate: bool) -> Self {
        self.manual_gear_engaged = true;
        self.target_gear = gear;
        self.gear_immediate = immediate;
        self
    }

    /// Stamp the command. Passing 0 leaves it unstamped.
    pub const fn at(mut self, timestamp_us: u64) -> Self {
        self.timestamp_us = timestamp_us;
        self
    }

    pub const fn is_stamped(&self) -> bool {
        self.timestamp_us != 0
    }

    /// Clamp every axis into its declared range.
    ///
    /// NaN axes collapse to 0.0; infinities saturate at the range limits.
    pub fn clamped(self) -> Self {
        Self {
            throttle: sanitize_axis(self.throttle, -1.0, 1.0),
            steering: sanitize_axis(self.steering, -1.0, 1.0),
            brake: sanitize_axis(self.brake, 0.0, 1.0),
            ..self
        }
    }

    /// True when the command carries no driving intent.
    ///
    /// The timestamp and `gear_immediate` flag are ignored.
    pub fn is_neutral(&self) -> bool {
        self.throttle == 0.0
            && self.steering == 0.0
            && self.brake == 0.0
            && !self.handbrake
            && !self.manual_gear_engaged
            && self.target_gear == 0
    }

    /// Gear the command actually requests.
    ///
    /// An automatic gearbox cannot hold a negative gear, so it is raised to 0.
    pub fn effective_gear(&self) -> i32 {
        if self.manual_gear_engaged {
            self.target_gear
        } else {
            self.target_gear.max(0)
        }
    }

    /// Compare driving intent, ignoring when each command was issued.
    pub fn same_intent(&self, other: &Self) -> bool {
        Self {
            timestamp_us: 0,
            ..*self
        } == Self {
            timestamp_us: 0,
            ..*other
        }
    }
}

impl Default for ControlCommand {
    fn default() -> Self {
        Self::neutral()
    }
}

#[inline]
fn sanitize_axis(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}
