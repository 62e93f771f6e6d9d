//! Per-tick output handed to the actuation subsystem.

/// Track commands and gear request for one simulation tick.
///
/// Track values are normalized to [-1.0, +1.0]; positive drives the track
/// forward. Produced fresh on every tick and not retained by the bridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveOutput {
    pub left_track: f32,
    pub right_track: f32,
    pub manual_gear_engaged: bool,
    pub target_gear: i32,
    pub gear_immediate: bool,
}

impl DriveOutput {
    /// Both tracks stopped, automatic gear 0.
    pub const fn stopped() -> Self {
        Self {
            left_track: 0.0,
            right_track: 0.0,
            manual_gear_engaged: false,
            target_gear: 0,
            gear_immediate: false,
        }
    }

    /// True when both tracks are commanded to zero.
    pub fn is_stopped(&self) -> bool {
        self.left_track == 0.0 && self.right_track == 0.0
    }
}

impl Default for DriveOutput {
    fn default() -> Self {
        Self::stopped()
    }
}
