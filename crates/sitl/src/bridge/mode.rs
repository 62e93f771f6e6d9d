//! Bridge lifecycle state.

use core::fmt;

/// Lifecycle of a control bridge.
///
/// `Idle` until a non-neutral command arrives, `Active` afterwards, and back
/// to `Idle` on reset. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgeMode {
    #[default]
    Idle,
    Active,
}

impl fmt::Display for BridgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeMode::Idle => write!(f, "idle"),
            BridgeMode::Active => write!(f, "active"),
        }
    }
}
