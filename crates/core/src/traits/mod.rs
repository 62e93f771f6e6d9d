//! Core traits shared by the bridge and its collaborators.
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - The std-backed clock lives in the sitl crate

pub mod time;

pub use time::{MockTime, TimeSource};
