//! Control-side value types: driver intent in, track commands out.

pub mod command;
pub mod output;

pub use command::ControlCommand;
pub use output::DriveOutput;
