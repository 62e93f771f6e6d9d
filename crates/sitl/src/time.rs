//! Host clocks implementing [`TimeSource`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use skidsteer_core::traits::TimeSource;

/// Wall-clock monotonic time, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct StdTime {
    origin: Instant,
}

impl StdTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for StdTime {
    fn now_us(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Simulation clock shared between a tick loop and the bridge it drives.
///
/// Clones observe the same time; the loop moves it forward with [`SimClock::set`].
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now_us: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the simulation time. Earlier values are ignored to stay monotonic.
    pub fn set(&self, us: u64) {
        if us > self.now_us.get() {
            self.now_us.set(us);
        }
    }
}

impl TimeSource for SimClock {
    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}
