//! Time abstraction traits for timestamping commands and state snapshots.
//!
//! The bridge never integrates time itself; it only stamps values with a
//! monotonic reading. Abstracting the clock keeps host tests deterministic.

use core::sync::atomic::{AtomicU64, Ordering};

/// Monotonic time source used to stamp commands and vehicle snapshots.
///
/// Implementations:
/// - `StdTime` (in the sitl crate) backed by `std::time::Instant`
/// - `MockTime` for host testing with controllable time
///
/// # Example
///
/// ```
/// use skidsteer_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance(16_000);
/// assert_eq!(time.now_us(), 16_000);
/// assert_eq!(time.elapsed_since(6_000), 10_000);
/// ```
pub trait TimeSource {
    /// Returns current time in microseconds since the source was created.
    fn now_us(&self) -> u64;

    /// Returns current time in milliseconds since the source was created.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference in the future yields 0.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Mock time source with explicit advancement.
///
/// Interior mutability lets a test hold a shared reference in the bridge
/// while still moving the clock forward between calls.
#[derive(Debug, Default)]
pub struct MockTime {
    current_us: AtomicU64,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: AtomicU64::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: AtomicU64::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.store(us, Ordering::Relaxed);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.fetch_add(us, Ordering::Relaxed);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_initial_value() {
        let time = MockTime::new();
        assert_eq!(time.now_us(), 0);
        assert_eq!(time.now_ms(), 0);
    }

    #[test]
    fn mock_time_with_initial() {
        let time = MockTime::with_initial(5_000_000);
        assert_eq!(time.now_us(), 5_000_000);
        assert_eq!(time.now_ms(), 5000);
    }

    #[test]
    fn mock_time_set_and_advance() {
        let time = MockTime::new();
        time.set(1_000_000);
        time.advance(16_000);
        assert_eq!(time.now_us(), 1_016_000);
        assert_eq!(time.now_ms(), 1016);
    }

    #[test]
    fn mock_time_elapsed_since_saturates() {
        let time = MockTime::new();
        time.set(1_000);
        assert_eq!(time.elapsed_since(400), 600);
        assert_eq!(time.elapsed_since(5_000), 0);
    }

    #[test]
    fn reference_forwards_to_source() {
        let time = MockTime::with_initial(42);
        let by_ref = &time;
        assert_eq!(by_ref.now_us(), 42);
        time.advance(8);
        assert_eq!(by_ref.now_us(), 50);
    }
}
