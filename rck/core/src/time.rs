//! Tick-based time types
//!
//! The kernel's clock is the scheduler's millisecond tick counter. It
//! wraps; all `Instant` arithmetic is wrapping by construction.

use core::fmt;
use crate::{KernelError, KernelResult};

/// A point in time, in milliseconds since scheduler start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant(u32);

impl Instant {
    /// Scheduler start
    pub const ZERO: Instant = Instant(0);

    /// Create an instant from a raw tick count
    pub const fn from_millis(millis: u32) -> Self {
        Instant(millis)
    }

    /// Raw tick count
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// The instant one `duration` later, wrapping at the counter width
    pub const fn wrapping_add(self, duration: Duration) -> Instant {
        Instant(self.0.wrapping_add(duration.as_millis()))
    }

    /// Ticks elapsed since `earlier`, assuming at most one wrap
    pub const fn elapsed_since(self, earlier: Instant) -> Duration {
        Duration::from_millis(self.0.wrapping_sub(earlier.0))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Instant {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "t+{}ms", self.0);
    }
}

/// A span of time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(u32);

impl Duration {
    /// Zero-length span
    pub const ZERO: Duration = Duration(0);

    /// Create a duration from milliseconds
    pub const fn from_millis(millis: u32) -> Self {
        Duration(millis)
    }

    /// Create a duration from whole seconds
    pub const fn from_secs(secs: u32) -> Self {
        Duration(secs * 1000)
    }

    /// Length in milliseconds
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Checked addition of two spans
    pub fn checked_add(self, other: Duration) -> KernelResult<Duration> {
        self.0
            .checked_add(other.0)
            .map(Duration)
            .ok_or(KernelError::TimeOverflow)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Duration {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}ms", self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_arithmetic_wraps() {
        let near_wrap = Instant::from_millis(u32::MAX - 1);
        let later = near_wrap.wrapping_add(Duration::from_millis(4));
        assert_eq!(later.as_millis(), 2);
        assert_eq!(later.elapsed_since(near_wrap), Duration::from_millis(4));
    }

    #[test]
    fn duration_checked_add_overflows() {
        let max = Duration::from_millis(u32::MAX);
        assert_eq!(
            max.checked_add(Duration::from_millis(1)),
            Err(KernelError::TimeOverflow)
        );
        assert_eq!(
            Duration::from_secs(2).checked_add(Duration::ZERO),
            Ok(Duration::from_millis(2000))
        );
    }
}
