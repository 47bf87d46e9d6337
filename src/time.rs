//! Time abstraction traits for platform-agnostic timing.
//!
//! The player never reads a clock directly; it asks a [`TimeSource`] for the
//! current [`TimeInstant`] and does all deadline math in [`TimeDuration`]
//! space. Implementations are provided for `core::time::Duration` (always),
//! `std` clocks (feature `std`) and `embassy-time` (feature `embassy-time`).

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

impl TimeDuration for core::time::Duration {
    const ZERO: Self = core::time::Duration::ZERO;

    fn as_millis(&self) -> u64 {
        core::time::Duration::as_millis(self) as u64
    }

    fn from_millis(millis: u64) -> Self {
        core::time::Duration::from_millis(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        core::time::Duration::saturating_sub(self, other)
    }
}

#[cfg(feature = "std")]
impl TimeInstant for std::time::Instant {
    type Duration = core::time::Duration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        // Saturates to zero if `earlier` is actually later.
        std::time::Instant::saturating_duration_since(self, earlier)
    }
}

/// Time source backed by the standard library's monotonic clock.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

#[cfg(feature = "std")]
impl TimeSource<std::time::Instant> for StdClock {
    fn now(&self) -> std::time::Instant {
        std::time::Instant::now()
    }
}

#[cfg(feature = "embassy-time")]
impl TimeDuration for embassy_time::Duration {
    const ZERO: Self = embassy_time::Duration::from_ticks(0);

    fn as_millis(&self) -> u64 {
        embassy_time::Duration::as_millis(self)
    }

    fn from_millis(millis: u64) -> Self {
        embassy_time::Duration::from_millis(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        self.checked_sub(other).unwrap_or(Self::ZERO)
    }
}

#[cfg(feature = "embassy-time")]
impl TimeInstant for embassy_time::Instant {
    type Duration = embassy_time::Duration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        embassy_time::Instant::duration_since(self, earlier)
    }
}

/// Time source backed by the embassy timer driver.
#[cfg(feature = "embassy-time")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl TimeSource<embassy_time::Instant> for EmbassyClock {
    fn now(&self) -> embassy_time::Instant {
        embassy_time::Instant::now()
    }
}
