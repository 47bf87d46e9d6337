//! Shared test infrastructure for message-strip integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use message_strip::{
    ActivationKind, IndicatorStrip, STRIP_LEN, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

/// A single call made against the strip, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripCall {
    Activate(u8, ActivationKind),
    FlashAll,
    ResetAll,
}

/// Mock display that tracks lamp state and records every call for ordering
/// assertions.
pub struct MockStrip {
    lit: [Option<ActivationKind>; STRIP_LEN],
    flashing: bool,
    calls: heapless::Vec<StripCall, 128>,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            lit: [None; STRIP_LEN],
            flashing: false,
            calls: heapless::Vec::new(),
        }
    }

    /// Lamp state at a position, `None` when off.
    pub fn lit(&self, position: usize) -> Option<ActivationKind> {
        self.lit[position]
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    pub fn is_all_off(&self) -> bool {
        !self.flashing && self.lit.iter().all(Option::is_none)
    }

    pub fn lit_count(&self) -> usize {
        self.lit.iter().filter(|l| l.is_some()).count()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[StripCall] {
        &self.calls
    }
}

impl IndicatorStrip for MockStrip {
    fn activate(&mut self, position: u8, kind: ActivationKind) {
        if (position as usize) < STRIP_LEN {
            self.lit[position as usize] = Some(kind);
        }
        let _ = self.calls.push(StripCall::Activate(position, kind));
    }

    fn flash_all(&mut self) {
        self.flashing = true;
        let _ = self.calls.push(StripCall::FlashAll);
    }

    fn reset_all(&mut self) {
        self.lit = [None; STRIP_LEN];
        self.flashing = false;
        let _ = self.calls.push(StripCall::ResetAll);
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}
