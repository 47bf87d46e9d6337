//! Core types for message encoding and playback.

use crate::time::TimeDuration;

/// What a single scheduled event does to the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// Illuminate the lamp mapped to a letter (A-Z, positions 0-25).
    Letter(u8),

    /// One step of a digit ramp lighting the first `n` lamps in succession.
    Ramp(u8),

    /// Whole-strip alert flash; reverts after [`FLASH_HOLD_MILLIS`](crate::FLASH_HOLD_MILLIS).
    FlashAll,
}

/// Rendering hint passed to [`IndicatorStrip::activate`](crate::IndicatorStrip::activate).
///
/// Displays typically render letter activations and ramp steps differently,
/// e.g. with distinct lamp colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivationKind {
    /// A letter lighting its own lamp.
    Letter,

    /// A step of a digit ramp.
    Ramp,
}

/// A single timed activation within a playlist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationEvent<D: TimeDuration> {
    /// Time since playback start at which this event fires.
    pub offset: D,

    /// What firing this event does.
    pub signal: Signal,
}

impl<D: TimeDuration> ActivationEvent<D> {
    /// Creates a new activation event.
    #[inline]
    pub fn new(offset: D, signal: Signal) -> Self {
        Self { offset, signal }
    }
}

/// How a playlist is played back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackMode {
    /// Play the encoded event list exactly once at its per-character offsets.
    OneShot,

    /// Replay the message indefinitely at a fixed per-character cadence
    /// until explicitly stopped.
    Looping,
}

impl Default for PlaybackMode {
    fn default() -> Self {
        PlaybackMode::OneShot
    }
}

/// Message encoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The message needs more events than the playlist capacity allows.
    CapacityExceeded,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::CapacityExceeded => {
                write!(f, "playlist capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}
