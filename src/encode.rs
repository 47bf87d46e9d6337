//! Message-to-signal encoding.
//!
//! Turns a text message into a [`Playlist`]: an ordered, timed list of
//! activation events. Encoding is deterministic and total over its input -
//! any string yields a well-formed playlist, with characters the strip
//! cannot spell degrading to a whole-strip alert flash.

use crate::time::TimeDuration;
use crate::types::{ActivationEvent, EncodeError, Signal};
use crate::{LETTER_SLOT_MILLIS, RAMP_STEP_MILLIS, STRIP_LEN};
use heapless::Vec;

/// Returns the lamp position for a letter (A→0 … Z→25), or `None` for
/// anything that is not an ASCII letter. Case-insensitive.
#[inline]
pub fn letter_position(ch: char) -> Option<u8> {
    let upper = ch.to_ascii_uppercase();
    upper.is_ascii_uppercase().then(|| upper as u8 - b'A')
}

/// An encoded message: activation events sorted by offset.
///
/// Events are held in non-decreasing offset order. Ties preserve the input
/// character's left-to-right precedence, then ramp-step precedence within a
/// character, so playback order is fully determined by the message alone.
///
/// The playlist also remembers the character count and slot width it was
/// encoded with; looping playback derives its cycle length from these.
///
/// # Type Parameters
/// * `D` - The duration type (e.g., `embassy_time::Duration`)
/// * `N` - Maximum number of events this playlist can hold
#[derive(Debug, Clone)]
pub struct Playlist<D: TimeDuration, const N: usize> {
    events: Vec<ActivationEvent<D>, N>,
    char_count: usize,
    slot_millis: u64,
}

impl<D: TimeDuration, const N: usize> Playlist<D, N> {
    /// Encodes a message with the standard one-shot slot width (300 ms per
    /// character).
    ///
    /// Per-character rules, evaluated left to right with character index `i`
    /// giving a primary offset of `i * 300` ms:
    /// - Letters A-Z (case-insensitive) emit one [`Signal::Letter`] event at
    ///   the primary offset.
    /// - Digits `1`-`9` emit one [`Signal::Ramp`] event per lamp for the
    ///   first `n` lamps, spaced 100 ms apart from the primary offset.
    ///   `0` is inert.
    /// - Spaces emit nothing.
    /// - Every other character emits one [`Signal::FlashAll`] event at the
    ///   primary offset.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The message needs more than `N` events
    ///
    /// # Examples
    /// ```
    /// use core::time::Duration;
    /// use message_strip::{Playlist, Signal};
    ///
    /// let playlist: Playlist<Duration, 16> = Playlist::encode("AZ").unwrap();
    /// assert_eq!(playlist.events()[0].signal, Signal::Letter(0));
    /// assert_eq!(playlist.events()[1].signal, Signal::Letter(25));
    /// assert_eq!(playlist.events()[1].offset, Duration::from_millis(300));
    /// ```
    pub fn encode(message: &str) -> Result<Self, EncodeError> {
        Self::encode_with_slot(message, LETTER_SLOT_MILLIS)
    }

    /// Encodes a message with a caller-chosen character slot width.
    ///
    /// Same per-character rules as [`encode`](Self::encode) with primary
    /// offsets of `i * slot_millis`. Looping playback uses this with its
    /// 800 ms tick so one encoder serves both timing models.
    pub fn encode_with_slot(message: &str, slot_millis: u64) -> Result<Self, EncodeError> {
        let mut events: Vec<ActivationEvent<D>, N> = Vec::new();
        let mut char_count = 0;

        for (index, ch) in message.chars().enumerate() {
            char_count = index + 1;
            let primary = index as u64 * slot_millis;

            if let Some(position) = letter_position(ch) {
                insert_sorted(&mut events, primary, Signal::Letter(position))?;
            } else if let Some(n) = ch.to_digit(10) {
                // Single digits cap at 9; the strip bound still applies.
                if (1..=STRIP_LEN as u32).contains(&n) {
                    for step in 0..n {
                        insert_sorted(
                            &mut events,
                            primary + u64::from(step) * RAMP_STEP_MILLIS,
                            Signal::Ramp(step as u8),
                        )?;
                    }
                }
            } else if ch != ' ' {
                insert_sorted(&mut events, primary, Signal::FlashAll)?;
            }
        }

        Ok(Playlist {
            events,
            char_count,
            slot_millis,
        })
    }

    /// Returns the encoded events in firing order.
    pub fn events(&self) -> &[ActivationEvent<D>] {
        &self.events
    }

    /// Returns the number of encoded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the message produced no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the number of characters in the encoded message, silent
    /// characters included.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Returns the slot width this playlist was encoded with.
    pub fn slot_millis(&self) -> u64 {
        self.slot_millis
    }

    /// Returns the duration of one full pass over the message: one slot per
    /// character, silent characters included.
    pub fn cycle_millis(&self) -> u64 {
        self.char_count as u64 * self.slot_millis
    }
}

/// Inserts an event keeping the list sorted by offset. Equal offsets land
/// after existing entries, preserving character-then-step emission order.
fn insert_sorted<D: TimeDuration, const N: usize>(
    events: &mut Vec<ActivationEvent<D>, N>,
    offset_millis: u64,
    signal: Signal,
) -> Result<(), EncodeError> {
    let index = events.partition_point(|e| e.offset.as_millis() <= offset_millis);
    events
        .insert(index, ActivationEvent::new(D::from_millis(offset_millis), signal))
        .map_err(|_| EncodeError::CapacityExceeded)
}
