//! Message playback with state management and timing control.
//!
//! Provides [`MessagePlayer`] which drives an encoded [`Playlist`] against a
//! display, handling session state, deadline bookkeeping, looping wraparound
//! and flash decay. Also defines the [`IndicatorStrip`] trait for display
//! abstraction.
//!
//! The player is polled rather than callback-driven: every operation returns
//! a [`ServiceTiming`] telling the caller when to call
//! [`service`](MessagePlayer::service) next, and `service` catches up on
//! every deadline that has elapsed since the session started. Because all
//! pending work lives in the player's own bookkeeping, [`stop`](MessagePlayer::stop)
//! cancels the whole session synchronously - a superseded session can never
//! touch the strip again.

use crate::command::PlayerAction;
use crate::encode::Playlist;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{ActivationEvent, ActivationKind, EncodeError, PlaybackMode, Signal};
use crate::{FLASH_HOLD_MILLIS, LETTER_SLOT_MILLIS, LOOP_TICK_MILLIS};

/// Trait for abstracting the indicator strip display.
///
/// Implement this for whatever renders the 26 lamp positions (GPIO, shift
/// registers, addressable LEDs, a UI widget). The player is the only caller;
/// handle any hardware errors internally - these methods cannot fail.
pub trait IndicatorStrip {
    /// Illuminates a single lamp position.
    fn activate(&mut self, position: u8, kind: ActivationKind);

    /// Illuminates every position at once as an alert flash.
    fn flash_all(&mut self);

    /// Extinguishes every position, flash state included.
    fn reset_all(&mut self);
}

/// The current state of a message player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerState {
    /// No session active. Also reached when a one-shot session completes.
    Idle,
    /// A session is dispatching events.
    Running,
    /// A session was cancelled; its playlist is retained until `reset`.
    Stopped,
}

/// Timing information returned by player operations.
///
/// Indicates when the player needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Something is pending. Sleep for this duration, then call
    /// [`MessagePlayer::service`] again.
    Delay(D),

    /// Nothing is pending. No further servicing is needed until the next
    /// `play`.
    Complete,
}

/// What the next pending deadline does when it fires. Tie order at equal
/// deadlines is wraparound reset, then event, then flash revert.
#[derive(Clone, Copy)]
enum Deadline {
    CycleReset,
    Event,
    FlashRevert,
}

/// Drives playback of encoded messages against an indicator strip.
///
/// The player owns the display and executes at most one session at a time:
/// starting a new message cancels the previous session completely before the
/// first event of the new one can fire. All activations derive from the
/// session's start instant, so a lagging caller catches up deterministically
/// instead of drifting.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Display implementation type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of events in playlists
pub struct MessagePlayer<'t, I: TimeInstant, S: IndicatorStrip, T: TimeSource<I>, const N: usize> {
    strip: S,
    time_source: &'t T,
    state: PlayerState,
    mode: PlaybackMode,
    playlist: Option<Playlist<I::Duration, N>>,
    start_time: Option<I>,
    /// Next event to fire, and the loop pass it belongs to.
    cursor: usize,
    cycle: u64,
    /// Loop pass whose wraparound reset fires next (first reset precedes
    /// pass 1).
    reset_cycle: u64,
    /// Earliest flash whose revert has not fired yet, and its loop pass.
    flash_cursor: usize,
    flash_cycle: u64,
}

impl<'t, I: TimeInstant, S: IndicatorStrip, T: TimeSource<I>, const N: usize>
    MessagePlayer<'t, I, S, T, N>
{
    /// Creates a new idle player with the strip turned off.
    pub fn new(mut strip: S, time_source: &'t T) -> Self {
        strip.reset_all();

        Self {
            strip,
            time_source,
            state: PlayerState::Idle,
            mode: PlaybackMode::OneShot,
            playlist: None,
            start_time: None,
            cursor: 0,
            cycle: 0,
            reset_cycle: 1,
            flash_cursor: 0,
            flash_cycle: 0,
        }
    }

    /// Handles a player action by dispatching to the appropriate method.
    ///
    /// This is a convenience method for command-based control, allowing
    /// actions to be dispatched without matching on the action type manually.
    pub fn handle_action<const M: usize>(
        &mut self,
        action: PlayerAction<M>,
    ) -> Result<ServiceTiming<I::Duration>, EncodeError> {
        match action {
            PlayerAction::Play(message, mode) => self.play(&message, mode),
            PlayerAction::Toggle(message) => self.toggle(&message),
            PlayerAction::Stop => {
                self.stop();
                Ok(ServiceTiming::Complete)
            }
            PlayerAction::Reset => {
                self.reset();
                Ok(ServiceTiming::Complete)
            }
        }
    }

    /// Starts playing a message, cancelling any session in progress.
    ///
    /// The message is encoded first; a capacity error leaves the current
    /// session untouched. Otherwise the previous session is cancelled, the
    /// strip is reset, and dispatching begins from a fresh start instant.
    ///
    /// Blank input is played as-is and completes immediately - substituting
    /// a demo message (e.g. [`DEMO_MESSAGE`](crate::DEMO_MESSAGE)) is the
    /// caller's job.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The message needs more than `N` events
    pub fn play(
        &mut self,
        message: &str,
        mode: PlaybackMode,
    ) -> Result<ServiceTiming<I::Duration>, EncodeError> {
        let slot = match mode {
            PlaybackMode::OneShot => LETTER_SLOT_MILLIS,
            PlaybackMode::Looping => LOOP_TICK_MILLIS,
        };
        let playlist = Playlist::encode_with_slot(message, slot)?;

        self.stop();
        self.mode = mode;

        if playlist.is_empty() {
            self.playlist = Some(playlist);
            self.state = PlayerState::Idle;
            return Ok(ServiceTiming::Complete);
        }

        self.playlist = Some(playlist);
        self.start_time = Some(self.time_source.now());
        self.state = PlayerState::Running;
        Ok(self.service())
    }

    /// Stops the current session and turns the strip off.
    ///
    /// Cancels every pending activation synchronously and transitions to
    /// `Stopped`; the playlist stays loaded until [`reset`](Self::reset).
    /// Idempotent - calling with no session active leaves the player `Idle`
    /// and the strip off.
    pub fn stop(&mut self) {
        self.start_time = None;
        self.cursor = 0;
        self.cycle = 0;
        self.reset_cycle = 1;
        self.flash_cursor = 0;
        self.flash_cycle = 0;

        if self.playlist.is_some() {
            self.state = PlayerState::Stopped;
        }

        self.strip.reset_all();
    }

    /// Stops playback and drops the retained playlist, returning the player
    /// to a neutral `Idle` state.
    pub fn reset(&mut self) {
        self.stop();
        self.playlist = None;
        self.state = PlayerState::Idle;
    }

    /// Play/stop toggle for looping playback, shaped for a single demo
    /// button. Stops if a session is running, otherwise starts the message
    /// looping.
    pub fn toggle(&mut self, message: &str) -> Result<ServiceTiming<I::Duration>, EncodeError> {
        if self.state == PlayerState::Running {
            self.stop();
            Ok(ServiceTiming::Complete)
        } else {
            self.play(message, PlaybackMode::Looping)
        }
    }

    /// Services the player, firing every deadline that has elapsed.
    ///
    /// Total over player state: servicing an idle or stopped player is a
    /// no-op returning `Complete`. While a session is live this fires due
    /// events in offset order, interleaved with looping wraparound resets
    /// and flash reverts at their own deadlines.
    ///
    /// # Returns
    /// - `ServiceTiming::Delay(d)` - Call again after `d`
    /// - `ServiceTiming::Complete` - Session finished (one-shot) or nothing
    ///   is pending
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        let Some(start) = self.start_time else {
            return ServiceTiming::Complete;
        };
        let now = self.time_source.now();
        let elapsed = now.duration_since(start).as_millis();

        loop {
            let Some(playlist) = self.playlist.as_ref() else {
                return ServiceTiming::Complete;
            };
            let events = playlist.events();
            let cycle_millis = playlist.cycle_millis();
            let looping = self.mode == PlaybackMode::Looping;
            let running = self.state == PlayerState::Running;

            // Wraparound is pure bookkeeping; the next cycle's deadlines
            // gate actual firing.
            if running && looping && self.cursor >= events.len() {
                self.cursor = 0;
                self.cycle += 1;
                continue;
            }

            let next_event = (running && self.cursor < events.len()).then(|| {
                event_due(&events[self.cursor], self.cycle, cycle_millis, looping)
            });
            let next_reset = (running && looping)
                .then(|| LOOP_TICK_MILLIS + self.reset_cycle * cycle_millis);
            // Flash reverts keep firing after a one-shot session completes.
            let next_revert = next_flash_revert(
                events,
                self.flash_cursor,
                self.flash_cycle,
                cycle_millis,
                looping,
            );

            let mut due = u64::MAX;
            let mut fire = None;
            let candidates = [
                (next_reset, Deadline::CycleReset),
                (next_event, Deadline::Event),
                (next_revert.map(|(d, _, _)| d), Deadline::FlashRevert),
            ];
            for (deadline, kind) in candidates {
                if let Some(d) = deadline {
                    if d < due {
                        due = d;
                        fire = Some(kind);
                    }
                }
            }

            let Some(fire) = fire else {
                // One-shot sessions land here once events and reverts are
                // exhausted; looping sessions always have a next deadline.
                if self.state == PlayerState::Running {
                    self.state = PlayerState::Idle;
                }
                return ServiceTiming::Complete;
            };

            if due > elapsed {
                return ServiceTiming::Delay(
                    I::Duration::from_millis(due)
                        .saturating_sub(I::Duration::from_millis(elapsed)),
                );
            }

            match fire {
                Deadline::CycleReset => {
                    self.strip.reset_all();
                    self.reset_cycle += 1;
                }
                Deadline::Event => {
                    match events[self.cursor].signal {
                        Signal::Letter(position) => {
                            self.strip.activate(position, ActivationKind::Letter);
                        }
                        Signal::Ramp(position) => {
                            self.strip.activate(position, ActivationKind::Ramp);
                        }
                        Signal::FlashAll => self.strip.flash_all(),
                    }
                    self.cursor += 1;
                    // One-shot sessions are nominally complete at the last
                    // event; a pending flash revert may still outlive this.
                    if !looping && self.cursor >= events.len() {
                        self.state = PlayerState::Idle;
                    }
                }
                Deadline::FlashRevert => {
                    self.strip.reset_all();
                    let (_, index, cycle) = next_revert.unwrap();
                    self.flash_cursor = index + 1;
                    self.flash_cycle = cycle;
                }
            }
        }
    }

    /// Returns the current state of the player.
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Returns the playback mode of the current or most recent session.
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Returns true if a session is currently dispatching events.
    pub fn is_running(&self) -> bool {
        self.state == PlayerState::Running
    }

    /// Returns a reference to the currently loaded playlist, if any
    pub fn current_playlist(&self) -> Option<&Playlist<I::Duration, N>> {
        self.playlist.as_ref()
    }

    /// Returns the elapsed time since the session started, if one is live
    pub fn elapsed_time(&self) -> Option<I::Duration> {
        self.start_time.map(|start| {
            let now = self.time_source.now();
            now.duration_since(start)
        })
    }

    /// Returns a reference to the owned display.
    pub fn strip(&self) -> &S {
        &self.strip
    }
}

/// Absolute deadline (millis since session start) at which an event fires.
///
/// One-shot sessions fire at the encoded offsets directly. Looping sessions
/// shift everything by one tick (the looping cadence has no leading edge;
/// its first tick lands one full period after start) plus the elapsed loop
/// passes.
fn event_due<D: TimeDuration>(
    event: &ActivationEvent<D>,
    cycle: u64,
    cycle_millis: u64,
    looping: bool,
) -> u64 {
    if looping {
        LOOP_TICK_MILLIS + cycle * cycle_millis + event.offset.as_millis()
    } else {
        event.offset.as_millis()
    }
}

/// Finds the next flash revert deadline: the earliest `FlashAll` at or after
/// `cursor` in loop pass `cycle`, reverting `FLASH_HOLD_MILLIS` after it
/// fires. Returns `(due, event index, loop pass)`.
///
/// A revert deadline always trails its flash's fire deadline, so arming it
/// before the flash has fired is harmless - the flash fires first.
fn next_flash_revert<D: TimeDuration>(
    events: &[ActivationEvent<D>],
    cursor: usize,
    cycle: u64,
    cycle_millis: u64,
    looping: bool,
) -> Option<(u64, usize, u64)> {
    let is_flash = |e: &ActivationEvent<D>| matches!(e.signal, Signal::FlashAll);

    if let Some(i) = events[cursor..].iter().position(is_flash) {
        let index = cursor + i;
        let due = event_due(&events[index], cycle, cycle_millis, looping) + FLASH_HOLD_MILLIS;
        return Some((due, index, cycle));
    }

    if looping {
        if let Some(index) = events.iter().position(is_flash) {
            let due =
                event_due(&events[index], cycle + 1, cycle_millis, looping) + FLASH_HOLD_MILLIS;
            return Some((due, index, cycle + 1));
        }
    }

    None
}
