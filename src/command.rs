//! Command-based control for players.

use crate::types::PlaybackMode;
use heapless::String;

/// Actions for controlling a player.
///
/// Carries owned message text so actions can cross task or queue boundaries
/// without borrowing the producer's buffer. `M` is the maximum message
/// length; [`MESSAGE_MAX_LEN`](crate::MESSAGE_MAX_LEN) matches the upstream
/// input cap.
#[derive(Debug, Clone)]
pub enum PlayerAction<const M: usize> {
    /// Play a message in the given mode.
    Play(String<M>, PlaybackMode),
    /// Stop if running, otherwise loop the message.
    Toggle(String<M>),
    /// Stop playback.
    Stop,
    /// Stop playback and drop the retained playlist.
    Reset,
}
