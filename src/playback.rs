//! Playback state, and the notifications a speech engine sends while it plays.
//!
//! The engine drives playback; this crate only observes it. State changes and progress reports are
//! posted into an unbounded channel from whatever thread the engine uses, and the owner of the
//! receiving end handles them one at a time.

use strum_macros::{EnumString, IntoStaticStr};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::tracker::Anchor;

/// The state of a speech synthesizer.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Default, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum SynthesizerState {
    /// Not speaking; ready to accept new speech.
    #[default]
    Ready,
    /// Rendering speech.
    Speaking,
    /// Speech was paused and can be resumed.
    Paused,
}

impl SynthesizerState {
    /// Converts the numeric state used by platform speech APIs (0 ready, 1 speaking, 2 paused).
    ///
    /// # Panics
    ///
    /// Panics on any other value. An engine reporting a state outside this set is a programming
    /// error, not a condition a caller can recover from.
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => Self::Ready,
            1 => Self::Speaking,
            2 => Self::Paused,
            _ => panic!("Unrecognized synthesizer state value: {}", value),
        }
    }

    /// The numeric value of this state, as accepted by [`from_raw`](Self::from_raw).
    pub fn raw(&self) -> i32 {
        match self {
            Self::Ready => 0,
            Self::Speaking => 1,
            Self::Paused => 2,
        }
    }

    /// Returns `true` if a synthesizer in this state is expected to move to `next`.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (*self, next),
            (Self::Ready, Self::Speaking)
                | (Self::Speaking, Self::Paused)
                | (Self::Paused, Self::Speaking)
                | (Self::Speaking, Self::Ready)
                | (Self::Paused, Self::Ready)
        )
    }
}

/// Something a speech engine reports while it plays.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Notification {
    /// The engine is about to speak the word identified by the anchor.
    Progress(Anchor),
    /// The engine moved to a new state.
    StateChanged(SynthesizerState),
}

/// The sending half of a notification channel. It can be cloned and moved to any thread.
pub type NotificationSender = UnboundedSender<Notification>;

/// The receiving half of a notification channel.
pub type NotificationReceiver = UnboundedReceiver<Notification>;

/// Creates a channel for notifications.
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    unbounded_channel()
}

/// Tracks the last reported state and flags transitions the state machine does not expect.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct StateObserver {
    state: SynthesizerState,
}

impl StateObserver {
    /// The last observed state.
    pub fn state(&self) -> SynthesizerState {
        self.state
    }

    /// Records a new state and returns the previous one. Unexpected transitions are logged and
    /// accepted, since the engine is the authority on its own state.
    pub fn observe(&mut self, next: SynthesizerState) -> SynthesizerState {
        let previous = std::mem::replace(&mut self.state, next);
        if previous.can_transition_to(next) {
            tracing::debug!(from = ?previous, to = ?next, "synthesizer state changed");
        } else {
            tracing::warn!(from = ?previous, to = ?next, "unexpected synthesizer state transition");
        }
        previous
    }
}
