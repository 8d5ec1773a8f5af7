// Events that flow into the monitor's event loop
//
// Timers, fetch tasks and host actions never touch monitor state directly.
// They send one of these over an mpsc channel and the loop that owns the
// state applies it, one event at a time.

use crate::actions::Notice;
use crate::gas::{FetchError, GasReading};

/// Buffer size for the app event channel
pub const EVENT_BUFFER: usize = 256;

#[derive(Debug)]
pub enum AppEvent {
    /// One-second clock tick (countdown refresh)
    Clock,

    /// The fetch timer fired; the loop should start a fetch
    FetchDue,

    /// A fetch (automatic or manual) completed
    Fetched(Result<GasReading, FetchError>),

    /// A spawned action finished and wants to show a status message
    Notice(Notice),
}
