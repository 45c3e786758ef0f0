//! Fan-out of "statusUpdated" signals to connected real-time clients.

use tokio::sync::broadcast;

/// Messages kept for subscribers that fall behind. Older ones are skipped.
const CHANNEL_CAPACITY: usize = 64;

/// Signal that event data changed and clients should reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdated;

/// Broadcasts `StatusUpdated` to every subscribed SSE stream.
///
/// Clones share the same channel.
#[derive(Clone)]
pub struct StatusNotifier {
    tx: broadcast::Sender<StatusUpdated>,
}

impl StatusNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Sends the signal to all current subscribers.
    ///
    /// # Returns
    /// - `usize` - Number of subscribers reached, zero when nobody is listening
    pub fn notify(&self) -> usize {
        let reached = self.tx.send(StatusUpdated).unwrap_or(0);
        tracing::debug!(subscribers = reached, "Broadcast statusUpdated");
        reached
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusUpdated> {
        self.tx.subscribe()
    }
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new()
    }
}
