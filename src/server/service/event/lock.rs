use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Process-wide lock serialising the conflict check and write of event bookings.
///
/// Two bookings for the same participant and window can otherwise both pass the check
/// before either is written. Clones share the same lock.
#[derive(Clone, Default)]
pub struct BookingLock {
    inner: Arc<Mutex<()>>,
}

impl BookingLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access. Released when the guard is dropped.
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
