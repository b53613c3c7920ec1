//! Process-local booking store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::BookingSnapshot;
use crate::domain::ports::{BookingStore, BookingStoreError};

/// Keeps the document in memory and counts saves.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    snapshot: RwLock<BookingSnapshot>,
    saves: AtomicUsize,
}

impl InMemoryBookingStore {
    pub fn new(initial: BookingSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(initial),
            saves: AtomicUsize::new(0),
        }
    }

    /// Copy of the stored document.
    pub async fn snapshot(&self) -> BookingSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn load(&self) -> Result<BookingSnapshot, BookingStoreError> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, snapshot: &BookingSnapshot) -> Result<(), BookingStoreError> {
        *self.snapshot.write().await = snapshot.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
