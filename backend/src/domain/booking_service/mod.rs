//! Booking orchestrator implementing the driving ports.
//!
//! Reads load the document without taking the write lock. Every mutation
//! runs as one load-modify-save cycle inside the shared [`WriteSerializer`],
//! so the conflict check and the insert it guards are atomic with respect
//! to every other writer in the process.

mod reservations;
mod resources;
mod settings;

use std::sync::Arc;

use mockable::Clock;
use tracing::error;

use crate::domain::ports::{BookingStore, BookingStoreError};
use crate::domain::{
    BookingError, BookingPolicy, BookingSnapshot, SerializerError, WriteSerializer,
};

/// Result of a mutation closure: the value to return and whether the
/// snapshot changed and must be saved.
pub(crate) enum Write<T> {
    Persist(T),
    Skip(T),
}

/// Scheduling core wired to a booking store.
pub struct BookingService<S> {
    store: Arc<S>,
    serializer: Arc<WriteSerializer>,
    clock: Arc<dyn Clock>,
    policy: BookingPolicy,
}

impl<S> BookingService<S>
where
    S: BookingStore + 'static,
{
    /// Create a service with its own write serializer.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, policy: BookingPolicy) -> Self {
        Self::with_serializer(store, clock, policy, Arc::new(WriteSerializer::new()))
    }

    /// Create a service sharing an existing serializer. All services writing
    /// the same store must share one.
    pub fn with_serializer(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        policy: BookingPolicy,
        serializer: Arc<WriteSerializer>,
    ) -> Self {
        Self {
            store,
            serializer,
            clock,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Stop accepting writes and wait for the one in flight.
    pub async fn shutdown(&self) {
        self.serializer.shutdown().await;
    }

    async fn load(&self) -> Result<BookingSnapshot, BookingError> {
        self.store.load().await.map_err(map_store_error)
    }

    /// Run `op` against a freshly loaded snapshot inside the critical
    /// section, saving the snapshot when `op` asks for it.
    async fn mutate<F, T>(&self, op: F) -> Result<T, BookingError>
    where
        F: FnOnce(&mut BookingSnapshot) -> Result<Write<T>, BookingError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let section = async move {
            let mut snapshot = store.load().await.map_err(map_store_error)?;
            match op(&mut snapshot)? {
                Write::Persist(value) => {
                    store.save(&snapshot).await.map_err(map_store_error)?;
                    Ok(value)
                }
                Write::Skip(value) => Ok(value),
            }
        };
        self.serializer
            .run_exclusive(section)
            .await
            .map_err(map_serializer_error)?
    }
}

fn map_store_error(err: BookingStoreError) -> BookingError {
    error!(error = %err, "booking store failure");
    BookingError::StorageUnavailable {
        message: err.to_string(),
    }
}

fn map_serializer_error(err: SerializerError) -> BookingError {
    match err {
        SerializerError::Closed => BookingError::StorageUnavailable {
            message: err.to_string(),
        },
        SerializerError::Aborted { message } => BookingError::Interrupted { message },
    }
}
