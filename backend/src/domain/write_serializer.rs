//! Process-wide mutual exclusion for booking document writes.
//!
//! Every read-modify-write of the booking document runs through one
//! [`WriteSerializer`]. Waiters are served in arrival order. A critical
//! section that has started always runs to completion: it is moved onto its
//! own task together with the lock guard, so dropping the caller's future
//! only abandons the wait for the result. Callers still queued may give up
//! freely.
//!
//! The lock never poisons. A task that fails or panics releases it for the
//! next waiter.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::domain::RequestId;

/// Why a critical section did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializerError {
    #[error("write serializer is shut down")]
    Closed,
    #[error("critical section aborted: {message}")]
    Aborted { message: String },
}

/// FIFO gate around booking document writes.
///
/// # Examples
/// ```
/// use booking_backend::domain::WriteSerializer;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let serializer = WriteSerializer::new();
/// let value = serializer.run_exclusive(async { 21 * 2 }).await;
/// assert_eq!(value, Ok(42));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct WriteSerializer {
    gate: Arc<Mutex<()>>,
    closed: AtomicBool,
}

impl WriteSerializer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once every earlier task has finished.
    pub async fn run_exclusive<Fut, T>(&self, task: Fut) -> Result<T, SerializerError>
    where
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if self.closed.load(Ordering::Acquire) {
            return Err(SerializerError::Closed);
        }
        let guard = Arc::clone(&self.gate).lock_owned().await;
        // Shutdown may have started while this caller was queued.
        if self.closed.load(Ordering::Acquire) {
            return Err(SerializerError::Closed);
        }

        let body = async move {
            let output = task.await;
            drop(guard);
            output
        };
        let handle = match RequestId::current() {
            Some(id) => tokio::spawn(RequestId::scope(id, body)),
            None => tokio::spawn(body),
        };
        handle.await.map_err(|join_error| {
            error!(error = %join_error, "booking critical section aborted");
            SerializerError::Aborted {
                message: join_error.to_string(),
            }
        })
    }

    /// Refuse new work and wait for the running critical section, if any.
    pub async fn shutdown(&self) {
        self.closed.store(true, Ordering::Release);
        let _drained = self.gate.lock().await;
        debug!("write serializer drained");
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
