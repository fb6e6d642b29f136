//! Closable bounded queue backing every stream
//!
//! A [`Queue`] is the producer half: it enqueues and decides when the queue is
//! closed. The consumer half is a plain tokio `mpsc::Receiver`, wrapped into a
//! [`Stream`](crate::stream::Stream). Closing drops the shared sender, so the
//! reader sees end-of-stream as soon as any write already in flight lands.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Error types for Queue operations
#[derive(Debug, Clone, PartialEq)]
pub enum QueueError {
    /// Queue has been closed by its producer
    QueueClosed,
    /// Queue is full (only reported by `try_enqueue`)
    QueueFull,
    /// The reader dropped its end of the queue
    ChannelDisconnected,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::QueueClosed => write!(f, "Queue is closed"),
            QueueError::QueueFull => write!(f, "Queue is full"),
            QueueError::ChannelDisconnected => write!(f, "Queue channel disconnected"),
        }
    }
}

impl std::error::Error for QueueError {}

/// Shared producer-side state
struct QueueState<T> {
    sender: Mutex<Option<mpsc::Sender<T>>>,
    capacity: usize,
    closed: AtomicBool,
    enqueued: AtomicUsize,
}

/// Producer handle of a closable queue.
///
/// Clones share the same queue; closing through any clone closes it for all
/// of them. Dropping the last clone closes it as well.
pub struct Queue<T> {
    state: Arc<QueueState<T>>,
}

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Queue<T>
where
    T: Send + 'static,
{
    /// Create a queue buffering up to `capacity` items.
    ///
    /// tokio channels need at least one slot, so a capacity of 0 becomes a
    /// one-slot handoff.
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<T>) {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::channel(capacity);
        let queue = Self {
            state: Arc::new(QueueState {
                sender: Mutex::new(Some(sender)),
                capacity,
                closed: AtomicBool::new(false),
                enqueued: AtomicUsize::new(0),
            }),
        };
        (queue, receiver)
    }

    /// Create a one-slot handoff queue, the closest thing to an unbuffered channel
    pub fn rendezvous() -> (Self, mpsc::Receiver<T>) {
        Self::bounded(1)
    }

    fn sender(&self) -> Result<mpsc::Sender<T>, QueueError> {
        let guard = self
            .state
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().cloned().ok_or(QueueError::QueueClosed)
    }

    /// Enqueue an item, waiting while the queue is full
    pub async fn enqueue(&self, item: T) -> Result<(), QueueError> {
        let sender = self.sender()?;
        match sender.send(item).await {
            Ok(()) => {
                self.state.enqueued.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(_) => Err(QueueError::ChannelDisconnected),
        }
    }

    /// Try to enqueue an item without waiting
    pub fn try_enqueue(&self, item: T) -> Result<(), QueueError> {
        let sender = self.sender()?;
        match sender.try_send(item) {
            Ok(()) => {
                self.state.enqueued.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(QueueError::QueueFull),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(QueueError::ChannelDisconnected),
        }
    }

    /// Close the queue. Returns `true` only for the call that actually closed it.
    ///
    /// Items already enqueued stay readable.
    pub fn close(&self) -> bool {
        let sender = self
            .state
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.state.closed.store(true, Ordering::Release);
        sender.is_some()
    }

    /// Return a guard that closes the queue when dropped, including during unwinding
    pub fn close_on_drop(&self) -> CloseGuard<T> {
        CloseGuard {
            queue: self.clone(),
        }
    }

    /// Check if the queue is closed
    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }

    /// Check whether the reader has gone away
    pub fn is_disconnected(&self) -> bool {
        match self.sender() {
            Ok(sender) => sender.is_closed(),
            Err(_) => false,
        }
    }

    /// Get the capacity of the queue
    pub fn capacity(&self) -> usize {
        self.state.capacity
    }

    /// Get queue statistics for monitoring
    pub fn stats(&self) -> QueueStats {
        let available = self
            .sender()
            .map(|sender| sender.capacity())
            .unwrap_or(self.state.capacity);
        let length = self.state.capacity.saturating_sub(available);

        QueueStats {
            length,
            capacity: self.state.capacity,
            utilization: length as f64 / self.state.capacity as f64,
            enqueued: self.state.enqueued.load(Ordering::Relaxed),
            is_closed: self.is_closed(),
        }
    }
}

/// Scoped close of a [`Queue`], see [`Queue::close_on_drop`]
pub struct CloseGuard<T>
where
    T: Send + 'static,
{
    queue: Queue<T>,
}

impl<T> Drop for CloseGuard<T>
where
    T: Send + 'static,
{
    fn drop(&mut self) {
        if self.queue.close() {
            log::debug!("queue closed after {} items", self.queue.stats().enqueued);
        }
    }
}

/// Queue statistics for monitoring and debugging
#[derive(Debug, Clone)]
pub struct QueueStats {
    pub length: usize,
    pub capacity: usize,
    pub utilization: f64, // 0.0 to 1.0
    pub enqueued: usize,
    pub is_closed: bool,
}

impl fmt::Display for QueueStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Queue({}/{}, {:.1}%{})",
            self.length,
            self.capacity,
            self.utilization * 100.0,
            if self.is_closed { ", closed" } else { "" }
        )
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("capacity", &self.state.capacity)
            .field("enqueued", &self.state.enqueued.load(Ordering::Relaxed))
            .field("is_closed", &self.state.closed.load(Ordering::Acquire))
            .finish()
    }
}
