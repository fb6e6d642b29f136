//! Queue-backed lazy streams
//!
//! A [`Stream`] is a single-use handle over the read side of a closable queue.
//! Every intermediate operation consumes its receiver, starts one or more
//! producer tasks writing into a fresh queue, and returns a stream over that
//! queue. Terminal operations are `async` and drain the queue on the caller's
//! task.
//!
//! Producer tasks are started with `tokio::spawn`, so building a pipeline
//! needs to happen inside a tokio runtime.

pub mod advanced;
pub mod constructors;
pub mod parallel;
pub mod select;
pub mod utility;

use async_stream::stream;
use futures_util::stream::{BoxStream, StreamExt};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

pub use constructors::concat;
pub use utility::Finisher;

/// Single-consumption handle over an ordered, closable queue of items.
///
/// Cloning yields another handle to the *same* queue: each item is still
/// delivered to exactly one reader.
pub struct Stream<T> {
    source: Arc<Mutex<mpsc::Receiver<T>>>,
    capacity: usize,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            capacity: self.capacity,
        }
    }
}

impl<T> Stream<T>
where
    T: Send + 'static,
{
    pub(crate) fn with_capacity(source: mpsc::Receiver<T>, capacity: usize) -> Self {
        Self {
            source: Arc::new(Mutex::new(source)),
            capacity,
        }
    }

    /// Pull the next item, waiting until one arrives or the queue is closed
    pub async fn next(&self) -> Option<T> {
        self.source.lock().await.recv().await
    }

    /// Whether both handles read from the very same queue
    pub fn is_same(&self, other: &Stream<T>) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }

    /// Buffering capacity of the underlying queue
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items currently buffered; 0 while another reader holds the queue
    pub fn len(&self) -> usize {
        self.source.try_lock().map(|rx| rx.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adapt into a futures `BoxStream` for use with `StreamExt` combinators
    pub fn into_boxed(self) -> BoxStream<'static, T> {
        stream! {
            while let Some(item) = self.next().await {
                yield item;
            }
        }
        .boxed()
    }
}

impl<T> From<mpsc::Receiver<T>> for Stream<T>
where
    T: Send + 'static,
{
    fn from(source: mpsc::Receiver<T>) -> Self {
        Stream::range(source)
    }
}

impl<T> fmt::Display for Stream<T>
where
    T: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stream{{len:{},cap:{}}}", self.len(), self.capacity)
    }
}

impl<T> fmt::Debug for Stream<T>
where
    T: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
