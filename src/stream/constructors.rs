//! Stream constructors: empty, of, range, from_generator, from_stream, concat
use futures_core::Stream as FuturesStream;
use futures_util::{pin_mut, StreamExt};
use std::future::Future;
use tokio::sync::mpsc;

use super::Stream;
use crate::error::StreamResult;
use crate::pipe::Pipe;
use crate::queue::Queue;
use crate::worker::spawn_guarded;

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Create a stream over a fresh, already-closed queue
    pub fn empty() -> Self {
        let (queue, receiver) = Queue::rendezvous();
        queue.close();
        Stream::with_capacity(receiver, 0)
    }

    /// Create a stream pre-loaded with `items`, already closed
    pub fn of<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Stream::empty();
        }

        let capacity = items.len();
        let (queue, receiver) = Queue::bounded(capacity);
        for item in items {
            // Cannot fail: the queue has exactly one slot per item and the
            // receiver is still held here.
            let _ = queue.try_enqueue(item);
        }
        queue.close();
        Stream::with_capacity(receiver, capacity)
    }

    /// Wrap a receiver fed by an external producer
    pub fn range(source: mpsc::Receiver<T>) -> Self {
        let capacity = source.max_capacity();
        Stream::with_capacity(source, capacity)
    }

    /// Run `generate` on its own task and stream whatever it emits.
    ///
    /// The queue is closed once `generate` returns, and also if it panics.
    pub fn from_generator<F, Fut>(generate: F) -> Self
    where
        F: FnOnce(Pipe<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (queue, receiver) = Queue::rendezvous();
        spawn_guarded(async move {
            let _close = queue.close_on_drop();
            generate(Pipe::new(queue.clone())).await;
        });
        Stream::with_capacity(receiver, 1)
    }

    /// Pump any futures `Stream` into a queue-backed stream
    pub fn from_stream<S>(source: S) -> Self
    where
        S: FuturesStream<Item = T> + Send + 'static,
    {
        Stream::from_generator(move |pipe| async move {
            pin_mut!(source);
            while let Some(item) = source.next().await {
                if pipe.emit(item).await.is_err() {
                    break;
                }
            }
        })
    }
}

/// Merge `a` with every stream in `others`, see [`Stream::concat`]
pub fn concat<T>(a: Stream<T>, others: Vec<Stream<T>>) -> StreamResult<Stream<T>>
where
    T: Send + 'static,
{
    a.concat(others)
}
