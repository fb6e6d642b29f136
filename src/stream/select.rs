//! Fan-in of several streams into one
use futures::future::join_all;
use std::iter;

use super::Stream;
use crate::error::{StreamError, StreamResult};
use crate::queue::Queue;
use crate::worker::spawn_guarded;

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Merge this stream with `others` into a single stream.
    ///
    /// One drainer task per input forwards items into the shared output; a
    /// coordinator closes the output once every drainer has finished. Items
    /// from different inputs interleave in whatever order they arrive.
    ///
    /// Fails with [`StreamError::InvalidArgument`] if any of `others` is a
    /// handle to this very stream.
    pub fn concat(self, others: Vec<Stream<T>>) -> StreamResult<Stream<T>> {
        if others.iter().any(|other| other.is_same(&self)) {
            return Err(StreamError::invalid_argument(
                "a stream cannot be concatenated with itself",
            ));
        }

        let (queue, receiver) = Queue::rendezvous();
        let inputs = others.len() + 1;

        let drainers: Vec<_> = iter::once(self)
            .chain(others)
            .map(|input| {
                let queue = queue.clone();
                spawn_guarded(async move {
                    while let Some(item) = input.next().await {
                        if queue.enqueue(item).await.is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();

        spawn_guarded(async move {
            let _close = queue.close_on_drop();
            // Drainer handles never resolve to a panic, see `spawn_guarded`.
            join_all(drainers).await;
            log::debug!("concat: {} inputs drained, closing output", inputs);
        });

        Ok(Stream::with_capacity(receiver, 1))
    }
}
