//! Bounded-parallelism stages: walk and the combinators built on it
//!
//! `walk` runs a user callback for every input item on its own worker task.
//! A semaphore caps the number of live workers at the configured pool size.
//! The driver acquires a slot *before* pulling the next item, so at most
//! `work_size` items are ever taken off the input ahead of their workers.
//!
//! Output order across items is unspecified once more than one worker can run;
//! each item's own emissions keep the order in which its callback emitted them.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::Stream;
use crate::pipe::Pipe;
use crate::queue::Queue;
use crate::stream_configuration::Options;
use crate::worker::spawn_guarded;

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Apply `f` to every item on a bounded pool of concurrent workers.
    ///
    /// `f` receives the item by value plus a [`Pipe`] to emit zero, one or
    /// many results. A panic inside `f` counts as "no output for this item";
    /// the stage keeps going. The output closes only after every started
    /// worker has finished.
    ///
    /// # Examples
    /// ```
    /// use chanflow::{Options, Stream};
    ///
    /// # async fn example() {
    /// let doubled = Stream::of(vec![1, 2, 3])
    ///     .walk(
    ///         |x, pipe| async move {
    ///             let _ = pipe.emit(x * 2).await;
    ///         },
    ///         Options::new().with_pool_size(1),
    ///     )
    ///     .collect()
    ///     .await;
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// # }
    /// ```
    pub fn walk<U, F, Fut>(self, f: F, options: Options) -> Stream<U>
    where
        U: Send + 'static,
        F: Fn(T, Pipe<U>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let work_size = options.work_size();
        let (queue, receiver) = Queue::bounded(work_size);
        let f = Arc::new(f);

        spawn_guarded(async move {
            let _close = queue.close_on_drop();
            let pool = Arc::new(Semaphore::new(work_size));
            let mut started = 0usize;

            loop {
                if queue.is_disconnected() {
                    log::debug!("walk: reader gone after {} items, stop pulling", started);
                    break;
                }

                let permit = match Arc::clone(&pool).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };

                let next = match options.cancellation() {
                    Some(token) => tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            log::debug!("walk: cancelled after {} items", started);
                            None
                        }
                        item = self.next() => item,
                    },
                    None => self.next().await,
                };
                let item = match next {
                    Some(item) => item,
                    None => break,
                };

                started += 1;
                let f = Arc::clone(&f);
                let pipe = Pipe::new(queue.clone());
                spawn_guarded(async move {
                    let _slot = permit;
                    f(item, pipe).await;
                });
            }

            // Stop reading before waiting so upstream producers are released.
            drop(self);

            // Every worker holds one permit until it is done; getting them all
            // back means no worker can still write to the queue.
            let _ = pool.acquire_many(work_size as u32).await;
            log::debug!("walk: {} workers finished, closing output", started);
        });

        Stream::with_capacity(receiver, work_size)
    }

    /// Keep the items for which `predicate` holds
    pub fn filter<P>(self, predicate: P, options: Options) -> Stream<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.walk(
            move |item, pipe| {
                let keep = predicate(&item);
                async move {
                    if keep {
                        let _ = pipe.emit(item).await;
                    }
                }
            },
            options,
        )
    }

    /// Transform every item
    pub fn map<U, F>(self, f: F, options: Options) -> Stream<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.walk(
            move |item, pipe| {
                let mapped = f(item);
                async move {
                    let _ = pipe.emit(mapped).await;
                }
            },
            options,
        )
    }

    /// Transform every item into any number of items, emitted in order
    pub fn flat_map<U, I, F>(self, f: F, options: Options) -> Stream<U>
    where
        U: Send + 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: Send + 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        self.walk(
            move |item, pipe| {
                let items = f(item).into_iter();
                async move {
                    for item in items {
                        if pipe.emit(item).await.is_err() {
                            break;
                        }
                    }
                }
            },
            options,
        )
    }

    /// Run `f` on every item concurrently and wait until all calls returned
    pub async fn parallel_finish<F>(self, f: F, options: Options)
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.walk(
            move |item, _pipe: Pipe<()>| {
                f(item);
                async {}
            },
            options,
        )
        .drain()
        .await
    }
}
