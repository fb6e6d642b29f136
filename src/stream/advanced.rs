//! Sequential stages: one producer task draining the input in order
//!
//! None of these add concurrency of their own. Each one runs as a single
//! generator task and stops as soon as its reader goes away, which in turn
//! drops its input and releases the stage upstream.
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::Stream;
use crate::error::{StreamError, StreamResult};
use crate::queue::Queue;
use crate::ring::Ring;
use crate::worker::{protect, spawn_guarded};

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Keep the first item seen for every key
    pub fn distinct<K, F>(self, key: F) -> Stream<T>
    where
        K: Eq + Hash + Send + 'static,
        F: Fn(&T) -> K + Send + 'static,
    {
        Stream::from_generator(move |pipe| async move {
            let mut seen = HashSet::new();
            while let Some(item) = self.next().await {
                if seen.insert(key(&item)) && pipe.emit(item).await.is_err() {
                    break;
                }
            }
        })
    }

    /// Re-buffer the stream through a queue holding up to `n` items
    pub fn buffer(self, n: usize) -> Stream<T> {
        let (queue, receiver) = Queue::bounded(n);
        let capacity = queue.capacity();
        spawn_guarded(async move {
            let _close = queue.close_on_drop();
            while let Some(item) = self.next().await {
                if queue.enqueue(item).await.is_err() {
                    break;
                }
            }
        });
        Stream::with_capacity(receiver, capacity)
    }

    /// Group consecutive items into vectors of `n`; the last one may be shorter
    pub fn split(self, n: usize) -> StreamResult<Stream<Vec<T>>> {
        if n < 1 {
            return Err(StreamError::invalid_argument("n should be greater than 0"));
        }

        Ok(Stream::from_generator(move |pipe| async move {
            let mut chunk = Vec::with_capacity(n);
            while let Some(item) = self.next().await {
                chunk.push(item);
                if chunk.len() == n && pipe.emit(std::mem::take(&mut chunk)).await.is_err() {
                    return;
                }
            }
            if !chunk.is_empty() {
                let _ = pipe.emit(chunk).await;
            }
        }))
    }

    /// Like [`split`](Stream::split) but every chunk is a closed sub-stream
    pub fn split_stream(self, n: usize) -> StreamResult<Stream<Stream<T>>> {
        Ok(self.split(n)?.into_chunk_streams())
    }

    /// Sort the whole stream with a less-than comparator (stable)
    pub fn sort<F>(self, less: F) -> Stream<T>
    where
        F: Fn(&T, &T) -> bool + Send + 'static,
    {
        Stream::from_generator(move |pipe| async move {
            let mut items = self.collect().await;
            items.sort_by(|a, b| {
                if less(a, b) {
                    std::cmp::Ordering::Less
                } else if less(b, a) {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            });
            for item in items {
                if pipe.emit(item).await.is_err() {
                    break;
                }
            }
        })
    }

    /// Keep only the last `n` items, in their original order.
    ///
    /// Nothing is emitted before the input ends.
    pub fn tail(self, n: usize) -> StreamResult<Stream<T>> {
        let mut ring = Ring::new(n)?;

        Ok(Stream::from_generator(move |pipe| async move {
            while let Some(item) = self.next().await {
                ring.add(item);
            }
            for item in ring.into_vec() {
                if pipe.emit(item).await.is_err() {
                    break;
                }
            }
        }))
    }

    /// Keep only the first `n` items.
    ///
    /// The output closes right after the n-th item and the input is released.
    pub fn head(self, n: usize) -> StreamResult<Stream<T>> {
        if n < 1 {
            return Err(StreamError::invalid_argument("n must be greater than 0"));
        }

        Ok(Stream::from_generator(move |pipe| async move {
            let mut remaining = n;
            while remaining > 0 {
                let item = match self.next().await {
                    Some(item) => item,
                    None => break,
                };
                if pipe.emit(item).await.is_err() {
                    break;
                }
                remaining -= 1;
            }
        }))
    }

    /// Drop the first `n` items
    pub fn skip(self, n: usize) -> Stream<T> {
        if n == 0 {
            return self;
        }

        Stream::from_generator(move |pipe| async move {
            let mut index = 0usize;
            while let Some(item) = self.next().await {
                if index >= n && pipe.emit(item).await.is_err() {
                    break;
                }
                index = index.saturating_add(1);
            }
        })
    }

    /// Emit at most `n` items
    pub fn limit(self, n: usize) -> Stream<T> {
        if n == 0 {
            return Stream::empty();
        }

        Stream::from_generator(move |pipe| async move {
            let mut emitted = 0usize;
            while emitted < n {
                let item = match self.next().await {
                    Some(item) => item,
                    None => break,
                };
                if pipe.emit(item).await.is_err() {
                    break;
                }
                emitted += 1;
            }
        })
    }

    /// Bucket items by key; buckets come out in order of first appearance
    pub fn group<K, F>(self, key: F) -> Stream<Vec<T>>
    where
        K: Eq + Hash + Send + 'static,
        F: Fn(&T) -> K + Send + 'static,
    {
        Stream::from_generator(move |pipe| async move {
            let mut slots: HashMap<K, usize> = HashMap::new();
            let mut groups: Vec<Vec<T>> = Vec::new();
            while let Some(item) = self.next().await {
                let slot = *slots.entry(key(&item)).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
                groups[slot].push(item);
            }
            for group in groups {
                if pipe.emit(group).await.is_err() {
                    break;
                }
            }
        })
    }

    /// Collapse the whole stream into a single vector item
    pub fn merge(self) -> Stream<Vec<T>> {
        Stream::from_generator(move |pipe| async move {
            let items = self.collect().await;
            let _ = pipe.emit(items).await;
        })
    }

    /// Emit the items in reverse order
    pub fn reverse(self) -> Stream<T> {
        Stream::from_generator(move |pipe| async move {
            let mut items = self.collect().await;
            items.reverse();
            for item in items {
                if pipe.emit(item).await.is_err() {
                    break;
                }
            }
        })
    }

    /// Observe every item as it passes through.
    ///
    /// A panic in `f` is absorbed and the item is forwarded anyway.
    pub fn peek<F>(self, f: F) -> Stream<T>
    where
        F: Fn(&T) + Send + 'static,
    {
        Stream::from_generator(move |pipe| async move {
            while let Some(item) = self.next().await {
                if let Err(err) = protect(|| f(&item)) {
                    log::warn!("peek: {}", err);
                }
                if pipe.emit(item).await.is_err() {
                    break;
                }
            }
        })
    }
}

impl<T> Stream<Vec<T>>
where
    T: Send + 'static,
{
    fn into_chunk_streams(self) -> Stream<Stream<T>> {
        Stream::from_generator(move |pipe| async move {
            while let Some(chunk) = self.next().await {
                if pipe.emit(Stream::of(chunk)).await.is_err() {
                    break;
                }
            }
        })
    }
}
