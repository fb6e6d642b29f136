//! Terminal operations: count, finish, foreach, matching, find_first, collect
use super::Stream;
use crate::error::{StreamError, StreamResult};

/// A callback handed to [`Stream::finish`]
pub type Finisher<'a, T> = Box<dyn FnMut(&T) + Send + 'a>;

impl<T> Stream<T>
where
    T: Send + 'static,
{
    /// Count the remaining items
    pub async fn count(self) -> usize {
        let mut count = 0usize;
        while self.next().await.is_some() {
            count = count.saturating_add(1);
        }
        count
    }

    /// Consume everything, discarding the items
    pub async fn drain(self) {
        while self.next().await.is_some() {}
    }

    /// Consume everything, passing each item to every callback in turn
    pub async fn finish(self, mut callbacks: Vec<Finisher<'_, T>>) {
        while let Some(item) = self.next().await {
            for callback in callbacks.iter_mut() {
                callback(&item);
            }
        }
    }

    /// Visit every item in arrival order
    pub async fn foreach<F>(self, mut f: F)
    where
        F: FnMut(T),
    {
        while let Some(item) = self.next().await {
            f(item);
        }
    }

    /// Visit every item, last one first. Waits for the whole stream.
    pub async fn foreach_reverse<F>(self, f: F)
    where
        F: FnMut(T),
    {
        let items = self.collect().await;
        items.into_iter().rev().for_each(f);
    }

    /// Whether any item satisfies `predicate`; stops at the first match
    pub async fn any_match<F>(self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        while let Some(item) = self.next().await {
            if predicate(&item) {
                return true;
            }
        }
        false
    }

    /// Whether every item satisfies `predicate`; stops at the first miss
    pub async fn all_match<F>(self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        while let Some(item) = self.next().await {
            if !predicate(&item) {
                return false;
            }
        }
        true
    }

    /// The first item, or [`StreamError::EmptyResult`] for an empty stream
    pub async fn find_first(self) -> StreamResult<T> {
        self.next().await.ok_or(StreamError::EmptyResult)
    }

    /// Gather the remaining items into a vector
    pub async fn collect(self) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item);
        }
        items
    }
}
