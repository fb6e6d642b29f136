use crate::queue::{Queue, QueueError};

/// Emit-only view of a stage's output queue.
///
/// Handed to user callbacks (`walk`, `from_generator`). It can write items but
/// never close the queue; the stage that owns the queue decides that.
pub struct Pipe<T> {
    queue: Queue<T>,
}

impl<T> Clone for Pipe<T> {
    fn clone(&self) -> Self {
        Pipe {
            queue: self.queue.clone(),
        }
    }
}

impl<T> Pipe<T>
where
    T: Send + 'static,
{
    pub(crate) fn new(queue: Queue<T>) -> Self {
        Pipe { queue }
    }

    /// Write one item, waiting while the output is full.
    ///
    /// Fails once the stage has closed the queue or the reader has gone away;
    /// producers should stop emitting at that point.
    pub async fn emit(&self, item: T) -> Result<(), QueueError> {
        self.queue.enqueue(item).await
    }

    /// True once nobody reads the output anymore
    pub fn is_disconnected(&self) -> bool {
        self.queue.is_disconnected()
    }
}
