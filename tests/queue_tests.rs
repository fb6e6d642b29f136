use chanflow::queue::{Queue, QueueError};

#[tokio::test]
async fn test_bounded_queue_basic() {
    let (queue, mut rx) = Queue::bounded(2);

    // Test enqueue
    assert!(queue.enqueue(1).await.is_ok());
    assert!(queue.enqueue(2).await.is_ok());

    // Test try_enqueue when full
    assert!(matches!(queue.try_enqueue(3), Err(QueueError::QueueFull)));

    assert_eq!(rx.recv().await, Some(1));
    assert_eq!(rx.recv().await, Some(2));

    // Should be able to enqueue again
    assert!(queue.enqueue(3).await.is_ok());
    assert_eq!(rx.recv().await, Some(3));
}

#[tokio::test]
async fn test_queue_close() {
    let (queue, mut rx) = Queue::bounded(5);

    queue.enqueue(1).await.unwrap();
    queue.enqueue(2).await.unwrap();

    // Only the first close reports that it closed the queue
    assert!(queue.close());
    assert!(!queue.close());
    assert!(queue.is_closed());

    assert!(matches!(queue.enqueue(3).await, Err(QueueError::QueueClosed)));
    assert!(matches!(queue.try_enqueue(3), Err(QueueError::QueueClosed)));

    // Existing items stay readable, then the queue ends
    assert_eq!(rx.recv().await, Some(1));
    assert_eq!(rx.recv().await, Some(2));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_close_through_clone() {
    let (queue, mut rx) = Queue::<u8>::bounded(1);
    let other = queue.clone();

    other.close();
    assert!(queue.is_closed());
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_close_on_drop() {
    let (queue, mut rx) = Queue::bounded(4);
    {
        let _close = queue.close_on_drop();
        queue.enqueue("a").await.unwrap();
    }

    assert!(queue.is_closed());
    assert_eq!(rx.recv().await, Some("a"));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_dropping_every_handle_closes() {
    let (queue, mut rx) = Queue::bounded(4);
    queue.enqueue(9).await.unwrap();
    drop(queue);

    assert_eq!(rx.recv().await, Some(9));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_reader_withdrawal() {
    let (queue, rx) = Queue::bounded(1);
    assert!(!queue.is_disconnected());

    drop(rx);

    assert!(queue.is_disconnected());
    assert!(matches!(
        queue.enqueue(1).await,
        Err(QueueError::ChannelDisconnected)
    ));
}

#[tokio::test]
async fn test_zero_capacity_is_a_single_slot() {
    let (queue, _rx) = Queue::<i32>::bounded(0);
    assert_eq!(queue.capacity(), 1);

    let (rendezvous, _rx) = Queue::<i32>::rendezvous();
    assert_eq!(rendezvous.capacity(), 1);
}

#[tokio::test]
async fn test_queue_stats() {
    let (queue, _rx) = Queue::bounded(10);

    queue.enqueue(1).await.unwrap();
    queue.enqueue(2).await.unwrap();

    let stats = queue.stats();
    assert_eq!(stats.length, 2);
    assert_eq!(stats.capacity, 10);
    assert_eq!(stats.enqueued, 2);
    assert_eq!(stats.utilization, 0.2);
    assert!(!stats.is_closed);
    assert_eq!(stats.to_string(), "Queue(2/10, 20.0%)");

    queue.close();
    assert!(queue.stats().is_closed);
}

#[tokio::test]
async fn test_concurrent_producers() {
    let (queue, mut rx) = Queue::bounded(8);

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let queue = queue.clone();
            tokio::spawn(async move {
                for i in 0..25 {
                    queue.enqueue(p * 100 + i).await.unwrap();
                }
            })
        })
        .collect();

    let closer = {
        let queue = queue.clone();
        tokio::spawn(async move {
            for producer in producers {
                producer.await.unwrap();
            }
            queue.close();
        })
    };

    let mut items = Vec::new();
    while let Some(item) = rx.recv().await {
        items.push(item);
    }
    closer.await.unwrap();

    assert_eq!(items.len(), 100);
    // Single-writer order survives the interleaving
    for p in 0..4 {
        let own: Vec<_> = items.iter().filter(|v| **v / 100 == p).collect();
        assert!(own.windows(2).all(|w| w[0] < w[1]));
    }
}
