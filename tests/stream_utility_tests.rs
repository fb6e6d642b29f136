use chanflow::error::StreamError;
use chanflow::{Finisher, Stream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_count() {
    assert_eq!(Stream::of(vec![1, 2, 3]).count().await, 3);
    assert_eq!(Stream::<i32>::empty().count().await, 0);
}

#[tokio::test]
async fn test_drain_runs_upstream_to_completion() {
    let produced = Arc::new(AtomicUsize::new(0));
    let counter = produced.clone();

    Stream::from_generator(move |pipe| async move {
        for i in 0..100 {
            if pipe.emit(i).await.is_ok() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }
    })
    .drain()
    .await;

    assert_eq!(produced.load(Ordering::SeqCst), 100);
}

#[tokio::test]
async fn test_finish_calls_every_callback() {
    let mut sum = 0;
    let mut seen = Vec::new();

    {
        let callbacks: Vec<Finisher<'_, i32>> = vec![
            Box::new(|x| sum += *x),
            Box::new(|x| seen.push(*x)),
        ];
        Stream::of(vec![1, 2, 3]).finish(callbacks).await;
    }

    assert_eq!(sum, 6);
    assert_eq!(seen, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_finish_without_callbacks_drains() {
    let stream = Stream::of(vec![1, 2, 3]);
    let reader = stream.clone();
    stream.finish(Vec::new()).await;
    assert_eq!(reader.next().await, None);
}

#[tokio::test]
async fn test_foreach() {
    let mut seen = Vec::new();
    Stream::of(vec![1, 2, 3, 4]).foreach(|x| seen.push(x)).await;
    assert_eq!(seen, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_foreach_reverse() {
    let mut seen = Vec::new();
    Stream::of(vec![1, 2, 3, 4]).foreach_reverse(|x| seen.push(x)).await;
    assert_eq!(seen, vec![4, 3, 2, 1]);
}

#[tokio::test]
async fn test_any_match() {
    assert!(Stream::of(vec![1, 2, 3, 4]).any_match(|x| *x == 3).await);
    assert!(!Stream::of(vec![1, 2, 3, 4]).any_match(|x| *x == 7).await);
    assert!(!Stream::<i32>::empty().any_match(|_| true).await);
}

#[tokio::test]
async fn test_all_match() {
    assert!(Stream::of(vec![1, 2, 3, 4]).all_match(|x| *x > 0).await);
    assert!(!Stream::of(vec![1, 2, 3, 4]).all_match(|x| *x > 1).await);
    assert!(Stream::<i32>::empty().all_match(|_| false).await);
}

#[tokio::test]
async fn test_matching_stops_at_first_decision() {
    let endless = || {
        Stream::from_generator(|pipe| async move {
            let mut i = 0u64;
            while pipe.emit(i).await.is_ok() {
                i += 1;
            }
        })
    };

    let found = timeout(Duration::from_secs(5), endless().any_match(|x| *x == 10))
        .await
        .expect("any_match kept reading");
    assert!(found);

    let all = timeout(Duration::from_secs(5), endless().all_match(|x| *x < 10))
        .await
        .expect("all_match kept reading");
    assert!(!all);
}

#[tokio::test]
async fn test_find_first() {
    assert_eq!(Stream::of(vec![7, 8, 9]).find_first().await, Ok(7));
    assert_eq!(
        Stream::<i32>::empty().find_first().await,
        Err(StreamError::EmptyResult)
    );
}

#[tokio::test]
async fn test_collect() {
    assert_eq!(Stream::of(vec!["x", "y"]).collect().await, vec!["x", "y"]);
    assert!(Stream::<String>::empty().collect().await.is_empty());
}
