//! Panic-isolated task spawning
//!
//! Every unit of work the engine starts on its own task goes through
//! [`spawn_guarded`]. The task body runs behind an explicit catch boundary so a
//! panicking user callback ends only its own unit of work: the failure is
//! turned into a [`StreamError::InterceptedFailure`], logged, and dropped.

use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use tokio::task::JoinHandle;

use crate::error::{StreamError, StreamResult};

/// Run a future to completion, converting a panic into an error value.
///
/// This is the fallible-task wrapper used at every spawn site. The future is
/// polled inside `catch_unwind`, so the caller always gets a `Result` back.
pub async fn guarded<F>(fut: F) -> StreamResult<F::Output>
where
    F: Future,
{
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .map_err(|payload| StreamError::InterceptedFailure(panic_message(payload.as_ref())))
}

/// Spawn `fut` on a new tokio task and return immediately.
///
/// A panic inside `fut` is caught at the top of the task and discarded after
/// being logged. The returned handle resolves once the task is done either
/// way, so it can double as a completion signal; dropping it detaches the task.
pub fn spawn_guarded<F>(fut: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = guarded(fut).await {
            log::warn!("worker stopped: {}", err);
        }
    })
}

/// Run `f` on the current task, catching and converting a panic.
pub fn protect<F, R>(f: F) -> StreamResult<R>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| StreamError::InterceptedFailure(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
