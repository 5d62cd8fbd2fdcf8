// SPDX-License-Identifier: GPL-3.0-only

//! Deferred work returned from `update`
//!
//! A task is a set of futures, each resolving to one message that the event
//! loop posts back to its own queue. Nothing is cancelled once scheduled.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;

/// Zero or more futures producing follow-up messages
#[must_use = "tasks do nothing unless handed to the event loop"]
pub struct Task<T> {
    futures: Vec<BoxFuture<'static, T>>,
}

impl<T: Send + 'static> Task<T> {
    /// No follow-up work
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Run `future` and map its output into a message
    pub fn perform<F, A>(future: F, map: impl FnOnce(A) -> T + Send + 'static) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        Self {
            futures: vec![future.map(map).boxed()],
        }
    }

    /// Post `message` once `delay` has elapsed
    pub fn delayed(delay: std::time::Duration, message: T) -> Self {
        Self::perform(async move { tokio::time::sleep(delay).await }, move |_| message)
    }

    /// Combine several tasks
    pub fn batch(tasks: impl IntoIterator<Item = Task<T>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|t| t.futures).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    /// Number of pending futures
    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, T>> {
        self.futures
    }
}

impl<T> std::fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("futures", &self.futures.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn batch_flattens_futures() {
        let task = Task::batch([
            Task::perform(async { 1 }, |v| v + 1),
            Task::none(),
            Task::perform(async { 5 }, |v| v),
        ]);
        assert_eq!(task.len(), 2);
        let mut results = Vec::new();
        for fut in task.into_futures() {
            results.push(fut.await);
        }
        assert_eq!(results, vec![2, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_waits_before_yielding() {
        let start = tokio::time::Instant::now();
        let task = Task::delayed(std::time::Duration::from_millis(300), "hide");
        let value = task.into_futures().remove(0).await;
        assert_eq!(value, "hide");
        assert!(start.elapsed() >= std::time::Duration::from_millis(300));
    }

    #[test]
    fn delayed_builds_outside_runtime() {
        let task = Task::delayed(std::time::Duration::from_millis(300), "hide");
        assert_eq!(task.len(), 1);
    }
}
