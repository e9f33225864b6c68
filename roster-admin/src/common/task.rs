//! Deferred work returned by the reducer
//!
//! A [`Task`] is a batch of futures, each resolving to a follow-up message.
//! The reducer never awaits anything itself: it describes the requests to
//! make and the runtime in [`crate::app::AdminPanel`] drives them.

use std::future::Future;

use futures::future::{self, BoxFuture, FutureExt};

#[must_use = "a Task does nothing unless it is run"]
pub struct Task<M> {
    futures: Vec<BoxFuture<'static, M>>,
}

impl<M> std::fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("pending", &self.futures.len())
            .finish()
    }
}

impl<M: Send + 'static> Task<M> {
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// A task that immediately yields `message`.
    pub fn done(message: M) -> Self {
        Self {
            futures: vec![future::ready(message).boxed()],
        }
    }

    /// Run `future` and turn its output into a message with `map`.
    pub fn perform<T, F, Map>(future: F, map: Map) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Map: FnOnce(T) -> M + Send + 'static,
    {
        Self {
            futures: vec![future.map(map).boxed()],
        }
    }

    pub fn batch(tasks: impl IntoIterator<Item = Task<M>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|task| task.futures).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.futures.is_empty()
    }

    /// Drive every future concurrently; messages come back in batch order.
    pub async fn run(self) -> Vec<M> {
        future::join_all(self.futures).await
    }
}

impl<M: Send + 'static> Default for Task<M> {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn batch_preserves_order() {
        let task = Task::batch([
            Task::done(1),
            Task::none(),
            Task::perform(async { 20 }, |value| value + 1),
        ]);
        assert_eq!(task.len(), 2);
        assert_eq!(task.run().await, vec![1, 21]);
    }

    #[tokio::test]
    async fn none_yields_nothing() {
        let task: Task<u8> = Task::none();
        assert!(task.is_none());
        assert!(task.run().await.is_empty());
    }
}
