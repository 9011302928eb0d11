/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Provides an [`Executor`] trait that runs blocking units of work off the calling thread,
//! and implementations of `Executor` for different runtimes.

use std::fmt::Debug;
use std::sync::Arc;

/// A unit of work submitted to an [`Executor`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks on a pool of worker threads.
///
/// Tasks may block, so implementations must not run them on an async reactor thread.
/// Tasks submitted to the same executor start in submission order; no other scheduling
/// guarantee is made. Once submitted, a task cannot be cancelled.
pub trait Executor: Debug + Send + Sync {
    /// Submit `task` for execution. Must not block the caller.
    fn spawn(&self, task: Task);
}

impl<T> Executor for Box<T>
where
    T: Executor,
    T: ?Sized,
{
    fn spawn(&self, task: Task) {
        T::spawn(self, task)
    }
}

impl<T> Executor for Arc<T>
where
    T: Executor,
    T: ?Sized,
{
    fn spawn(&self, task: Task) {
        T::spawn(self, task)
    }
}

/// Wrapper type for sharable `Executor`
#[derive(Clone, Debug)]
pub struct SharedExecutor(Arc<dyn Executor>);

impl SharedExecutor {
    /// Create a new `SharedExecutor` from `Executor`
    pub fn new(executor: impl Executor + 'static) -> Self {
        Self(Arc::new(executor))
    }
}

impl AsRef<dyn Executor> for SharedExecutor {
    fn as_ref(&self) -> &(dyn Executor + 'static) {
        self.0.as_ref()
    }
}

impl From<Arc<dyn Executor>> for SharedExecutor {
    fn from(executor: Arc<dyn Executor>) -> Self {
        SharedExecutor(executor)
    }
}

impl Executor for SharedExecutor {
    fn spawn(&self, task: Task) {
        self.0.spawn(task)
    }
}

/// Returns a default executor: a thread pool sized to the available parallelism.
pub fn default_executor() -> Result<SharedExecutor, super::thread_pool::BuildError> {
    super::thread_pool::ThreadPoolExecutor::new("opcall-dispatch", None).map(SharedExecutor::new)
}

/// Implementation of [`Executor`] for Tokio.
///
/// Tasks run on the runtime's blocking thread pool, so the synchronous transport call never
/// stalls the runtime's async workers.
#[cfg(feature = "rt-tokio")]
#[derive(Clone, Debug)]
pub struct TokioExecutor {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "rt-tokio")]
impl TokioExecutor {
    /// Create an executor that submits to the given runtime.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Create an executor for the runtime this thread is running in, if any.
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

#[cfg(feature = "rt-tokio")]
impl Executor for TokioExecutor {
    fn spawn(&self, task: Task) {
        // the join handle is dropped: completion is observed through the task's own channel
        drop(self.handle.spawn_blocking(task));
    }
}

#[cfg(all(test, feature = "rt-tokio"))]
mod test {
    use super::{Executor, SharedExecutor, TokioExecutor};

    #[tokio::test(flavor = "multi_thread")]
    async fn tokio_executor_runs_tasks_on_the_blocking_pool() {
        let executor = SharedExecutor::new(TokioExecutor::current().expect("inside a runtime"));
        let (tx, rx) = tokio::sync::oneshot::channel();
        executor.spawn(Box::new(move || {
            let _ = tx.send(std::thread::current().id());
        }));
        let worker = rx.await.expect("task ran");
        assert_ne!(std::thread::current().id(), worker);
    }
}
