/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! A single-use result slot shared between a submitted task and its caller.
//!
//! The task holds a [`Completion`] and the caller holds a [`PendingResult`]. The caller may
//! either `.await` the pending result or block on it with [`PendingResult::wait`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// The task finished (or was dropped) without producing a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Abandoned;

impl fmt::Display for Abandoned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task was dropped before producing a result")
    }
}

impl std::error::Error for Abandoned {}

/// Create a connected completion/pending pair.
pub fn channel<T>() -> (Completion<T>, PendingResult<T>) {
    let (tx, rx) = oneshot::channel();
    (Completion { tx }, PendingResult { rx })
}

/// Sending half, moved into the task.
#[derive(Debug)]
pub struct Completion<T> {
    tx: oneshot::Sender<T>,
}

impl<T> Completion<T> {
    /// Store the task's result. Does nothing if the caller has already dropped its half.
    pub fn complete(self, value: T) {
        let _ = self.tx.send(value);
    }

    /// Returns true if the caller is no longer waiting for the result.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, returned to the caller.
#[must_use = "the result of the task is lost if the pending result is dropped"]
#[derive(Debug)]
pub struct PendingResult<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> PendingResult<T> {
    /// Block the current thread until the task has completed.
    ///
    /// # Panics
    /// If called from within an asynchronous execution context. Use `.await` there instead.
    pub fn wait(self) -> Result<T, Abandoned> {
        self.rx.blocking_recv().map_err(|_| Abandoned)
    }

    /// Returns the result if the task has already completed, without blocking.
    pub fn try_take(&mut self) -> Option<Result<T, Abandoned>> {
        match self.rx.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(Abandoned)),
        }
    }
}

impl<T> Future for PendingResult<T> {
    type Output = Result<T, Abandoned>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|res| res.map_err(|_| Abandoned))
    }
}

#[cfg(test)]
mod test {
    use super::{channel, Abandoned};

    #[test]
    fn wait_returns_completed_value() {
        let (completion, pending) = channel();
        std::thread::spawn(move || completion.complete(42));
        assert_eq!(Ok(42), pending.wait());
    }

    #[test]
    fn dropped_completion_resolves_as_abandoned() {
        let (completion, pending) = channel::<u8>();
        drop(completion);
        assert_eq!(Err(Abandoned), pending.wait());
    }

    #[test]
    fn try_take_does_not_block() {
        let (completion, mut pending) = channel();
        assert_eq!(None, pending.try_take());
        completion.complete("done");
        assert_eq!(Some(Ok("done")), pending.try_take());
    }

    #[tokio::test]
    async fn pending_results_can_be_awaited() {
        let (completion, pending) = channel();
        assert!(!completion.is_abandoned());
        completion.complete(String::from("hello"));
        assert_eq!(Ok("hello".to_string()), pending.await);
    }
}
