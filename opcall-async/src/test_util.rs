/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Executors for tests.

use crate::rt::executor::{Executor, Task};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Runs every task on the submitting thread, before `spawn` returns.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineExecutor;

impl InlineExecutor {
    /// Create a new inline executor.
    pub fn new() -> Self {
        Self
    }
}

impl Executor for InlineExecutor {
    fn spawn(&self, task: Task) {
        task()
    }
}

/// Queues tasks until the test decides to run them.
///
/// Makes it observable that submission never runs or blocks on the task itself.
#[derive(Clone, Default)]
pub struct ManualExecutor {
    queue: Arc<Mutex<VecDeque<Task>>>,
}

impl ManualExecutor {
    /// Create an executor with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of submitted tasks that have not run yet.
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    /// Run the oldest queued task. Returns false if the queue was empty.
    pub fn run_next(&self) -> bool {
        // release the lock before running: the task may submit more work
        let task = self.queue.lock().unwrap().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run queued tasks until the queue is empty. Returns the number of tasks run.
    pub fn run_all(&self) -> usize {
        let mut count = 0;
        while self.run_next() {
            count += 1;
        }
        count
    }

    /// Drop every queued task without running it.
    pub fn discard_all(&self) -> usize {
        let mut queue = self.queue.lock().unwrap();
        let count = queue.len();
        queue.clear();
        count
    }
}

impl fmt::Debug for ManualExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualExecutor")
            .field("pending", &self.pending())
            .finish()
    }
}

impl Executor for ManualExecutor {
    fn spawn(&self, task: Task) {
        self.queue.lock().unwrap().push_back(task);
    }
}
