/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! A dedicated thread pool for blocking dispatches.

use super::executor::{Executor, Task};
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// Error returned when the worker threads cannot be started.
#[derive(Debug, thiserror::Error)]
#[error("failed to start the `{name}` thread pool")]
pub struct BuildError {
    name: &'static str,
    #[source]
    source: rayon::ThreadPoolBuildError,
}

/// An executor backed by a fixed-size pool of named worker threads.
///
/// Tasks are started in the order they are submitted. A panicking task is logged and does
/// not take its worker thread down.
#[derive(Clone)]
pub struct ThreadPoolExecutor {
    name: &'static str,
    pool: Arc<rayon::ThreadPool>,
}

impl ThreadPoolExecutor {
    /// Start a pool of `num_threads` workers, or one per available CPU when `None`.
    pub fn new(name: &'static str, num_threads: Option<usize>) -> Result<Self, BuildError> {
        let mut builder = rayon::ThreadPoolBuilder::new()
            .thread_name(move |thread_id| format!("{name}-{thread_id}"))
            .panic_handler(move |_panic| {
                error!(pool = name, "task running in the dispatch pool panicked");
            });
        if let Some(num_threads) = num_threads {
            builder = builder.num_threads(num_threads);
        }
        let pool = builder
            .build()
            .map_err(|source| BuildError { name, source })?;
        Ok(Self {
            name,
            pool: Arc::new(pool),
        })
    }

    /// Number of worker threads in this pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl fmt::Debug for ThreadPoolExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadPoolExecutor")
            .field("name", &self.name)
            .field("num_threads", &self.num_threads())
            .finish()
    }
}

impl Executor for ThreadPoolExecutor {
    fn spawn(&self, task: Task) {
        self.pool.spawn_fifo(task);
    }
}
