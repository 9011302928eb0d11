/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Runtime-agnostic worker pool abstractions for opcall.
//!
//! Non-blocking dispatch hands a whole synchronous call to an [`Executor`](rt::executor::Executor)
//! as one unit of work. Implementations are provided for a dedicated thread pool and, behind the
//! `rt-tokio` feature, for a Tokio runtime's blocking pool.

pub mod pending;
pub mod rt;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
