/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Executor implementations for different runtimes.

pub mod executor;
pub mod thread_pool;
