/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::dispatch::OperationDispatcher;
use crate::error::Outcome;
use crate::operation::{Operation, OperationInput, OperationOutput};
use crate::runner::{AsyncCallerContext, AsyncOperationRunner, OutcomeFuture};
use crate::Config;
use std::sync::Arc;

/// A service client: one configuration, any number of operations.
///
/// Cloning is cheap and clones share the transport, resolver and executor.
#[derive(Clone, Debug)]
pub struct Client {
    conf: Config,
    dispatcher: Arc<OperationDispatcher>,
    runner: AsyncOperationRunner,
}

impl Client {
    /// Create a client from a configuration.
    pub fn from_conf(conf: Config) -> Self {
        let dispatcher = Arc::new(OperationDispatcher::from_conf(&conf));
        let runner = AsyncOperationRunner::new(dispatcher.clone(), conf.executor().clone());
        Self {
            conf,
            dispatcher,
            runner,
        }
    }

    /// The client configuration.
    pub fn conf(&self) -> &Config {
        &self.conf
    }

    /// Call `operation`, blocking until it completes.
    pub fn dispatch<I, O>(&self, operation: &Operation<I, O>, input: &I) -> Outcome<O>
    where
        I: OperationInput,
        O: OperationOutput,
    {
        self.dispatcher.dispatch(operation, input)
    }

    /// Call `operation` on the configured executor. See [`AsyncOperationRunner::dispatch_async`].
    pub fn dispatch_async<I, O>(&self, operation: &Operation<I, O>, input: &I) -> OutcomeFuture<O>
    where
        I: OperationInput,
        O: OperationOutput,
    {
        self.runner.dispatch_async(operation, input)
    }

    /// Call `operation` on the configured executor and hand the outcome to `handler`.
    /// See [`AsyncOperationRunner::dispatch_with_callback`].
    pub fn dispatch_with_callback<I, O, H>(
        &self,
        operation: &Operation<I, O>,
        input: &I,
        handler: H,
        context: Option<AsyncCallerContext>,
    ) where
        I: OperationInput,
        O: OperationOutput,
        H: FnOnce(&I, Outcome<O>, Option<AsyncCallerContext>) + Send + 'static,
    {
        self.runner
            .dispatch_with_callback(operation, input, handler, context)
    }
}
