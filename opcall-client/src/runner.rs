/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Non-blocking dispatch on an [`Executor`](opcall_async::rt::executor::Executor).
//!
//! Both entry points clone the input, package the synchronous dispatch of that clone into a
//! task and submit it. The calling thread only pays for the clone and the submission.

use crate::dispatch::OperationDispatcher;
use crate::error::{DispatchError, Outcome};
use crate::operation::{Operation, OperationInput, OperationOutput};
use opcall_async::pending::{self, PendingResult};
use opcall_async::rt::executor::{Executor, SharedExecutor};
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{trace, Span};

/// Opaque data passed through to a completion handler untouched.
#[derive(Clone)]
pub struct AsyncCallerContext(Arc<dyn Any + Send + Sync>);

impl AsyncCallerContext {
    /// Wrap `value`.
    pub fn new(value: impl Any + Send + Sync) -> Self {
        Self(Arc::new(value))
    }

    /// Returns the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for AsyncCallerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncCallerContext")
    }
}

/// The eventual [`Outcome`] of a non-blocking dispatch.
///
/// Either `.await` it or block on it with [`OutcomeFuture::wait`]. Dropping it does not cancel
/// the call.
#[must_use = "the outcome of the call is lost if the future is dropped"]
#[derive(Debug)]
pub struct OutcomeFuture<O> {
    pending: PendingResult<Outcome<O>>,
}

impl<O> OutcomeFuture<O> {
    /// Block the current thread until the call completes.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context. Use `.await` there.
    pub fn wait(self) -> Outcome<O> {
        self.pending.wait().unwrap_or_else(|err| Err(DispatchError::abandoned(err)))
    }
}

impl<O> Future for OutcomeFuture<O> {
    type Output = Outcome<O>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.pending)
            .poll(cx)
            .map(|result| result.unwrap_or_else(|err| Err(DispatchError::abandoned(err))))
    }
}

/// Submits operation calls to an executor.
#[derive(Clone, Debug)]
pub struct AsyncOperationRunner {
    dispatcher: Arc<OperationDispatcher>,
    executor: SharedExecutor,
}

impl AsyncOperationRunner {
    /// Create a runner dispatching with `dispatcher` on `executor`.
    pub fn new(dispatcher: Arc<OperationDispatcher>, executor: SharedExecutor) -> Self {
        Self {
            dispatcher,
            executor,
        }
    }

    /// Dispatch a clone of `input` on the executor.
    pub fn dispatch_async<I, O>(&self, operation: &Operation<I, O>, input: &I) -> OutcomeFuture<O>
    where
        I: OperationInput,
        O: OperationOutput,
    {
        let (completion, pending) = pending::channel();
        let dispatcher = self.dispatcher.clone();
        let operation = operation.clone();
        let input = input.clone();
        self.submit(move || completion.complete(dispatcher.dispatch(&operation, &input)));
        OutcomeFuture { pending }
    }

    /// Dispatch a clone of `input` on the executor, then call `handler` on the worker thread.
    ///
    /// The handler receives the clone of the input, the outcome, and `context`.
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
        let dispatcher = self.dispatcher.clone();
        let operation = operation.clone();
        let input = input.clone();
        self.submit(move || {
            let outcome = dispatcher.dispatch(&operation, &input);
            trace!("calling completion handler");
            handler(&input, outcome, context);
        });
    }

    fn submit(&self, task: impl FnOnce() + Send + 'static) {
        let span = Span::current();
        trace!("submitting task");
        self.executor.spawn(Box::new(move || span.in_scope(task)));
    }
}

#[cfg(test)]
mod test {
    use super::{AsyncCallerContext, AsyncOperationRunner};
    use crate::error::ErrorKind;
    use crate::operation::{Operation, OperationInput, OperationOutput};
    use crate::OperationDispatcher;
    use opcall_async::rt::executor::SharedExecutor;
    use opcall_async::test_util::{InlineExecutor, ManualExecutor};
    use opcall_http::endpoint::{SharedEndpointResolver, StaticUriEndpointResolver};
    use opcall_http::transport::{HttpResponse, SharedTransport, TransportError};
    use opcall_test_helpers::CaptureTransport;
    use std::sync::mpsc;
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    struct Ping(u32);

    impl OperationInput for Ping {
        fn is_set(&self, _field: &str) -> bool {
            true
        }
    }

    #[derive(Debug, PartialEq)]
    struct Pong(u16);

    impl OperationOutput for Pong {
        fn parse_response(response: &HttpResponse) -> Result<Self, TransportError> {
            Ok(Pong(response.status().as_u16()))
        }
    }

    fn runner(executor: SharedExecutor, transport: &CaptureTransport) -> AsyncOperationRunner {
        let dispatcher = OperationDispatcher::new(
            SharedEndpointResolver::new(StaticUriEndpointResolver::http_localhost(1234)),
            SharedTransport::new(transport.clone()),
        );
        AsyncOperationRunner::new(Arc::new(dispatcher), executor)
    }

    fn ping() -> Operation<Ping, Pong> {
        Operation::builder("Ping", "ping")
            .uri_template("/ping")
            .build()
            .unwrap()
    }

    #[test]
    fn submission_does_not_run_the_task() {
        let executor = ManualExecutor::new();
        let transport = CaptureTransport::new();
        let runner = runner(SharedExecutor::new(executor.clone()), &transport);

        let future = runner.dispatch_async(&ping(), &Ping(1));
        assert_eq!(1, executor.pending());
        assert_eq!(0, transport.call_count());

        executor.run_all();
        assert_eq!(Pong(200), future.wait().unwrap());
        assert_eq!(1, transport.call_count());
    }

    #[test]
    fn dropped_tasks_resolve_to_an_abandoned_error() {
        let executor = ManualExecutor::new();
        let transport = CaptureTransport::new();
        let runner = runner(SharedExecutor::new(executor.clone()), &transport);

        let future = runner.dispatch_async(&ping(), &Ping(1));
        assert_eq!(1, executor.discard_all());
        let err = future.wait().unwrap_err();
        assert_eq!(ErrorKind::Transport, err.kind());
        assert_eq!("TaskAbandoned", err.code());
        assert!(!err.is_retryable());
        assert_eq!(0, transport.call_count());
    }

    #[test]
    fn callbacks_receive_the_input_clone_and_the_context() {
        let transport = CaptureTransport::new();
        let runner = runner(SharedExecutor::new(InlineExecutor::new()), &transport);
        let (tx, rx) = mpsc::channel();

        runner.dispatch_with_callback(
            &ping(),
            &Ping(7),
            move |input: &Ping, outcome, context| {
                let tag = context.as_ref().and_then(|c| c.downcast_ref::<&str>()).copied();
                tx.send((input.0, outcome, tag)).unwrap();
            },
            Some(AsyncCallerContext::new("request-7")),
        );

        let (input, outcome, tag) = rx.recv().unwrap();
        assert_eq!(7, input);
        assert_eq!(Pong(200), outcome.unwrap());
        assert_eq!(Some("request-7"), tag);
    }

    #[test]
    fn context_downcasts_only_to_its_own_type() {
        let context = AsyncCallerContext::new(42_u64);
        assert_eq!(Some(&42), context.downcast_ref::<u64>());
        assert!(context.downcast_ref::<u32>().is_none());
    }

    #[test]
    #[tracing_test::traced_test]
    fn the_submitting_span_follows_the_task() {
        use opcall_async::rt::thread_pool::ThreadPoolExecutor;

        let executor = ThreadPoolExecutor::new("span-test", Some(1)).unwrap();
        let transport = CaptureTransport::new();
        let runner = runner(SharedExecutor::new(executor), &transport);

        let span = tracing::info_span!("caller", request = 99);
        let future = span.in_scope(|| runner.dispatch_async(&ping(), &Ping(1)));
        future.wait().unwrap();

        assert!(logs_contain("caller{request=99}"));
        assert!(logs_contain("resolved endpoint"));
    }
}
