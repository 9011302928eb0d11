/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use opcall_http::endpoint::{self, EndpointParams, ResolveEndpoint, SharedEndpointResolver};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct Inner {
    resolver: SharedEndpointResolver,
    calls: AtomicUsize,
    last_params: Mutex<Option<EndpointParams>>,
}

/// Wraps an endpoint resolver and records how it was called.
#[derive(Clone)]
pub struct CountingEndpointResolver {
    inner: Arc<Inner>,
}

impl CountingEndpointResolver {
    /// Wrap `resolver`.
    pub fn new(resolver: impl ResolveEndpoint + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver: SharedEndpointResolver::new(resolver),
                calls: AtomicUsize::new(0),
                last_params: Mutex::new(None),
            }),
        }
    }

    /// How many times endpoint resolution ran.
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// The parameters of the most recent resolution.
    pub fn last_params(&self) -> Option<EndpointParams> {
        self.inner.last_params.lock().unwrap().clone()
    }
}

impl fmt::Debug for CountingEndpointResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingEndpointResolver")
            .field("calls", &self.calls())
            .finish()
    }
}

impl ResolveEndpoint for CountingEndpointResolver {
    fn resolve_endpoint(&self, params: &EndpointParams) -> endpoint::Result {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        *self.inner.last_params.lock().unwrap() = Some(params.clone());
        self.inner.resolver.resolve_endpoint(params)
    }
}
