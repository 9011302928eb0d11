/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use http::{HeaderMap, Method, StatusCode};
use opcall_http::body::Body;
use opcall_http::signing::SigningContext;
use opcall_http::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A request as seen by [`CaptureTransport`].
#[derive(Clone, Debug)]
pub struct CapturedRequest {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Body,
    signing: SigningContext,
}

impl CapturedRequest {
    fn new(request: HttpRequest, signing: &SigningContext) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
            signing: signing.clone(),
        }
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The full destination URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The value of header `name`, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// All request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The request body as text.
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body.bytes())
    }

    /// How the request was to be signed.
    pub fn signing(&self) -> &SigningContext {
        &self.signing
    }
}

type Responder = dyn Fn(&CapturedRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

struct Inner {
    requests: Mutex<Vec<CapturedRequest>>,
    responder: Box<Responder>,
}

/// Transport that records requests instead of sending them.
///
/// Clones share the same record, so keep one clone in the test and hand another to the client.
#[derive(Clone)]
pub struct CaptureTransport {
    inner: Arc<Inner>,
}

impl Default for CaptureTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CaptureTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureTransport")
            .field("calls", &self.call_count())
            .finish()
    }
}

impl CaptureTransport {
    /// Answers every request with an empty `200 OK`.
    pub fn new() -> Self {
        Self::with_response(200, Body::empty())
    }

    /// Answers every request with `status` and `body`.
    ///
    /// # Panics
    /// If `status` is not a valid status code
    #[track_caller]
    pub fn with_response(status: u16, body: impl Into<Body>) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        let body = body.into();
        Self::with_responder(move |_| {
            let mut response = HttpResponse::new(body.clone());
            *response.status_mut() = status;
            Ok(response)
        })
    }

    /// Answers each request with the result of `responder`.
    pub fn with_responder(
        responder: impl Fn(&CapturedRequest) -> Result<HttpResponse, TransportError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                requests: Mutex::new(Vec::new()),
                responder: Box::new(responder),
            }),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    /// How many requests were received.
    pub fn call_count(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }

    /// Expect that exactly one request was received. Returns that request.
    ///
    /// # Panics
    /// If no request, or more than one request, was received
    #[track_caller]
    pub fn expect_request(&self) -> CapturedRequest {
        let requests = self.inner.requests.lock().unwrap();
        match requests.as_slice() {
            [request] => request.clone(),
            other => panic!("expected exactly one request, received {}", other.len()),
        }
    }

    /// Expect that no request was received.
    ///
    /// # Panics
    /// If a request was received
    #[track_caller]
    pub fn expect_no_request(&self) {
        let calls = self.call_count();
        assert_eq!(0, calls, "expected no request to be received, received {calls}");
    }
}

impl Transport for CaptureTransport {
    fn call(
        &self,
        request: HttpRequest,
        signing: &SigningContext,
    ) -> Result<HttpResponse, TransportError> {
        let captured = CapturedRequest::new(request, signing);
        let response = (self.inner.responder)(&captured);
        self.inner.requests.lock().unwrap().push(captured);
        response
    }
}
