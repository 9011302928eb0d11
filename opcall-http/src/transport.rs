/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The signing HTTP transport consumed by the dispatcher.
//!
//! Connection pooling, signing, timeouts, and any retry policy all live behind [`Transport`].
//! The dispatcher makes exactly one call per dispatch and treats the outcome opaquely.

use crate::body::Body;
use crate::signing::SigningContext;
use opcall_types::error::ProvideErrorMetadata;
use opcall_types::retry::{ErrorKind, ProvideErrorKind};
use opcall_types::{BoxError, ErrorMetadata};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// An HTTP request ready to be signed and sent.
pub type HttpRequest = http::Request<Body>;

/// A fully read HTTP response.
pub type HttpResponse = http::Response<Body>;

/// Sends an HTTP request, signing it with the given context first.
///
/// Implementations block the calling thread until the response has been read. They must be
/// safe to call from many threads at once.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sign and send `request`, returning the response or a transport-level failure.
    fn call(
        &self,
        request: HttpRequest,
        signing: &SigningContext,
    ) -> Result<HttpResponse, TransportError>;
}

impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    fn call(
        &self,
        request: HttpRequest,
        signing: &SigningContext,
    ) -> Result<HttpResponse, TransportError> {
        T::call(self, request, signing)
    }
}

impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    fn call(
        &self,
        request: HttpRequest,
        signing: &SigningContext,
    ) -> Result<HttpResponse, TransportError> {
        T::call(self, request, signing)
    }
}

/// Wrapper type for sharable `Transport`
#[derive(Clone, Debug)]
pub struct SharedTransport(Arc<dyn Transport>);

impl SharedTransport {
    /// Create a new `SharedTransport` from a `Transport`
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self(Arc::new(transport))
    }
}

impl From<Arc<dyn Transport>> for SharedTransport {
    fn from(transport: Arc<dyn Transport>) -> Self {
        SharedTransport(transport)
    }
}

impl Transport for SharedTransport {
    fn call(
        &self,
        request: HttpRequest,
        signing: &SigningContext,
    ) -> Result<HttpResponse, TransportError> {
        self.0.call(request, signing)
    }
}

/// Broad category of a [`TransportError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportErrorKind {
    /// The request or response timed out.
    Timeout,
    /// A socket-level failure.
    Io,
    /// The request could not be signed.
    Signing,
    /// The service returned an error response.
    Service {
        /// HTTP status of the error response
        status: u16,
    },
    /// Any other failure, optionally classified for retry.
    Other(Option<ErrorKind>),
}

/// Failure reported by a [`Transport`] or while reading its response.
#[derive(Debug)]
pub struct TransportError {
    kind: TransportErrorKind,
    meta: ErrorMetadata,
    retry_kind: Option<ErrorKind>,
    source: Option<BoxError>,
}

impl TransportError {
    fn new(kind: TransportErrorKind, retry_kind: Option<ErrorKind>) -> Self {
        Self {
            kind,
            meta: ErrorMetadata::default(),
            retry_kind,
            source: None,
        }
    }

    /// A timeout. Retryable.
    pub fn timeout(source: impl Into<BoxError>) -> Self {
        Self::new(TransportErrorKind::Timeout, Some(ErrorKind::TransientError))
            .with_source(source)
    }

    /// A socket-level failure. Retryable.
    pub fn io(source: impl Into<BoxError>) -> Self {
        Self::new(TransportErrorKind::Io, Some(ErrorKind::TransientError)).with_source(source)
    }

    /// A signing failure such as missing credentials. Not retryable.
    pub fn signing(source: impl Into<BoxError>) -> Self {
        Self::new(TransportErrorKind::Signing, None).with_source(source)
    }

    /// An error response from the service.
    ///
    /// Retryability is derived from the HTTP status unless set with
    /// [`with_retry_kind`](Self::with_retry_kind).
    pub fn service(status: u16, meta: ErrorMetadata) -> Self {
        Self::new(
            TransportErrorKind::Service { status },
            ErrorKind::from_status(status),
        )
        .with_meta(meta)
    }

    /// Any other failure.
    pub fn other(source: impl Into<BoxError>, retry_kind: Option<ErrorKind>) -> Self {
        Self::new(TransportErrorKind::Other(retry_kind), retry_kind).with_source(source)
    }

    /// Replaces the code and message of this error.
    pub fn with_meta(mut self, meta: ErrorMetadata) -> Self {
        self.meta = meta;
        self
    }

    /// Overrides the retry classification of this error.
    pub fn with_retry_kind(mut self, retry_kind: Option<ErrorKind>) -> Self {
        self.retry_kind = retry_kind;
        self
    }

    fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The category of this error.
    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Returns true if the failed request may succeed when sent again.
    pub fn is_retryable(&self) -> bool {
        self.retry_kind.map(ErrorKind::is_retryable).unwrap_or(false)
    }

    /// The error code, falling back to a name for the error category.
    pub fn code(&self) -> &str {
        self.meta.code().unwrap_or(match self.kind {
            TransportErrorKind::Timeout => "Timeout",
            TransportErrorKind::Io => "IoError",
            TransportErrorKind::Signing => "SigningError",
            TransportErrorKind::Service { .. } => "ServiceError",
            TransportErrorKind::Other(_) => "TransportError",
        })
    }

    /// The error message, falling back to the source error's description.
    pub fn message(&self) -> String {
        match (self.meta.message(), &self.source) {
            (Some(message), _) => message.to_string(),
            (None, Some(source)) => source.to_string(),
            (None, None) => match self.kind {
                TransportErrorKind::Service { status } => {
                    format!("service returned HTTP {status}")
                }
                _ => "transport failure".to_string(),
            },
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err.as_ref() as _)
    }
}

impl ProvideErrorMetadata for TransportError {
    fn meta(&self) -> &ErrorMetadata {
        &self.meta
    }
}

impl ProvideErrorKind for TransportError {
    fn retryable_error_kind(&self) -> Option<ErrorKind> {
        self.retry_kind
    }

    fn code(&self) -> Option<&str> {
        Some(TransportError::code(self))
    }
}

#[cfg(test)]
mod test {
    use super::{TransportError, TransportErrorKind};
    use opcall_types::ErrorMetadata;
    use std::io;

    #[test]
    fn service_errors_are_classified_by_status() {
        let throttled = TransportError::service(
            429,
            ErrorMetadata::builder()
                .code("ThrottlingException")
                .message("Rate exceeded")
                .build(),
        );
        assert!(throttled.is_retryable());
        assert_eq!("ThrottlingException", throttled.code());
        assert_eq!("ThrottlingException: Rate exceeded", throttled.to_string());

        let not_found = TransportError::service(404, ErrorMetadata::default());
        assert!(!not_found.is_retryable());
        assert_eq!("ServiceError", not_found.code());
        assert_eq!("service returned HTTP 404", not_found.message());
        assert_eq!(TransportErrorKind::Service { status: 404 }, not_found.kind());
    }

    #[test]
    fn io_errors_are_retryable_and_keep_their_source() {
        let err = TransportError::io(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(err.is_retryable());
        assert_eq!("IoError: reset", err.to_string());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn signing_errors_are_not_retryable() {
        let err = TransportError::signing("no credentials");
        assert!(!err.is_retryable());
        assert_eq!("SigningError", err.code());
    }
}
