/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Errors surfaced by a dispatch.

use opcall_async::pending::Abandoned;
use opcall_async::rt::thread_pool;
use opcall_http::endpoint::ResolveEndpointError;
use opcall_http::transport::TransportError;
use opcall_types::error::ProvideErrorMetadata;
use opcall_types::retry::{ErrorKind as RetryKind, ProvideErrorKind};
use opcall_types::{BoxError, ErrorMetadata};
use std::error::Error;
use std::fmt;

/// Result of a single operation call: the parsed output or a [`DispatchError`].
pub type Outcome<T, E = DispatchError> = Result<T, E>;

/// Which stage of a dispatch failed.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A required input field was not set. Detected locally, before any I/O.
    MissingParameter,
    /// The endpoint resolver could not produce a destination.
    EndpointResolutionFailure,
    /// The request failed in the transport or the service returned an error.
    Transport,
}

impl ErrorKind {
    fn as_code(self) -> &'static str {
        match self {
            ErrorKind::MissingParameter => "MissingParameter",
            ErrorKind::EndpointResolutionFailure => "EndpointResolutionFailure",
            ErrorKind::Transport => "Transport",
        }
    }
}

/// The error side of an [`Outcome`].
///
/// Carries a kind tag, an error code, a message, and whether the call may succeed if made
/// again. The dispatcher never retries; `is_retryable` is information for the caller.
#[derive(Debug)]
pub struct DispatchError {
    kind: ErrorKind,
    meta: ErrorMetadata,
    field: Option<String>,
    retryable: bool,
    source: Option<BoxError>,
}

impl DispatchError {
    fn new(kind: ErrorKind, meta: ErrorMetadata, retryable: bool) -> Self {
        Self {
            kind,
            meta,
            field: None,
            retryable,
            source: None,
        }
    }

    /// The required input field `field` was not set.
    pub fn missing_parameter(field: impl Into<String>) -> Self {
        let field = field.into();
        let meta = ErrorMetadata::builder()
            .code(ErrorKind::MissingParameter.as_code())
            .message(format!("missing required field `{field}`"))
            .build();
        Self {
            field: Some(field),
            ..Self::new(ErrorKind::MissingParameter, meta, false)
        }
    }

    /// The endpoint resolver failed. Its message is kept verbatim.
    pub fn endpoint_resolution(err: ResolveEndpointError) -> Self {
        let meta = ErrorMetadata::builder()
            .code(ErrorKind::EndpointResolutionFailure.as_code())
            .message(err.as_message())
            .build();
        Self {
            source: Some(err.into()),
            ..Self::new(ErrorKind::EndpointResolutionFailure, meta, false)
        }
    }

    /// The transport, or parsing of the service response, failed.
    pub fn transport(err: TransportError) -> Self {
        let meta = ErrorMetadata::builder()
            .code(err.code())
            .message(err.message())
            .build();
        let retryable = err
            .retryable_error_kind()
            .is_some_and(RetryKind::is_retryable);
        Self {
            source: Some(err.into()),
            ..Self::new(ErrorKind::Transport, meta, retryable)
        }
    }

    pub(crate) fn serialization(err: BoxError) -> Self {
        let meta = ErrorMetadata::builder()
            .code("SerializationError")
            .message(format!("failed to serialize request: {err}"))
            .build();
        Self {
            source: Some(err),
            ..Self::new(ErrorKind::Transport, meta, false)
        }
    }

    pub(crate) fn abandoned(err: Abandoned) -> Self {
        let meta = ErrorMetadata::builder()
            .code("TaskAbandoned")
            .message(err.to_string())
            .build();
        Self {
            source: Some(err.into()),
            ..Self::new(ErrorKind::Transport, meta, false)
        }
    }

    /// Which stage of the dispatch failed.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The error code. For service errors this is the code returned by the service.
    pub fn code(&self) -> &str {
        self.meta.code().unwrap_or_else(|| self.kind.as_code())
    }

    /// A human readable description of the failure.
    pub fn message(&self) -> &str {
        self.meta.message().unwrap_or_default()
    }

    /// The missing field, for [`ErrorKind::MissingParameter`] errors.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns true if the call may succeed when made again.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err.as_ref() as _)
    }
}

impl ProvideErrorMetadata for DispatchError {
    fn meta(&self) -> &ErrorMetadata {
        &self.meta
    }
}

/// Error returned when a client configuration is incomplete.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Every client needs a transport.
    #[error("no transport was configured")]
    MissingTransport,
    /// Neither an endpoint resolver nor a service name for the default resolver was configured.
    #[error(
        "no endpoint resolver was configured, and no service name is set to build the default one"
    )]
    MissingEndpointResolver,
    /// The default executor could not be started.
    #[error("failed to start the default executor")]
    Executor(#[from] thread_pool::BuildError),
}
