/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! This module defines types that describe whether a failed call may be retried.
//!
//! The dispatcher never retries on its own. These types only classify failures so
//! that a retry policy living outside the dispatcher can make the decision.

/// Classification of a failure for the purpose of retrying.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    /// This is a connection level error such as a socket timeout, socket connect error,
    /// tls negotiation timeout etc...
    ///
    /// Typically these should never be applied for non-idempotent request types
    /// since in this scenario, it's impossible to know whether the operation had
    /// a side effect on the server.
    TransientError,

    /// An error where the server explicitly told the client to back off, such as a 429 or 503
    /// HTTP error.
    ThrottlingError,

    /// Server error that isn't explicitly throttling but is considered by the client
    /// to be something that should be retried.
    ServerError,

    /// Doesn't count against any budgets. This could be something like a 401 challenge in Http.
    ClientError,
}

impl ErrorKind {
    /// Returns true if a failure of this kind may succeed when attempted again.
    pub fn is_retryable(self) -> bool {
        !matches!(self, ErrorKind::ClientError)
    }

    /// Classify an HTTP status code, if it maps to a retryable kind.
    pub fn from_status(status: u16) -> Option<ErrorKind> {
        match status {
            429 => Some(ErrorKind::ThrottlingError),
            500 | 502 | 503 | 504 => Some(ErrorKind::ServerError),
            400..=499 => Some(ErrorKind::ClientError),
            _ => None,
        }
    }
}

/// Implemented by errors that know their own [`ErrorKind`].
pub trait ProvideErrorKind {
    /// Returns the `ErrorKind`.
    ///
    /// If the error kind cannot be determined (eg. the error is unmodeled and the error kind
    /// depends on an HTTP status code), return `None`.
    fn retryable_error_kind(&self) -> Option<ErrorKind>;

    /// Returns the `code` for this error if one exists
    fn code(&self) -> Option<&str>;
}
