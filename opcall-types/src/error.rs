/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Generic error metadata

use std::fmt;

/// Trait to retrieve error metadata from an error
pub trait ProvideErrorMetadata {
    /// Returns error metadata, which includes the error code and message.
    fn meta(&self) -> &ErrorMetadata;

    /// Returns the error code if it's available.
    fn code(&self) -> Option<&str> {
        self.meta().code()
    }

    /// Returns the error message, if there is one.
    fn message(&self) -> Option<&str> {
        self.meta().message()
    }
}

/// Error code and message attached to every error surfaced by a dispatch.
///
/// Modeled services return a code (for example `ResourceNotFoundException`) and a
/// human readable message. Errors raised locally by the dispatcher use the same
/// shape so callers can inspect every failure uniformly.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct ErrorMetadata {
    code: Option<String>,
    message: Option<String>,
}

/// Builder for [`ErrorMetadata`].
#[derive(Debug, Default)]
pub struct Builder {
    inner: ErrorMetadata,
}

impl Builder {
    /// Sets the error message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.inner.message = Some(message.into());
        self
    }

    /// Sets the error code.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.inner.code = Some(code.into());
        self
    }

    /// Creates the error metadata.
    pub fn build(self) -> ErrorMetadata {
        self.inner
    }
}

impl ErrorMetadata {
    /// Returns the error code.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the error message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Creates an `ErrorMetadata` builder.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Converts an `ErrorMetadata` into a builder.
    pub fn into_builder(self) -> Builder {
        Builder { inner: self }
    }
}

impl ProvideErrorMetadata for ErrorMetadata {
    fn meta(&self) -> &ErrorMetadata {
        self
    }
}

impl fmt::Display for ErrorMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.message()) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (Some(code), None) => write!(f, "{code}"),
            (None, Some(message)) => write!(f, "{message}"),
            (None, None) => write!(f, "unhandled error"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ErrorMetadata;

    #[test]
    fn display_combines_code_and_message() {
        let meta = ErrorMetadata::builder()
            .code("ThrottlingException")
            .message("slow down")
            .build();
        assert_eq!("ThrottlingException: slow down", format!("{}", meta));
        assert_eq!("unhandled error", format!("{}", ErrorMetadata::default()));
    }

    #[test]
    fn into_builder_keeps_existing_fields() {
        let meta = ErrorMetadata::builder()
            .code("Code")
            .build()
            .into_builder()
            .message("added later")
            .build();
        assert_eq!(Some("Code"), meta.code());
        assert_eq!(Some("added later"), meta.message());
    }
}
