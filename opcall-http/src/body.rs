/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Fully loaded request and response bodies.

use bytes::Bytes;
use std::fmt::{Debug, Formatter};

/// An in-memory HTTP body.
///
/// Operation payloads are serialized before dispatch and responses are read to the end by the
/// transport, so the body is always loaded. Cloning is cheap: the bytes are reference counted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Body(Bytes);

impl Body {
    /// An empty body.
    pub fn empty() -> Self {
        Self(Bytes::new())
    }

    /// Returns the bytes of this body.
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of this body in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if this body has no content.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes this body, returning the underlying bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(text) => f.debug_tuple("Body").field(&text).finish(),
            Err(_) => write!(f, "Body({} bytes)", self.0.len()),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(data: Vec<u8>) -> Self {
        Self(data.into())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self(Bytes::from_static(s.as_bytes()))
    }
}

impl From<&'static [u8]> for Body {
    fn from(data: &'static [u8]) -> Self {
        Self(Bytes::from_static(data))
    }
}
