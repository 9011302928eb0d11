/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Signing scheme identifiers and the signing context handed to the transport.
//!
//! Signing itself is performed by the transport. The dispatcher only decides which scheme
//! applies and which region/service the signature is scoped to.

use opcall_types::Region;
use std::borrow::Cow;
use std::fmt;

/// Identifies a request authentication scheme such as SigV4.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SigningScheme(&'static str);

impl SigningScheme {
    /// AWS Signature Version 4
    pub const SIGV4: SigningScheme = SigningScheme::new("sigv4");
    /// AWS Signature Version 4, multi-region (asymmetric)
    pub const SIGV4A: SigningScheme = SigningScheme::new("sigv4a");
    /// HTTP bearer token
    pub const BEARER: SigningScheme = SigningScheme::new("httpBearerAuth");
    /// The request is sent unsigned
    pub const NO_AUTH: SigningScheme = SigningScheme::new("noAuth");

    /// Creates a new scheme identifier.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Returns the string form of this identifier.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Everything the transport needs to sign one request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigningContext {
    scheme: SigningScheme,
    region: Option<Region>,
    name: Option<Cow<'static, str>>,
}

impl SigningContext {
    /// Creates a signing context for `scheme` with no region or service name.
    pub fn new(scheme: SigningScheme) -> Self {
        Self {
            scheme,
            region: None,
            name: None,
        }
    }

    /// Sets the signing region.
    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    /// Sets the signing name, usually the service name.
    pub fn with_name(mut self, name: Option<Cow<'static, str>>) -> Self {
        self.name = name;
        self
    }

    /// The scheme to sign with.
    pub fn scheme(&self) -> SigningScheme {
        self.scheme
    }

    /// The region the signature is scoped to.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// The service name the signature is scoped to.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
