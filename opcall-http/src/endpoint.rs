/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Endpoint resolution
//!
//! An endpoint resolver turns the client configuration (region, custom endpoint URL) plus
//! context parameters taken from the operation input into the base URI of a request.

use opcall_types::{BoxError, Region};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

mod regional;

pub use regional::RegionalEndpointResolver;

/// Result of resolving an endpoint.
pub type Result = std::result::Result<Endpoint, ResolveEndpointError>;

/// Resolves an [`Endpoint`] from [`EndpointParams`].
///
/// Resolvers are shared by every dispatch issued through a client and may be called from many
/// threads at once. Resolution is never retried by the dispatcher.
pub trait ResolveEndpoint: Send + Sync {
    /// Resolve the endpoint for a single request.
    fn resolve_endpoint(&self, params: &EndpointParams) -> Result;
}

// Implement the resolver trait for all closures and functions that take
// `&EndpointParams` and return a `Result<Endpoint, ResolveEndpointError>`
impl<F> ResolveEndpoint for F
where
    F: Fn(&EndpointParams) -> Result + Send + Sync,
{
    fn resolve_endpoint(&self, params: &EndpointParams) -> Result {
        (self)(params)
    }
}

/// Wrapper type for sharable `ResolveEndpoint`
#[derive(Clone)]
pub struct SharedEndpointResolver(Arc<dyn ResolveEndpoint>);

impl SharedEndpointResolver {
    /// Create a new `SharedEndpointResolver` from `ResolveEndpoint`
    pub fn new(resolver: impl ResolveEndpoint + 'static) -> Self {
        Self(Arc::new(resolver))
    }
}

impl fmt::Debug for SharedEndpointResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedEndpointResolver")
    }
}

impl From<Arc<dyn ResolveEndpoint>> for SharedEndpointResolver {
    fn from(resolver: Arc<dyn ResolveEndpoint>) -> Self {
        Self(resolver)
    }
}

impl ResolveEndpoint for SharedEndpointResolver {
    fn resolve_endpoint(&self, params: &EndpointParams) -> Result {
        self.0.resolve_endpoint(params)
    }
}

/// Inputs to endpoint resolution.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EndpointParams {
    region: Option<Region>,
    endpoint_url: Option<String>,
    context: BTreeMap<Cow<'static, str>, String>,
}

impl EndpointParams {
    /// Creates empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the region configured on the client.
    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    /// Sets the custom endpoint URL configured on the client.
    pub fn with_endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url;
        self
    }

    /// Adds a context parameter taken from the operation input.
    pub fn with_context(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<String>,
    ) -> Self {
        self.context.insert(name.into(), value.into());
        self
    }

    /// The client region.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// The custom endpoint URL, when one is configured.
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    /// Look up a context parameter.
    pub fn context(&self, name: &str) -> Option<&str> {
        self.context.get(name).map(String::as_str)
    }

    /// All context parameters, ordered by name.
    pub fn context_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.context.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }
}

/// Region and service a signature should be scoped to, when the endpoint dictates them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CredentialScope {
    region: Option<Region>,
    service: Option<Cow<'static, str>>,
}

impl CredentialScope {
    /// Signing region override.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Signing name override.
    pub fn service(&self) -> Option<&Cow<'static, str>> {
        self.service.as_ref()
    }
}

/// A resolved endpoint: the base URI of a request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Endpoint {
    url: String,
    credential_scope: CredentialScope,
}

impl Endpoint {
    /// Returns a builder for `Endpoint`.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The base URL. Operation paths are appended to it.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Signing scope dictated by this endpoint.
    pub fn credential_scope(&self) -> &CredentialScope {
        &self.credential_scope
    }
}

/// Builder for [`Endpoint`].
#[derive(Debug, Default)]
pub struct Builder {
    url: String,
    credential_scope: CredentialScope,
}

impl Builder {
    /// Sets the base URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the signing region override.
    pub fn signing_region(mut self, region: impl Into<Option<Region>>) -> Self {
        self.credential_scope.region = region.into();
        self
    }

    /// Sets the signing name override.
    pub fn signing_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.credential_scope.service = Some(name.into());
        self
    }

    /// Builds the endpoint.
    pub fn build(self) -> Endpoint {
        Endpoint {
            url: self.url,
            credential_scope: self.credential_scope,
        }
    }
}

/// Endpoint resolution error
#[derive(Debug)]
pub struct ResolveEndpointError {
    message: String,
    source: Option<BoxError>,
}

impl ResolveEndpointError {
    /// Create an [`ResolveEndpointError`] with a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Add a source to the error
    pub fn with_source(self, source: Option<BoxError>) -> Self {
        Self { source, ..self }
    }

    /// The message describing why resolution failed.
    pub fn as_message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ResolveEndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ResolveEndpointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err.as_ref() as _)
    }
}

/// An endpoint resolver that uses a static URI.
#[derive(Clone, Debug)]
pub struct StaticUriEndpointResolver {
    endpoint: String,
}

impl StaticUriEndpointResolver {
    /// Create a resolver that resolves to `http://localhost:{port}`.
    pub fn http_localhost(port: u16) -> Self {
        Self {
            endpoint: format!("http://localhost:{port}"),
        }
    }

    /// Create a resolver that resolves to the given URI.
    pub fn uri(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl ResolveEndpoint for StaticUriEndpointResolver {
    fn resolve_endpoint(&self, _params: &EndpointParams) -> Result {
        Ok(Endpoint::builder().url(self.endpoint.clone()).build())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn closures_are_resolvers() {
        let resolver = SharedEndpointResolver::new(|params: &EndpointParams| {
            match params.context("Bucket") {
                Some(bucket) => Ok(Endpoint::builder()
                    .url(format!("https://{bucket}.example.com"))
                    .build()),
                None => Err(ResolveEndpointError::message("a bucket is required")),
            }
        });
        let endpoint = resolver
            .resolve_endpoint(&EndpointParams::new().with_context("Bucket", "photos"))
            .unwrap();
        assert_eq!("https://photos.example.com", endpoint.url());

        let err = resolver
            .resolve_endpoint(&EndpointParams::new())
            .expect_err("no bucket");
        assert_eq!("a bucket is required", err.to_string());
    }

    #[test]
    fn static_resolver_ignores_params() {
        let resolver = StaticUriEndpointResolver::http_localhost(8080);
        let endpoint = resolver
            .resolve_endpoint(&EndpointParams::new().with_region(Some(Region::new("us-east-1"))))
            .unwrap();
        assert_eq!("http://localhost:8080", endpoint.url());
        assert_eq!(&CredentialScope::default(), endpoint.credential_scope());
    }
}
