/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Client configuration.

use crate::error::ConfigError;
use opcall_async::rt::executor::{default_executor, Executor, SharedExecutor};
use opcall_http::endpoint::{RegionalEndpointResolver, ResolveEndpoint, SharedEndpointResolver};
use opcall_http::transport::{SharedTransport, Transport};
use opcall_types::os_shim_internal::Env;
use opcall_types::Region;
use std::borrow::Cow;

/// Configuration shared by every operation of a client.
#[derive(Clone, Debug)]
pub struct Config {
    service: Option<Cow<'static, str>>,
    region: Option<Region>,
    endpoint_url: Option<String>,
    endpoint_resolver: SharedEndpointResolver,
    transport: SharedTransport,
    executor: SharedExecutor,
}

impl Config {
    /// Start building a configuration.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The service name, used as the default signing name.
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// The client region.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// The custom endpoint URL passed to the endpoint resolver.
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    /// The endpoint resolver.
    pub fn endpoint_resolver(&self) -> &SharedEndpointResolver {
        &self.endpoint_resolver
    }

    /// The transport.
    pub fn transport(&self) -> &SharedTransport {
        &self.transport
    }

    /// The executor running non-blocking dispatches.
    pub fn executor(&self) -> &SharedExecutor {
        &self.executor
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct Builder {
    service: Option<Cow<'static, str>>,
    region: Option<Region>,
    endpoint_url: Option<String>,
    endpoint_resolver: Option<SharedEndpointResolver>,
    transport: Option<SharedTransport>,
    executor: Option<SharedExecutor>,
}

impl Builder {
    /// Load the region and endpoint URL from the environment.
    ///
    /// The region is read from `AWS_REGION`, falling back to `AWS_DEFAULT_REGION`. The endpoint
    /// URL is read from `AWS_ENDPOINT_URL`. Empty values are ignored.
    pub fn from_env(env: &Env) -> Self {
        let region = env
            .get_non_empty("AWS_REGION")
            .or_else(|| env.get_non_empty("AWS_DEFAULT_REGION"))
            .map(Region::new);
        let mut builder = Self::default();
        builder
            .set_region(region)
            .set_endpoint_url(env.get_non_empty("AWS_ENDPOINT_URL"));
        builder
    }

    /// Set the service name.
    ///
    /// The service name is the default signing name and, when no endpoint resolver is set,
    /// selects the default [`RegionalEndpointResolver`].
    pub fn service(mut self, service: impl Into<Cow<'static, str>>) -> Self {
        self.set_service(Some(service.into()));
        self
    }

    /// Set the service name.
    pub fn set_service(&mut self, service: Option<Cow<'static, str>>) -> &mut Self {
        self.service = service;
        self
    }

    /// Set the region.
    pub fn region(mut self, region: impl Into<Option<Region>>) -> Self {
        self.set_region(region.into());
        self
    }

    /// Set the region.
    pub fn set_region(&mut self, region: Option<Region>) -> &mut Self {
        self.region = region;
        self
    }

    /// Set a custom endpoint URL.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.set_endpoint_url(Some(endpoint_url.into()));
        self
    }

    /// Set a custom endpoint URL.
    pub fn set_endpoint_url(&mut self, endpoint_url: Option<String>) -> &mut Self {
        self.endpoint_url = endpoint_url;
        self
    }

    /// Set the endpoint resolver.
    pub fn endpoint_resolver(mut self, resolver: impl ResolveEndpoint + 'static) -> Self {
        self.set_endpoint_resolver(Some(SharedEndpointResolver::new(resolver)));
        self
    }

    /// Set the endpoint resolver.
    pub fn set_endpoint_resolver(&mut self, resolver: Option<SharedEndpointResolver>) -> &mut Self {
        self.endpoint_resolver = resolver;
        self
    }

    /// Set the transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.set_transport(Some(SharedTransport::new(transport)));
        self
    }

    /// Set the transport.
    pub fn set_transport(&mut self, transport: Option<SharedTransport>) -> &mut Self {
        self.transport = transport;
        self
    }

    /// Set the executor for non-blocking dispatches.
    pub fn executor(mut self, executor: impl Executor + 'static) -> Self {
        self.set_executor(Some(SharedExecutor::new(executor)));
        self
    }

    /// Set the executor for non-blocking dispatches.
    pub fn set_executor(&mut self, executor: Option<SharedExecutor>) -> &mut Self {
        self.executor = executor;
        self
    }

    /// Build the configuration.
    ///
    /// Without an explicit endpoint resolver, a [`RegionalEndpointResolver`] for the service is
    /// used. Without an explicit executor, a new thread pool is started.
    pub fn build(self) -> Result<Config, ConfigError> {
        let transport = self.transport.ok_or(ConfigError::MissingTransport)?;
        let endpoint_resolver = match (self.endpoint_resolver, &self.service) {
            (Some(resolver), _) => resolver,
            (None, Some(service)) => {
                SharedEndpointResolver::new(RegionalEndpointResolver::new(service.clone()))
            }
            (None, None) => return Err(ConfigError::MissingEndpointResolver),
        };
        let executor = match self.executor {
            Some(executor) => executor,
            None => default_executor()?,
        };
        Ok(Config {
            service: self.service,
            region: self.region,
            endpoint_url: self.endpoint_url,
            endpoint_resolver,
            transport,
            executor,
        })
    }
}

#[cfg(test)]
mod test {
    use super::Builder;
    use crate::error::ConfigError;
    use crate::Config;
    use opcall_async::test_util::InlineExecutor;
    use opcall_http::endpoint::{EndpointParams, ResolveEndpoint, StaticUriEndpointResolver};
    use opcall_test_helpers::CaptureTransport;
    use opcall_types::os_shim_internal::Env;
    use opcall_types::Region;

    #[test]
    fn region_falls_back_to_default_region() {
        let env = Env::from_slice(&[("AWS_DEFAULT_REGION", "eu-west-1")]);
        let conf = Builder::from_env(&env)
            .service("ivs")
            .transport(CaptureTransport::new())
            .executor(InlineExecutor::new())
            .build()
            .unwrap();
        assert_eq!(Some(&Region::new("eu-west-1")), conf.region());
        assert_eq!(None, conf.endpoint_url());
    }

    #[test]
    fn aws_region_wins_over_default_region() {
        let env = Env::from_slice(&[
            ("AWS_REGION", "us-west-2"),
            ("AWS_DEFAULT_REGION", "eu-west-1"),
            ("AWS_ENDPOINT_URL", "http://localhost:4566"),
        ]);
        let builder = Builder::from_env(&env);
        let conf = builder
            .service("ivs")
            .transport(CaptureTransport::new())
            .executor(InlineExecutor::new())
            .build()
            .unwrap();
        assert_eq!(Some(&Region::new("us-west-2")), conf.region());
        assert_eq!(Some("http://localhost:4566"), conf.endpoint_url());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let env = Env::from_slice(&[("AWS_REGION", " "), ("AWS_ENDPOINT_URL", "")]);
        let conf = Builder::from_env(&env)
            .service("ivs")
            .transport(CaptureTransport::new())
            .executor(InlineExecutor::new())
            .build()
            .unwrap();
        assert_eq!(None, conf.region());
        assert_eq!(None, conf.endpoint_url());
    }

    #[test]
    fn a_resolver_or_a_service_is_required() {
        let err = Config::builder()
            .transport(CaptureTransport::new())
            .executor(InlineExecutor::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEndpointResolver), "{err}");
    }

    #[test]
    fn a_transport_is_required() {
        let err = Config::builder()
            .service("ivs")
            .executor(InlineExecutor::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingTransport), "{err}");
    }

    #[test]
    fn service_selects_the_regional_resolver() {
        let conf = Config::builder()
            .service("ivs")
            .transport(CaptureTransport::new())
            .executor(InlineExecutor::new())
            .build()
            .unwrap();
        let params = EndpointParams::new().with_region(Some(Region::from_static("us-west-2")));
        let endpoint = conf.endpoint_resolver().resolve_endpoint(&params).unwrap();
        assert_eq!("https://ivs.us-west-2.amazonaws.com", endpoint.url());
    }

    #[test]
    fn explicit_resolver_wins_over_the_regional_default() {
        let conf = Config::builder()
            .service("ivs")
            .endpoint_resolver(StaticUriEndpointResolver::http_localhost(8080))
            .transport(CaptureTransport::new())
            .executor(InlineExecutor::new())
            .build()
            .unwrap();
        let endpoint = conf
            .endpoint_resolver()
            .resolve_endpoint(&EndpointParams::new())
            .unwrap();
        assert_eq!("http://localhost:8080", endpoint.url());
    }

    #[test]
    fn default_executor_is_started_when_none_is_set() {
        Config::builder()
            .service("ivs")
            .transport(CaptureTransport::new())
            .build()
            .unwrap();
    }
}
