/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use super::{Endpoint, EndpointParams, ResolveEndpoint, ResolveEndpointError, Result};
use std::borrow::Cow;
use tracing::trace;

/// Resolves `https://{service}.{region}.{dns_suffix}`, or the custom endpoint URL when set.
///
/// This is the resolver a client uses when none is configured explicitly.
#[derive(Clone, Debug)]
pub struct RegionalEndpointResolver {
    service: Cow<'static, str>,
}

impl RegionalEndpointResolver {
    /// Create a resolver for the service with the given endpoint prefix, e.g. `ivs`.
    pub fn new(service: impl Into<Cow<'static, str>>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

fn dns_suffix(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        "amazonaws.com.cn"
    } else {
        "amazonaws.com"
    }
}

fn is_valid_host_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl ResolveEndpoint for RegionalEndpointResolver {
    fn resolve_endpoint(&self, params: &EndpointParams) -> Result {
        if let Some(url) = params.endpoint_url() {
            trace!(url, "using custom endpoint URL");
            return Ok(Endpoint::builder()
                .url(url)
                .signing_region(params.region().cloned())
                .build());
        }
        let region = params.region().ok_or_else(|| {
            ResolveEndpointError::message(
                "a region must be set when no custom endpoint URL is configured",
            )
        })?;
        if !is_valid_host_label(region.as_ref()) {
            return Err(ResolveEndpointError::message(format!(
                "`{region}` is not a valid region"
            )));
        }
        Ok(Endpoint::builder()
            .url(format!(
                "https://{}.{}.{}",
                self.service,
                region,
                dns_suffix(region.as_ref())
            ))
            .signing_region(region.clone())
            .signing_name(self.service.clone())
            .build())
    }
}

#[cfg(test)]
mod test {
    use super::RegionalEndpointResolver;
    use crate::endpoint::{EndpointParams, ResolveEndpoint};
    use opcall_types::Region;

    #[test]
    fn builds_regional_hostname() {
        let resolver = RegionalEndpointResolver::new("ivs");
        let params = EndpointParams::new().with_region(Some(Region::new("us-west-2")));
        let endpoint = resolver.resolve_endpoint(&params).unwrap();
        assert_eq!("https://ivs.us-west-2.amazonaws.com", endpoint.url());
        assert_eq!(
            Some(&Region::new("us-west-2")),
            endpoint.credential_scope().region()
        );
        assert_eq!(
            Some("ivs"),
            endpoint.credential_scope().service().map(|s| s.as_ref())
        );
    }

    #[test]
    fn china_regions_use_their_own_suffix() {
        let resolver = RegionalEndpointResolver::new("athena");
        let params = EndpointParams::new().with_region(Some(Region::new("cn-north-1")));
        assert_eq!(
            "https://athena.cn-north-1.amazonaws.com.cn",
            resolver.resolve_endpoint(&params).unwrap().url()
        );
    }

    #[test]
    fn custom_endpoint_url_wins() {
        let resolver = RegionalEndpointResolver::new("ivs");
        let params = EndpointParams::new()
            .with_region(Some(Region::new("us-west-2")))
            .with_endpoint_url(Some("http://localhost:4566".into()));
        assert_eq!(
            "http://localhost:4566",
            resolver.resolve_endpoint(&params).unwrap().url()
        );
    }

    #[test]
    fn missing_or_invalid_region_fails() {
        let resolver = RegionalEndpointResolver::new("ivs");
        let err = resolver
            .resolve_endpoint(&EndpointParams::new())
            .expect_err("no region");
        assert_eq!(
            "a region must be set when no custom endpoint URL is configured",
            err.to_string()
        );
        let err = resolver
            .resolve_endpoint(&EndpointParams::new().with_region(Some(Region::new("us east"))))
            .expect_err("bad region");
        assert_eq!("`us east` is not a valid region", err.to_string());
    }
}
