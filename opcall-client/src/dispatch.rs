/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Synchronous dispatch of a single operation call.

use crate::error::{DispatchError, Outcome};
use crate::operation::{Operation, OperationInput, OperationOutput};
use crate::Config;
use http::header::CONTENT_TYPE;
use http::Uri;
use opcall_http::endpoint::{
    EndpointParams, ResolveEndpoint, ResolveEndpointError, SharedEndpointResolver,
};
use opcall_http::signing::SigningContext;
use opcall_http::transport::{HttpRequest, SharedTransport, Transport};
use opcall_http::uri_template::RenderError;
use opcall_types::Region;
use std::borrow::Cow;
use tracing::{debug, debug_span, trace};

/// Runs operation calls on the calling thread.
///
/// Each call validates the input, resolves an endpoint, appends the operation path, hands the
/// request to the transport and parses the response, in that order. Nothing is sent unless
/// validation and endpoint resolution both succeed. Nothing is retried.
#[derive(Clone, Debug)]
pub struct OperationDispatcher {
    service: Option<Cow<'static, str>>,
    region: Option<Region>,
    endpoint_url: Option<String>,
    endpoint_resolver: SharedEndpointResolver,
    transport: SharedTransport,
}

impl OperationDispatcher {
    /// Create a dispatcher with only a resolver and a transport.
    pub fn new(endpoint_resolver: SharedEndpointResolver, transport: SharedTransport) -> Self {
        Self {
            service: None,
            region: None,
            endpoint_url: None,
            endpoint_resolver,
            transport,
        }
    }

    /// Create a dispatcher from a client configuration.
    pub fn from_conf(conf: &Config) -> Self {
        Self {
            service: conf.service().map(|service| Cow::Owned(service.to_string())),
            region: conf.region().cloned(),
            endpoint_url: conf.endpoint_url().map(str::to_string),
            endpoint_resolver: conf.endpoint_resolver().clone(),
            transport: conf.transport().clone(),
        }
    }

    /// Call `operation` with `input`, blocking until the transport returns.
    pub fn dispatch<I, O>(&self, operation: &Operation<I, O>, input: &I) -> Outcome<O>
    where
        I: OperationInput,
        O: OperationOutput,
    {
        let span = debug_span!(
            "dispatch",
            operation = operation.name(),
            service = operation.service()
        );
        let _enter = span.enter();
        self.try_dispatch(operation, input).inspect_err(|err| {
            debug!(kind = ?err.kind(), code = err.code(), "dispatch failed");
        })
    }

    fn try_dispatch<I, O>(&self, operation: &Operation<I, O>, input: &I) -> Outcome<O>
    where
        I: OperationInput,
        O: OperationOutput,
    {
        trace!("validating input");
        operation.validator().validate(input)?;

        trace!("resolving endpoint");
        let params = self.endpoint_params(operation, input);
        let endpoint = self
            .endpoint_resolver
            .resolve_endpoint(&params)
            .map_err(DispatchError::endpoint_resolution)?;
        debug!(endpoint = endpoint.url(), "resolved endpoint");

        let base = parse_base(endpoint.url())?;
        let destination = operation
            .uri_template()
            .apply(&base, |field| input.label(field))
            .map_err(|err| match err {
                RenderError::MissingLabel { field } | RenderError::EmptyLabel { field } => {
                    DispatchError::missing_parameter(field)
                }
                err => DispatchError::endpoint_resolution(
                    ResolveEndpointError::message(format!(
                        "failed to append `{}` to the resolved endpoint",
                        operation.uri_template().as_str()
                    ))
                    .with_source(Some(err.into())),
                ),
            })?;
        let scope = endpoint.credential_scope();
        let signing = SigningContext::new(operation.signing_scheme())
            .with_region(scope.region().or(self.region.as_ref()).cloned())
            .with_name(
                scope
                    .service()
                    .or(self.service.as_ref())
                    .cloned()
                    .or_else(|| Some(Cow::Owned(operation.service().to_string()))),
            );

        trace!("serializing request");
        let body = input
            .serialize_payload()
            .map_err(DispatchError::serialization)?;
        let has_body = !body.is_empty();
        let mut request = HttpRequest::new(body);
        *request.method_mut() = operation.method().clone();
        *request.uri_mut() = destination;
        if let (true, Some(content_type)) = (has_body, operation.content_type()) {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, content_type.clone());
        }

        debug!(method = %request.method(), destination = %request.uri(), "sending request");
        let response = self
            .transport
            .call(request, &signing)
            .map_err(DispatchError::transport)?;
        trace!(status = response.status().as_u16(), "parsing response");
        O::parse_response(&response).map_err(DispatchError::transport)
    }

    fn endpoint_params<I, O>(&self, operation: &Operation<I, O>, input: &I) -> EndpointParams
    where
        I: OperationInput,
    {
        operation.context_params().fold(
            EndpointParams::new()
                .with_region(self.region.clone())
                .with_endpoint_url(self.endpoint_url.clone()),
            |params, (param, field)| match input.label(field) {
                Some(value) => params.with_context(param.to_string(), value.into_owned()),
                None => params,
            },
        )
    }
}

fn parse_base(url: &str) -> Result<Uri, DispatchError> {
    let invalid = |source: Option<opcall_types::BoxError>| {
        DispatchError::endpoint_resolution(
            ResolveEndpointError::message(format!(
                "resolved endpoint `{url}` is not an absolute URI"
            ))
            .with_source(source),
        )
    };
    let base = url
        .parse::<Uri>()
        .map_err(|err| invalid(Some(err.into())))?;
    if base.scheme().is_none() || base.authority().is_none() {
        return Err(invalid(None));
    }
    Ok(base)
}
