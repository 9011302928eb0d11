/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![allow(dead_code)]

use http::Method;
use opcall_client::{Operation, OperationInput, OperationOutput};
use opcall_http::body::Body;
use opcall_http::transport::{HttpResponse, TransportError};
use opcall_types::{BoxError, ErrorMetadata};
use std::borrow::Cow;
use std::sync::LazyLock;

pub const BASE_URL: &str = "https://x.example.com";
pub const CHANNEL_ARN: &str = "arn:aws:ivs:us-west-2:123456789012:channel/abc";

#[derive(Clone, Debug, Default)]
pub struct CreateComponentInput {
    pub app_id: Option<String>,
    pub environment_name: Option<String>,
    pub client_token: Option<String>,
    pub component_name: Option<String>,
}

impl CreateComponentInput {
    pub fn complete() -> Self {
        Self {
            app_id: Some("app1".into()),
            environment_name: Some("env1".into()),
            client_token: Some("token-1".into()),
            component_name: Some("Button".into()),
        }
    }
}

impl OperationInput for CreateComponentInput {
    fn is_set(&self, field: &str) -> bool {
        match field {
            "AppId" => self.app_id.is_some(),
            "EnvironmentName" => self.environment_name.is_some(),
            "ClientToken" => self.client_token.is_some(),
            "ComponentName" => self.component_name.is_some(),
            _ => false,
        }
    }

    fn label(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "AppId" => self.app_id.as_deref().map(Cow::Borrowed),
            "EnvironmentName" => self.environment_name.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn serialize_payload(&self) -> Result<Body, BoxError> {
        Ok(format!(
            r#"{{"name":"{}"}}"#,
            self.component_name.as_deref().unwrap_or_default()
        )
        .into())
    }
}

#[derive(Debug, PartialEq)]
pub struct CreateComponentOutput {
    pub status: u16,
    pub body: String,
}

impl OperationOutput for CreateComponentOutput {
    fn parse_response(response: &HttpResponse) -> Result<Self, TransportError> {
        check_status(response)?;
        Ok(Self {
            status: response.status().as_u16(),
            body: String::from_utf8_lossy(response.body().bytes()).into_owned(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListTagsForResourceInput {
    pub resource_arn: Option<String>,
}

impl ListTagsForResourceInput {
    pub fn new(arn: &str) -> Self {
        Self {
            resource_arn: Some(arn.to_string()),
        }
    }
}

impl OperationInput for ListTagsForResourceInput {
    fn is_set(&self, field: &str) -> bool {
        field == "ResourceArn" && self.resource_arn.is_some()
    }

    fn label(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "ResourceArn" => self.resource_arn.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ListTagsForResourceOutput {
    pub tags: String,
}

impl OperationOutput for ListTagsForResourceOutput {
    fn parse_response(response: &HttpResponse) -> Result<Self, TransportError> {
        check_status(response)?;
        Ok(Self {
            tags: String::from_utf8_lossy(response.body().bytes()).into_owned(),
        })
    }
}

/// Service errors carry their code in `x-amzn-errortype` and their message in the body.
fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let mut meta = ErrorMetadata::builder();
    if let Some(code) = response
        .headers()
        .get("x-amzn-errortype")
        .and_then(|value| value.to_str().ok())
    {
        meta = meta.code(code);
    }
    if !response.body().is_empty() {
        meta = meta.message(String::from_utf8_lossy(response.body().bytes()));
    }
    Err(TransportError::service(status.as_u16(), meta.build()))
}

pub fn service_error(status: u16, code: &'static str, message: &'static str) -> HttpResponse {
    http::Response::builder()
        .status(status)
        .header("x-amzn-errortype", code)
        .body(Body::from(message))
        .unwrap()
}

static CREATE_COMPONENT: LazyLock<Operation<CreateComponentInput, CreateComponentOutput>> =
    LazyLock::new(|| {
        Operation::builder("CreateComponent", "amplifyuibuilder")
            .method(Method::POST)
            .uri_template("/app/{AppId}/environment/{EnvironmentName}/components")
            .required_fields(&["AppId", "EnvironmentName"])
            .content_type("application/json")
            .build()
            .unwrap()
    });

static LIST_TAGS_FOR_RESOURCE: LazyLock<
    Operation<ListTagsForResourceInput, ListTagsForResourceOutput>,
> = LazyLock::new(|| {
    Operation::builder("ListTagsForResource", "ivs")
        .method(Method::GET)
        .uri_template("/tags/{ResourceArn+}")
        .required_field("ResourceArn")
        .context_param("ResourceArn", "ResourceArn")
        .build()
        .unwrap()
});

pub fn create_component() -> &'static Operation<CreateComponentInput, CreateComponentOutput> {
    &CREATE_COMPONENT
}

pub fn list_tags_for_resource(
) -> &'static Operation<ListTagsForResourceInput, ListTagsForResourceOutput> {
    &LIST_TAGS_FOR_RESOURCE
}
