/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Operation records: everything the dispatcher needs to know about one API operation.

use crate::validate::RequiredFieldValidator;
use http::header::HeaderValue;
use http::Method;
use opcall_http::body::Body;
use opcall_http::signing::SigningScheme;
use opcall_http::transport::{HttpResponse, TransportError};
use opcall_http::uri_template::{TemplateError, UriTemplate};
use opcall_types::BoxError;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// The input of an operation.
///
/// Fields are addressed by their wire name (for example `"EnvironmentName"`). A field that was
/// never provided is unset, even if its type has a default value.
pub trait OperationInput: Clone + fmt::Debug + Send + Sync + 'static {
    /// Returns true if `field` was provided by the caller.
    fn is_set(&self, field: &str) -> bool;

    /// The string form of `field`, used for path labels and endpoint context parameters.
    ///
    /// Inputs whose operation binds fields into its path must return a value for each of them.
    /// A set field without a label value is reported as missing.
    fn label(&self, field: &str) -> Option<Cow<'_, str>> {
        let _ = field;
        None
    }

    /// Serialize the request body.
    fn serialize_payload(&self) -> Result<Body, BoxError> {
        Ok(Body::empty())
    }
}

/// The output of an operation.
pub trait OperationOutput: Sized + Send + 'static {
    /// Parse a raw response. Service errors are reported as [`TransportError`]s.
    fn parse_response(response: &HttpResponse) -> Result<Self, TransportError>;
}

/// Error returned when an operation record is declared incorrectly.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The path template could not be parsed.
    #[error(transparent)]
    UriTemplate(#[from] TemplateError),
    /// The content type is not a valid header value.
    #[error("`{content_type}` is not a valid content type")]
    InvalidContentType {
        /// The rejected content type
        content_type: String,
    },
}

struct Inner {
    name: Cow<'static, str>,
    service: Cow<'static, str>,
    method: Method,
    signing_scheme: SigningScheme,
    uri_template: UriTemplate,
    content_type: Option<HeaderValue>,
    validator: RequiredFieldValidator,
    context_params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

/// A declared API operation taking `I` and producing `O`.
///
/// Built once, usually into a `static` or a `LazyLock`, and shared by every call. Cloning is cheap.
pub struct Operation<I, O> {
    inner: Arc<Inner>,
    _types: PhantomData<fn(I) -> O>,
}

impl<I, O> Clone for Operation<I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _types: PhantomData,
        }
    }
}

impl<I, O> fmt::Debug for Operation<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.inner.name)
            .field("service", &self.inner.service)
            .field("method", &self.inner.method)
            .field("signing_scheme", &self.inner.signing_scheme)
            .field("uri_template", &self.inner.uri_template.as_str())
            .field("required_fields", &self.inner.validator.fields())
            .finish()
    }
}

impl<I, O> Operation<I, O> {
    /// Start declaring the operation `name` of `service`.
    pub fn builder(
        name: impl Into<Cow<'static, str>>,
        service: impl Into<Cow<'static, str>>,
    ) -> Builder<I, O> {
        Builder {
            name: name.into(),
            service: service.into(),
            method: Method::POST,
            signing_scheme: SigningScheme::SIGV4,
            uri_template: Cow::Borrowed("/"),
            content_type: None,
            required_fields: Vec::new(),
            context_params: Vec::new(),
            _types: PhantomData,
        }
    }

    /// The operation name, e.g. `CreateComponent`.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The name of the service the operation belongs to.
    pub fn service(&self) -> &str {
        &self.inner.service
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.inner.method
    }

    /// How requests for this operation are signed.
    pub fn signing_scheme(&self) -> SigningScheme {
        self.inner.signing_scheme
    }

    /// The path appended to the resolved endpoint.
    pub fn uri_template(&self) -> &UriTemplate {
        &self.inner.uri_template
    }

    /// The `Content-Type` sent with non-empty bodies.
    pub fn content_type(&self) -> Option<&HeaderValue> {
        self.inner.content_type.as_ref()
    }

    /// Required fields, explicitly declared ones first, then path labels.
    pub fn required_fields(&self) -> &[Cow<'static, str>] {
        self.inner.validator.fields()
    }

    pub(crate) fn validator(&self) -> &RequiredFieldValidator {
        &self.inner.validator
    }

    /// Endpoint context parameters as `(parameter name, input field)` pairs.
    pub fn context_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .context_params
            .iter()
            .map(|(param, field)| (param.as_ref(), field.as_ref()))
    }
}

/// Builder for [`Operation`].
///
/// Defaults to `POST /`, signed with SigV4, with no required fields.
pub struct Builder<I, O> {
    name: Cow<'static, str>,
    service: Cow<'static, str>,
    method: Method,
    signing_scheme: SigningScheme,
    uri_template: Cow<'static, str>,
    content_type: Option<Cow<'static, str>>,
    required_fields: Vec<Cow<'static, str>>,
    context_params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    _types: PhantomData<fn(I) -> O>,
}

impl<I, O> fmt::Debug for Builder<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("name", &self.name)
            .field("service", &self.service)
            .field("method", &self.method)
            .field("uri_template", &self.uri_template)
            .finish()
    }
}

impl<I, O> Builder<I, O> {
    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the signing scheme.
    pub fn signing_scheme(mut self, signing_scheme: SigningScheme) -> Self {
        self.signing_scheme = signing_scheme;
        self
    }

    /// Set the path template, e.g. `/app/{AppId}/environment/{EnvironmentName}/components`.
    pub fn uri_template(mut self, uri_template: impl Into<Cow<'static, str>>) -> Self {
        self.uri_template = uri_template.into();
        self
    }

    /// Set the `Content-Type` of request bodies.
    pub fn content_type(mut self, content_type: impl Into<Cow<'static, str>>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add a required field.
    pub fn required_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.required_fields.push(field.into());
        self
    }

    /// Add several required fields, in the order they are checked.
    pub fn required_fields(mut self, fields: &[&'static str]) -> Self {
        self.required_fields
            .extend(fields.iter().map(|field| Cow::Borrowed(*field)));
        self
    }

    /// Pass the value of input `field` to the endpoint resolver as context parameter `param`.
    pub fn context_param(
        mut self,
        param: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.context_params.push((param.into(), field.into()));
        self
    }

    /// Build the operation.
    ///
    /// Fields bound into the path become required if they aren't already.
    pub fn build(self) -> Result<Operation<I, O>, BuildError> {
        let uri_template = UriTemplate::parse(self.uri_template.into_owned())?;
        let content_type = self
            .content_type
            .map(|content_type| {
                HeaderValue::from_str(&content_type).map_err(|_| BuildError::InvalidContentType {
                    content_type: content_type.into_owned(),
                })
            })
            .transpose()?;
        let mut required_fields = Vec::with_capacity(self.required_fields.len());
        for field in self.required_fields {
            if !required_fields.contains(&field) {
                required_fields.push(field);
            }
        }
        let path_labels: Vec<Cow<'static, str>> = uri_template
            .labels()
            .map(|label| Cow::Owned(label.to_string()))
            .collect();
        for label in &path_labels {
            if !required_fields.contains(label) {
                required_fields.push(label.clone());
            }
        }
        Ok(Operation {
            inner: Arc::new(Inner {
                name: self.name,
                service: self.service,
                method: self.method,
                signing_scheme: self.signing_scheme,
                uri_template,
                content_type,
                validator: RequiredFieldValidator::new(required_fields)
                    .with_path_labels(path_labels),
                context_params: self.context_params,
            }),
            _types: PhantomData,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{BuildError, Operation};
    use http::Method;
    use opcall_http::signing::SigningScheme;

    type Op = Operation<(), ()>;

    #[test]
    fn path_labels_are_appended_to_required_fields() {
        let op = Op::builder("CreateComponent", "amplifyuibuilder")
            .uri_template("/app/{AppId}/environment/{EnvironmentName}/components")
            .required_fields(&["EnvironmentName", "ClientToken"])
            .build()
            .unwrap();
        let fields: Vec<_> = op.required_fields().iter().map(|f| f.as_ref()).collect();
        assert_eq!(vec!["EnvironmentName", "ClientToken", "AppId"], fields);
    }

    #[test]
    fn duplicate_required_fields_are_checked_once() {
        let op = Op::builder("Op", "svc")
            .required_field("A")
            .required_field("A")
            .build()
            .unwrap();
        assert_eq!(1, op.required_fields().len());
    }

    #[test]
    fn defaults() {
        let op = Op::builder("Op", "svc").build().unwrap();
        assert_eq!(&Method::POST, op.method());
        assert_eq!(SigningScheme::SIGV4, op.signing_scheme());
        assert_eq!("/", op.uri_template().as_str());
        assert!(op.content_type().is_none());
        assert_eq!(0, op.context_params().count());
    }

    #[test]
    fn malformed_templates_are_rejected() {
        let err = Op::builder("Op", "svc")
            .uri_template("/tags/{ResourceArn")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UriTemplate(_)), "{err:?}");
    }

    #[test]
    fn invalid_content_types_are_rejected() {
        let err = Op::builder("Op", "svc")
            .content_type("application/json\n")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidContentType { .. }), "{err:?}");
    }
}
