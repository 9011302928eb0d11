/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Operation path templates such as `/app/{AppId}/environment/{EnvironmentName}/components`.
//!
//! A template is parsed once, when the operation is defined. At dispatch time it is rendered
//! against the operation input and appended to the resolved endpoint.

use crate::label::{fmt_string, EncodingStrategy};
use http::Uri;
use std::borrow::Cow;
use std::collections::HashSet;

/// One `/`-separated piece of a path template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Copied into the path verbatim.
    Literal(String),
    /// Replaced by the encoded value of an input field.
    Label {
        /// Name of the input field bound to this segment.
        field: String,
        /// `{Field+}`: the value may contain `/` and span several segments.
        greedy: bool,
    },
}

/// A parsed operation path template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UriTemplate {
    template: String,
    segments: Vec<Segment>,
}

/// Error returned when a path template is malformed.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum TemplateError {
    /// Templates are absolute paths.
    #[error("path template `{template}` must start with `/`")]
    MissingLeadingSlash {
        /// The rejected template
        template: String,
    },
    /// A segment mixes literal text and braces, or contains characters not valid in a path.
    #[error("invalid segment `{segment}` in path template `{template}`")]
    InvalidSegment {
        /// The rejected template
        template: String,
        /// The offending segment
        segment: String,
    },
    /// `{}` or `{+}`.
    #[error("empty label in path template `{template}`")]
    EmptyLabel {
        /// The rejected template
        template: String,
    },
    /// The same field is bound twice.
    #[error("label `{label}` appears more than once in path template `{template}`")]
    DuplicateLabel {
        /// The rejected template
        template: String,
        /// The repeated field name
        label: String,
    },
}

/// Error returned when a template cannot be rendered into a destination URI.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The input has no value for a label field.
    #[error("no value for path label `{field}`")]
    MissingLabel {
        /// The field bound to the label
        field: String,
    },
    /// The input value for a label field is empty.
    #[error("path label `{field}` cannot be empty")]
    EmptyLabel {
        /// The field bound to the label
        field: String,
    },
    /// The base endpoint combined with the rendered path is not a valid URI.
    #[error("`{uri}` is not a valid URI")]
    InvalidUri {
        /// The rejected URI
        uri: String,
        /// Why it was rejected
        #[source]
        source: http::uri::InvalidUri,
    },
}

impl UriTemplate {
    /// Parse a path template.
    pub fn parse(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        let rest = template
            .strip_prefix('/')
            .ok_or_else(|| TemplateError::MissingLeadingSlash {
                template: template.clone(),
            })?;
        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        for raw in rest.split('/') {
            let segment = parse_segment(&template, raw)?;
            if let Segment::Label { field, .. } = &segment {
                if !seen.insert(field.clone()) {
                    return Err(TemplateError::DuplicateLabel {
                        template: template.clone(),
                        label: field.clone(),
                    });
                }
            }
            segments.push(segment);
        }
        Ok(Self { template, segments })
    }

    /// The template as originally written.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// The parsed segments, in path order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the input fields bound into the path, in path order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Label { field, .. } => Some(field.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render the path, looking up each label with `label_value`.
    pub fn render<'a>(
        &self,
        label_value: impl Fn(&str) -> Option<Cow<'a, str>>,
    ) -> Result<String, RenderError> {
        let mut path = String::with_capacity(self.template.len());
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Label { field, greedy } => {
                    let value = label_value(field).ok_or_else(|| RenderError::MissingLabel {
                        field: field.clone(),
                    })?;
                    if value.is_empty() {
                        return Err(RenderError::EmptyLabel {
                            field: field.clone(),
                        });
                    }
                    let strategy = if *greedy {
                        EncodingStrategy::Greedy
                    } else {
                        EncodingStrategy::Default
                    };
                    path.push_str(&fmt_string(value, strategy));
                }
            }
        }
        Ok(path)
    }

    /// Render the path and append it to `base`, keeping any path prefix `base` already has.
    pub fn apply<'a>(
        &self,
        base: &Uri,
        label_value: impl Fn(&str) -> Option<Cow<'a, str>>,
    ) -> Result<Uri, RenderError> {
        let path = self.render(label_value)?;
        let mut destination = String::new();
        if let Some(scheme) = base.scheme_str() {
            destination.push_str(scheme);
            destination.push_str("://");
        }
        if let Some(authority) = base.authority() {
            destination.push_str(authority.as_str());
        }
        destination.push_str(base.path().trim_end_matches('/'));
        destination.push_str(&path);
        if let Some(query) = base.query() {
            destination.push('?');
            destination.push_str(query);
        }
        destination
            .parse::<Uri>()
            .map_err(|source| RenderError::InvalidUri {
                uri: destination,
                source,
            })
    }
}

// RFC 3986 `pchar`, plus `%` for pre-encoded literals.
fn is_pchar(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@%".contains(c)
}

fn parse_segment(template: &str, raw: &str) -> Result<Segment, TemplateError> {
    let invalid = || TemplateError::InvalidSegment {
        template: template.to_string(),
        segment: raw.to_string(),
    };
    if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        let (field, greedy) = match inner.strip_suffix('+') {
            Some(field) => (field, true),
            None => (inner, false),
        };
        if field.is_empty() {
            return Err(TemplateError::EmptyLabel {
                template: template.to_string(),
            });
        }
        if field.contains(['{', '}', '+']) {
            return Err(invalid());
        }
        return Ok(Segment::Label {
            field: field.to_string(),
            greedy,
        });
    }
    if !raw.chars().all(is_pchar) {
        return Err(invalid());
    }
    Ok(Segment::Literal(raw.to_string()))
}
