/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Local checks run before any endpoint resolution or I/O.

use crate::error::DispatchError;
use crate::operation::OperationInput;
use std::borrow::Cow;

/// Checks that an input provides every field an operation requires.
///
/// Fields bound into the path must also render to a non-empty label.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequiredFieldValidator {
    fields: Vec<Cow<'static, str>>,
    path_labels: Vec<Cow<'static, str>>,
}

impl RequiredFieldValidator {
    /// Create a validator checking `fields` in order.
    pub fn new(fields: Vec<Cow<'static, str>>) -> Self {
        Self {
            fields,
            path_labels: Vec::new(),
        }
    }

    /// Also require a non-empty [`label`](OperationInput::label) for each of `path_labels`.
    pub fn with_path_labels(mut self, path_labels: Vec<Cow<'static, str>>) -> Self {
        self.path_labels = path_labels;
        self
    }

    /// The fields checked, in order.
    pub fn fields(&self) -> &[Cow<'static, str>] {
        &self.fields
    }

    /// Fails with a `MissingParameter` error naming the first unset field.
    pub fn validate<I: OperationInput>(&self, input: &I) -> Result<(), DispatchError> {
        match self.fields.iter().find(|field| !self.is_provided(input, field)) {
            Some(field) => Err(DispatchError::missing_parameter(field.as_ref())),
            None => Ok(()),
        }
    }

    fn is_provided<I: OperationInput>(&self, input: &I, field: &str) -> bool {
        if !input.is_set(field) {
            return false;
        }
        if self.path_labels.iter().any(|label| label == field) {
            return input.label(field).is_some_and(|value| !value.is_empty());
        }
        true
    }
}
