/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! HTTP-level building blocks for opcall.
//!
//! This crate defines the seams between an operation dispatcher and its collaborators:
//! - [`endpoint`]: endpoint resolution interface and stock resolvers
//! - [`uri_template`] and [`label`]: operation path templates and label encoding
//! - [`transport`]: the signing HTTP transport interface
//! - [`signing`]: signing scheme identifiers handed to the transport

pub mod body;
pub mod endpoint;
pub mod label;
pub mod signing;
pub mod transport;
pub mod uri_template;
