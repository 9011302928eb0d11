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

//! Test doubles for code built on `opcall-http`.
//!
//! [`CaptureTransport`] records every request it is given and answers with a canned response.
//! [`CountingEndpointResolver`] counts how often endpoint resolution ran.

mod capture;
mod resolver;

pub use capture::{CaptureTransport, CapturedRequest};
pub use resolver::CountingEndpointResolver;
