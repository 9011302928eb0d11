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

//! Types shared by every layer of the opcall dispatch runtime: error metadata,
//! retry classification, regions, and an environment shim for configuration loading.

pub mod error;
pub mod os_shim_internal;
pub mod region;
pub mod retry;

pub use error::ErrorMetadata;
pub use region::Region;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
