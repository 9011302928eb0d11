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

//! A generic dispatcher for request/response API operations.
//!
//! Every operation of a generated service client follows the same template: check that the
//! required input fields are set, resolve an endpoint, append the operation's path, hand the
//! request to a signing transport, and wrap the response in an [`Outcome`]. This crate
//! implements that template once. An operation is a small data record ([`Operation`]) rather
//! than generated code.
//!
//! ```rust,no_run
//! # use opcall_client::{Client, Config, Operation, OperationInput, OperationOutput};
//! # use opcall_http::transport::{HttpResponse, TransportError};
//! # use opcall_types::Region;
//! # use std::borrow::Cow;
//! # #[derive(Clone, Debug)]
//! # struct ListTagsInput {
//! #     resource_arn: Option<String>,
//! # }
//! impl OperationInput for ListTagsInput {
//!     fn is_set(&self, field: &str) -> bool {
//!         field == "ResourceArn" && self.resource_arn.is_some()
//!     }
//!
//!     fn label(&self, field: &str) -> Option<Cow<'_, str>> {
//!         match field {
//!             "ResourceArn" => self.resource_arn.as_deref().map(Cow::Borrowed),
//!             _ => None,
//!         }
//!     }
//! }
//! # struct ListTagsOutput;
//! # impl OperationOutput for ListTagsOutput {
//! #     fn parse_response(_: &HttpResponse) -> Result<Self, TransportError> {
//! #         Ok(ListTagsOutput)
//! #     }
//! # }
//! # fn transport() -> opcall_http::transport::SharedTransport { unimplemented!() }
//! let conf = Config::builder()
//!     .service("ivs")
//!     .region(Region::new("us-west-2"))
//!     .transport(transport())
//!     .build()?;
//! let client = Client::from_conf(conf);
//! let list_tags =
//!     Operation::<ListTagsInput, ListTagsOutput>::builder("ListTagsForResource", "ivs")
//!         .method(http::Method::GET)
//!         .uri_template("/tags/{ResourceArn+}")
//!         .build()?;
//! let input = ListTagsInput {
//!     resource_arn: Some("arn:aws:ivs:us-west-2:123:channel/abc".into()),
//! };
//! let outcome = client.dispatch(&list_tags, &input);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod operation;
pub mod runner;
pub mod validate;

pub use client::Client;
pub use config::Config;
pub use dispatch::OperationDispatcher;
pub use error::{DispatchError, ErrorKind, Outcome};
pub use operation::{Operation, OperationInput, OperationOutput};
pub use runner::{AsyncCallerContext, AsyncOperationRunner, OutcomeFuture};
