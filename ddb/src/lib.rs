/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Typed access layer over DynamoDB.
//!
//! Domain entities describe their stored form through the
//! [`Itemizer`]/[`Deitemizer`] traits; this crate turns them into keyed reads and
//! writes, transactions, and paginated queries and scans, all of which yield a
//! [`Cursor`].
//!
//! - [`Write`] accumulates puts, updates, deletes and condition checks and runs
//!   them as one transaction, or as a direct call when there is only one.
//! - [`Read`] does the same for gets.
//! - [`Query`] and [`Scan`] bind an [`expression::Builder`] to an input shape
//!   and page lazily through the results.
//! - Every call is raced against the [`Context`] deadline and cancellation.
//!
//! Stores are reached through the [`Dynamo`] trait, implemented for
//! [`aws_sdk_dynamodb::Client`]. [`Logged`] wraps any store to log each request.
//!
//! # Example
//!
//! ```no_run
//! # use ddb::mapper::{Attributes, ConversionError};
//! # #[derive(Default)] struct User { id: String }
//! # struct UserItem;
//! # impl ddb::Item for UserItem {
//! #     fn keys(&self) -> (&'static str, Option<&'static str>) { ("pk", None) }
//! #     fn to_attributes(&self) -> Result<Attributes, ConversionError> { Ok(Attributes::new()) }
//! #     fn from_attributes(_: Attributes) -> Result<Self, ConversionError> { Ok(UserItem) }
//! # }
//! # impl ddb::Itemizer for User { type Item = UserItem; fn item(&self) -> Option<UserItem> { Some(UserItem) } }
//! # impl ddb::Deitemizer for User { fn from_item(&mut self, _: UserItem) -> Result<(), ConversionError> { Ok(()) } }
//! # async fn example(client: aws_sdk_dynamodb::Client) -> Result<(), ddb::Error> {
//! use std::time::Duration;
//! use aws_sdk_dynamodb::operation::scan::builders::ScanInputBuilder;
//! use aws_sdk_dynamodb::types::Put;
//! use ddb::expression::{name, Builder};
//! use ddb::{Context, Scan};
//!
//! let cx = Context::new().with_timeout(Duration::from_secs(5));
//! let store = ddb::Logged::new(client);
//!
//! let create = Builder::new().with_condition(name("pk").attribute_not_exists());
//! ddb::put(create, Put::builder().table_name("users"), &User::default())?
//!     .run(&cx, &store)
//!     .await?;
//!
//! let cursor = Scan::new(Builder::new(), ScanInputBuilder::default().table_name("users"))
//!     .run(&cx, &store)?;
//! let mut users: Vec<User> = Vec::new();
//! ddb::drain_all(cursor, &mut users).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
mod context;
mod dynamo;
mod error;
mod logging;
mod op;
mod query;
mod read;
mod result;
mod scan;
mod single;
mod unmarshal;
mod write;

#[cfg(test)]
mod test_util;

pub use config::Config;
pub use context::Context;
pub use dynamo::{future, Dynamo};
pub use error::{BoxError, CallError, Error};
pub use logging::{LogSink, Logged, TracingSink};
pub use op::OperationKind;
pub use query::Query;
pub use read::{get, Read};
pub use result::Cursor;
pub use scan::Scan;
pub use unmarshal::drain_all;
pub use write::{check, delete, put, update, Write};

pub use ddb_expressions as expression;
pub use ddb_mapper_core as mapper;
pub use ddb_mapper_core::{Deitemizer, Item, Itemizer};
