/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Type-safe DynamoDB expression builders.
//!
//! This crate builds the key-condition, condition, filter, update and
//! projection expressions of a request, together with the
//! `ExpressionAttributeNames` and `ExpressionAttributeValues` maps they refer
//! to. It can be used standalone with the low-level AWS SDK or through the
//! `ddb` access layer.
//!
//! Attribute names are always replaced by `#n<i>` placeholders and values by
//! `:v<i>` placeholders, so reserved words never need escaping.
//!
//! # Example
//!
//! ```
//! use ddb_expressions::{key, name, value, Builder};
//!
//! let expr = Builder::new()
//!     .with_key_condition(key("pk").equal("user#1"))
//!     .with_filter(name("age").greater_than(value(21)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(Some("#n0 = :v0"), expr.key_condition());
//! assert_eq!(Some("#n1 > :v1"), expr.filter());
//! ```

#![warn(missing_docs)]

mod builder;
mod condition;
mod error;
mod key_condition;
mod operand;
mod projection;
mod render;
mod update;

pub use builder::{Builder, Expression, Fragment};
pub use condition::Condition;
pub use error::BuildError;
pub use key_condition::{key, Key, KeyCondition};
pub use operand::{if_not_exists, list_append, name, size, value, Operand, Value};
pub use projection::{projection, Projection};
pub use update::Update;
