/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Entity mapping protocol for the `ddb` access layer.
//!
//! This crate provides the contract between domain entities and the items
//! stored in a DynamoDB table:
//!
//! - [`Item`] - The stored representation of a record and the names of its key attributes
//! - [`Itemizer`] - An entity that can produce its [`Item`]
//! - [`Deitemizer`] - An entity that can absorb an [`Item`] back into itself
//! - [`AttributeValueConvert`] - Convert individual values to/from DynamoDB AttributeValues
//!
//! # Example
//!
//! ```
//! use ddb_mapper_core::{attribute, Attributes, ConversionError, Deitemizer, Item, Itemizer};
//!
//! struct UserItem {
//!     pk: String,
//!     name: String,
//! }
//!
//! impl Item for UserItem {
//!     fn keys(&self) -> (&'static str, Option<&'static str>) {
//!         ("pk", None)
//!     }
//!
//!     fn to_attributes(&self) -> Result<Attributes, ConversionError> {
//!         let mut attrs = Attributes::new();
//!         ddb_mapper_core::set_attribute(&mut attrs, "pk", &self.pk)?;
//!         ddb_mapper_core::set_attribute(&mut attrs, "name", &self.name)?;
//!         Ok(attrs)
//!     }
//!
//!     fn from_attributes(mut attrs: Attributes) -> Result<Self, ConversionError> {
//!         Ok(UserItem {
//!             pk: attribute(&mut attrs, "pk")?,
//!             name: attribute(&mut attrs, "name")?,
//!         })
//!     }
//! }
//!
//! #[derive(Default)]
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! impl Itemizer for User {
//!     type Item = UserItem;
//!
//!     fn item(&self) -> Option<UserItem> {
//!         Some(UserItem { pk: format!("u#{}", self.id), name: self.name.clone() })
//!     }
//! }
//!
//! impl Deitemizer for User {
//!     fn from_item(&mut self, item: UserItem) -> Result<(), ConversionError> {
//!         self.id = item.pk.trim_start_matches("u#").to_string();
//!         self.name = item.name;
//!         Ok(())
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod convert;
pub mod error;
pub mod key;
mod traits;

pub use error::{ConversionError, ConversionErrorKind};
pub use traits::{
    attribute, set_attribute, Attributes, AttributeValueConvert, Deitemizer, Item, Itemizer,
};
