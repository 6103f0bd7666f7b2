/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Core traits of the entity mapping protocol.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::error::ConversionError;

/// The attributes of a single stored item, keyed by attribute name.
pub type Attributes = HashMap<String, AttributeValue>;

/// Converts individual Rust values to/from DynamoDB AttributeValues.
///
/// This trait handles conversion of single values like `String`, `i64`, `Vec<T>`, etc.
/// For converting complete records, see [`Item`].
pub trait AttributeValueConvert: Sized {
    /// Converts this value to a DynamoDB AttributeValue.
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError>;

    /// Constructs a value from a DynamoDB AttributeValue.
    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError>;

    /// Produces the value for an attribute that is absent from an item.
    ///
    /// Most types require the attribute to be present. `Option<T>` overrides this
    /// to yield `None`.
    fn missing(name: &str) -> Result<Self, ConversionError> {
        Err(ConversionError::missing_attribute(name))
    }
}

/// The stored representation of one domain record.
///
/// An item is pure data: it declares which of its attributes form the table key and
/// converts itself to and from the attribute map that DynamoDB stores.
pub trait Item: Sized {
    /// Returns the partition key attribute name and, for tables with a compound key,
    /// the sort key attribute name.
    fn keys(&self) -> (&'static str, Option<&'static str>);

    /// Converts this item to its DynamoDB attributes.
    fn to_attributes(&self) -> Result<Attributes, ConversionError>;

    /// Constructs an item from DynamoDB attributes.
    fn from_attributes(attrs: Attributes) -> Result<Self, ConversionError>;
}

/// An entity that can produce its stored [`Item`].
///
/// Used whenever an operation needs to compute a key or write a full record.
pub trait Itemizer {
    /// The item type this entity maps to.
    type Item: Item;

    /// Returns the item for this entity, or `None` when the entity has no stored
    /// representation.
    fn item(&self) -> Option<Self::Item>;
}

/// An entity that can absorb an [`Item`] read from the store back into itself.
pub trait Deitemizer: Itemizer {
    /// Replaces this entity's mapped fields with the contents of `item`.
    ///
    /// Fails when the item's shape is incompatible with the entity.
    fn from_item(&mut self, item: Self::Item) -> Result<(), ConversionError>;
}

/// Removes the attribute `name` from `attrs` and converts it.
///
/// Absent attributes are handed to [`AttributeValueConvert::missing`]. Conversion
/// errors are tagged with the attribute name.
pub fn attribute<T: AttributeValueConvert>(
    attrs: &mut Attributes,
    name: &str,
) -> Result<T, ConversionError> {
    match attrs.remove(name) {
        Some(value) => T::from_attribute_value(value).map_err(|err| err.with_field(name)),
        None => T::missing(name),
    }
}

/// Converts `value` and stores it in `attrs` under `name`.
pub fn set_attribute<T: AttributeValueConvert>(
    attrs: &mut Attributes,
    name: &str,
    value: &T,
) -> Result<(), ConversionError> {
    let av = value
        .to_attribute_value()
        .map_err(|err| err.with_field(name))?;
    attrs.insert(name.to_string(), av);
    Ok(())
}
