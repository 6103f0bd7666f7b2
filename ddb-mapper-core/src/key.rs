/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Key extraction and item normalization.

use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::ConversionError;
use crate::traits::{Attributes, Item};

/// Copies the key attributes named by `pk` and `sk` out of `attrs`.
///
/// Only the declared key attributes are kept. A key attribute that is absent, or
/// whose value is empty, is reported as a missing attribute.
pub fn extract_key(
    attrs: &Attributes,
    pk: &str,
    sk: Option<&str>,
) -> Result<Attributes, ConversionError> {
    let mut key = Attributes::with_capacity(2);
    for name in std::iter::once(pk).chain(sk) {
        match attrs.get(name) {
            Some(value) if !is_blank_key(value) => {
                key.insert(name.to_string(), value.clone());
            }
            _ => return Err(ConversionError::missing_attribute(name)),
        }
    }
    Ok(key)
}

/// Computes the primary key of `item`.
pub fn item_key<I: Item>(item: &I) -> Result<Attributes, ConversionError> {
    let (pk, sk) = item.keys();
    extract_key(&item.to_attributes()?, pk, sk)
}

/// Drops top-level attributes holding an empty set, list or map.
pub fn strip_empty_collections(attrs: &mut Attributes) {
    attrs.retain(|_, value| !is_empty_collection(value));
}

fn is_blank_key(value: &AttributeValue) -> bool {
    match value {
        AttributeValue::S(s) => s.is_empty(),
        AttributeValue::B(b) => b.as_ref().is_empty(),
        AttributeValue::Null(_) => true,
        _ => false,
    }
}

fn is_empty_collection(value: &AttributeValue) -> bool {
    match value {
        AttributeValue::Ss(v) => v.is_empty(),
        AttributeValue::Ns(v) => v.is_empty(),
        AttributeValue::Bs(v) => v.is_empty(),
        AttributeValue::L(v) => v.is_empty(),
        AttributeValue::M(m) => m.is_empty(),
        _ => false,
    }
}
