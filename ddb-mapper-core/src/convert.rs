/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! AttributeValueConvert implementations for standard Rust types.

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::{HashMap, HashSet};

use crate::error::ConversionError;
use crate::traits::AttributeValueConvert;

/// Returns the DynamoDB type descriptor of `av`.
pub(crate) fn type_name(av: &AttributeValue) -> &'static str {
    match av {
        AttributeValue::S(_) => "S",
        AttributeValue::N(_) => "N",
        AttributeValue::B(_) => "B",
        AttributeValue::Ss(_) => "SS",
        AttributeValue::Ns(_) => "NS",
        AttributeValue::Bs(_) => "BS",
        AttributeValue::M(_) => "M",
        AttributeValue::L(_) => "L",
        AttributeValue::Null(_) => "NULL",
        AttributeValue::Bool(_) => "BOOL",
        _ => "Unknown",
    }
}

impl AttributeValueConvert for AttributeValue {
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
        Ok(self.clone())
    }

    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl AttributeValueConvert for String {
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
        Ok(AttributeValue::S(self.clone()))
    }

    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
        match value {
            AttributeValue::S(s) => Ok(s),
            other => Err(ConversionError::type_mismatch("S", type_name(&other))),
        }
    }
}

impl AttributeValueConvert for bool {
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
        Ok(AttributeValue::Bool(*self))
    }

    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
        match value {
            AttributeValue::Bool(b) => Ok(b),
            other => Err(ConversionError::type_mismatch("BOOL", type_name(&other))),
        }
    }
}

impl AttributeValueConvert for Blob {
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
        Ok(AttributeValue::B(self.clone()))
    }

    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
        match value {
            AttributeValue::B(b) => Ok(b),
            other => Err(ConversionError::type_mismatch("B", type_name(&other))),
        }
    }
}

// Numbers travel as decimal strings in the N type.
macro_rules! number {
    ($($ty:ty),+) => {
        $(
            impl AttributeValueConvert for $ty {
                fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
                    Ok(AttributeValue::N(self.to_string()))
                }

                fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
                    match value {
                        AttributeValue::N(n) => n.parse().map_err(|_| {
                            ConversionError::bad_value(format!(
                                "'{}' is not a valid {}",
                                n,
                                stringify!($ty)
                            ))
                        }),
                        other => Err(ConversionError::type_mismatch("N", type_name(&other))),
                    }
                }
            }
        )+
    };
}

number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<T: AttributeValueConvert> AttributeValueConvert for Option<T> {
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
        match self {
            Some(v) => v.to_attribute_value(),
            None => Ok(AttributeValue::Null(true)),
        }
    }

    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
        match value {
            AttributeValue::Null(true) => Ok(None),
            other => T::from_attribute_value(other).map(Some),
        }
    }

    fn missing(_name: &str) -> Result<Self, ConversionError> {
        Ok(None)
    }
}

impl<T: AttributeValueConvert> AttributeValueConvert for Vec<T> {
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
        let items = self
            .iter()
            .map(AttributeValueConvert::to_attribute_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AttributeValue::L(items))
    }

    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
        match value {
            AttributeValue::L(list) => list.into_iter().map(T::from_attribute_value).collect(),
            other => Err(ConversionError::type_mismatch("L", type_name(&other))),
        }
    }
}

impl<V: AttributeValueConvert> AttributeValueConvert for HashMap<String, V> {
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
        let mut map = HashMap::with_capacity(self.len());
        for (k, v) in self {
            map.insert(k.clone(), v.to_attribute_value().map_err(|e| e.with_field(k))?);
        }
        Ok(AttributeValue::M(map))
    }

    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
        match value {
            AttributeValue::M(m) => m
                .into_iter()
                .map(|(k, v)| {
                    let v = V::from_attribute_value(v).map_err(|e| e.with_field(&k))?;
                    Ok((k, v))
                })
                .collect(),
            other => Err(ConversionError::type_mismatch("M", type_name(&other))),
        }
    }
}

// String sets map onto the native SS type rather than a list. The store has no
// empty set, so an empty one is stored as NULL.
impl AttributeValueConvert for HashSet<String> {
    fn to_attribute_value(&self) -> Result<AttributeValue, ConversionError> {
        if self.is_empty() {
            return Ok(AttributeValue::Null(true));
        }
        let mut members: Vec<String> = self.iter().cloned().collect();
        members.sort();
        Ok(AttributeValue::Ss(members))
    }

    fn from_attribute_value(value: AttributeValue) -> Result<Self, ConversionError> {
        match value {
            AttributeValue::Ss(members) => Ok(members.into_iter().collect()),
            AttributeValue::Null(true) => Ok(HashSet::new()),
            other => Err(ConversionError::type_mismatch("SS", type_name(&other))),
        }
    }
}
