/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Operands: document paths, literal values, and the functions over them.

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::BuildError;
use crate::render::Aliases;

/// A literal value usable in an expression.
///
/// Converts from common Rust scalars and from a raw [`AttributeValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct Value(pub(crate) AttributeValue);

impl Value {
    /// Returns the attribute value this literal stands for.
    pub fn as_attribute_value(&self) -> &AttributeValue {
        &self.0
    }
}

impl From<AttributeValue> for Value {
    fn from(av: AttributeValue) -> Self {
        Value(av)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value(AttributeValue::S(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value(AttributeValue::S(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value(AttributeValue::Bool(b))
    }
}

impl From<Blob> for Value {
    fn from(b: Blob) -> Self {
        Value(AttributeValue::B(b))
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value(AttributeValue::L(
            v.into_iter().map(AttributeValue::S).collect(),
        ))
    }
}

macro_rules! numeric_value {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value(AttributeValue::N(n.to_string()))
                }
            }
        )+
    };
}

numeric_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

#[derive(Debug, Clone, PartialEq)]
enum OperandKind {
    Name(String),
    Value(AttributeValue),
    Size(String),
    Plus(Box<Operand>, Box<Operand>),
    Minus(Box<Operand>, Box<Operand>),
    IfNotExists(String, Box<Operand>),
    ListAppend(Box<Operand>, Box<Operand>),
}

/// One side of a comparison, or the right-hand side of a `SET` action.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    kind: OperandKind,
}

/// A document path such as `name`, `address.city` or `tags[0]`.
pub fn name(path: impl Into<String>) -> Operand {
    Operand {
        kind: OperandKind::Name(path.into()),
    }
}

/// A literal value.
pub fn value(v: impl Into<Value>) -> Operand {
    Operand {
        kind: OperandKind::Value(v.into().0),
    }
}

/// The `size(path)` function.
pub fn size(path: impl Into<String>) -> Operand {
    Operand {
        kind: OperandKind::Size(path.into()),
    }
}

/// `if_not_exists(path, fallback)`, only valid in a `SET` action.
pub fn if_not_exists(path: impl Into<String>, fallback: Operand) -> Operand {
    Operand {
        kind: OperandKind::IfNotExists(path.into(), Box::new(fallback)),
    }
}

/// `list_append(a, b)`, only valid in a `SET` action.
pub fn list_append(a: Operand, b: Operand) -> Operand {
    Operand {
        kind: OperandKind::ListAppend(Box::new(a), Box::new(b)),
    }
}

impl Operand {
    /// `self + other`, only valid in a `SET` action.
    pub fn plus(self, other: Operand) -> Operand {
        Operand {
            kind: OperandKind::Plus(Box::new(self), Box::new(other)),
        }
    }

    /// `self - other`, only valid in a `SET` action.
    pub fn minus(self, other: Operand) -> Operand {
        Operand {
            kind: OperandKind::Minus(Box::new(self), Box::new(other)),
        }
    }

    pub(crate) fn path(&self) -> Option<&str> {
        match &self.kind {
            OperandKind::Name(path) => Some(path),
            _ => None,
        }
    }

    /// Renders the operand for use inside a condition.
    pub(crate) fn render_condition(
        &self,
        parameter: &'static str,
        aliases: &mut Aliases,
    ) -> Result<String, BuildError> {
        match &self.kind {
            OperandKind::Name(path) => aliases.path(parameter, path),
            OperandKind::Value(v) => Ok(aliases.value(v)),
            OperandKind::Size(path) => Ok(format!("size({})", aliases.path(parameter, path)?)),
            _ => Err(BuildError::invalid(
                parameter,
                "arithmetic and update functions are only allowed in SET actions",
            )),
        }
    }

    /// Renders the operand as the value of a `SET` action.
    pub(crate) fn render_set(
        &self,
        parameter: &'static str,
        aliases: &mut Aliases,
    ) -> Result<String, BuildError> {
        match &self.kind {
            OperandKind::Name(path) => aliases.path(parameter, path),
            OperandKind::Value(v) => Ok(aliases.value(v)),
            OperandKind::Size(_) => Err(BuildError::invalid(
                parameter,
                "size() cannot be assigned",
            )),
            OperandKind::Plus(a, b) => Ok(format!(
                "{} + {}",
                a.render_set(parameter, aliases)?,
                b.render_set(parameter, aliases)?
            )),
            OperandKind::Minus(a, b) => Ok(format!(
                "{} - {}",
                a.render_set(parameter, aliases)?,
                b.render_set(parameter, aliases)?
            )),
            OperandKind::IfNotExists(path, fallback) => Ok(format!(
                "if_not_exists({}, {})",
                aliases.path(parameter, path)?,
                fallback.render_set(parameter, aliases)?
            )),
            OperandKind::ListAppend(a, b) => Ok(format!(
                "list_append({}, {})",
                a.render_set(parameter, aliases)?,
                b.render_set(parameter, aliases)?
            )),
        }
    }
}
