/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Errors raised while mapping entities to and from stored items.

use std::fmt;

/// Error that occurs while converting an entity's values to or from the
/// attributes of a stored item.
#[derive(Debug)]
pub struct ConversionError {
    kind: ConversionErrorKind,
    field: Option<String>,
}

/// What went wrong with the attribute being converted.
#[derive(Debug)]
#[non_exhaustive]
pub enum ConversionErrorKind {
    /// A key or required attribute was absent from the item.
    MissingAttribute,
    /// The attribute held a different DynamoDB type than the entity field expects.
    InvalidType {
        /// The DynamoDB type the field maps to.
        expected: &'static str,
        /// The DynamoDB type stored in the item.
        actual: &'static str,
    },
    /// The attribute had the right type but its contents do not fit the field.
    InvalidValue {
        /// Why the contents were rejected.
        message: String,
    },
}

impl ConversionError {
    /// Creates an error for a missing attribute.
    pub fn missing_attribute(field: impl Into<String>) -> Self {
        Self {
            kind: ConversionErrorKind::MissingAttribute,
            field: Some(field.into()),
        }
    }

    /// Creates an error for an invalid type.
    pub fn invalid_type(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self {
            kind: ConversionErrorKind::InvalidType { expected, actual },
            field: Some(field.into()),
        }
    }

    /// Creates an error for an invalid value.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ConversionErrorKind::InvalidValue {
                message: message.into(),
            },
            field: Some(field.into()),
        }
    }

    /// Creates a type error without a field name (for standalone conversions).
    pub fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self {
            kind: ConversionErrorKind::InvalidType { expected, actual },
            field: None,
        }
    }

    /// Creates a value error without a field name (for standalone conversions).
    pub fn bad_value(message: impl Into<String>) -> Self {
        Self {
            kind: ConversionErrorKind::InvalidValue {
                message: message.into(),
            },
            field: None,
        }
    }

    /// Tags this error with the attribute it occurred on, unless it already names one.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        if self.field.is_none() {
            self.field = Some(field.into());
        }
        self
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> &ConversionErrorKind {
        &self.kind
    }

    /// The attribute the error occurred on, if known.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns true if this error reports an absent attribute.
    pub fn is_missing_attribute(&self) -> bool {
        matches!(self.kind, ConversionErrorKind::MissingAttribute)
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConversionErrorKind::MissingAttribute => f.write_str("missing attribute")?,
            ConversionErrorKind::InvalidType { expected, actual } => {
                write!(f, "expected {expected} attribute, found {actual}")?
            }
            ConversionErrorKind::InvalidValue { message } => {
                write!(f, "bad attribute value: {message}")?
            }
        }
        if let Some(field) = &self.field {
            write!(f, " (attribute '{field}')")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConversionError {}
