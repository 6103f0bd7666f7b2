/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Key condition expressions for `Query`.

use crate::condition::Comparator;
use crate::error::BuildError;
use crate::operand::Value;
use crate::render::Aliases;

/// A key attribute referenced by a key condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    name: String,
}

/// Names a key attribute.
pub fn key(name: impl Into<String>) -> Key {
    Key { name: name.into() }
}

#[derive(Debug, Clone, PartialEq)]
enum KeyConditionKind {
    Compare(Key, Comparator, Value),
    Between(Key, Value, Value),
    BeginsWith(Key, Value),
    And(Box<KeyCondition>, Box<KeyCondition>),
}

/// Selects the items a `Query` reads: an equality on the partition key,
/// optionally combined with one condition on the sort key.
///
/// ```
/// use ddb_expressions::key;
///
/// let kc = key("pk").equal("user#1").and(key("sk").begins_with("order#"));
/// # let _ = kc;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    kind: KeyConditionKind,
}

macro_rules! key_comparisons {
    ($($(#[$doc:meta])* $method:ident => $cmp:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(self, v: impl Into<Value>) -> KeyCondition {
                KeyCondition {
                    kind: KeyConditionKind::Compare(self, Comparator::$cmp, v.into()),
                }
            }
        )+
    };
}

impl Key {
    key_comparisons! {
        /// `key = v`
        equal => Equal,
        /// `key < v`
        less_than => LessThan,
        /// `key <= v`
        less_than_equal => LessThanEqual,
        /// `key > v`
        greater_than => GreaterThan,
        /// `key >= v`
        greater_than_equal => GreaterThanEqual,
    }

    /// `key BETWEEN lower AND upper`.
    pub fn between(self, lower: impl Into<Value>, upper: impl Into<Value>) -> KeyCondition {
        KeyCondition {
            kind: KeyConditionKind::Between(self, lower.into(), upper.into()),
        }
    }

    /// `begins_with(key, prefix)`.
    pub fn begins_with(self, prefix: impl Into<Value>) -> KeyCondition {
        KeyCondition {
            kind: KeyConditionKind::BeginsWith(self, prefix.into()),
        }
    }
}

impl KeyCondition {
    /// Combines a partition key equality with a sort key condition.
    pub fn and(self, other: KeyCondition) -> KeyCondition {
        KeyCondition {
            kind: KeyConditionKind::And(Box::new(self), Box::new(other)),
        }
    }

    fn is_equality(&self) -> bool {
        matches!(self.kind, KeyConditionKind::Compare(_, Comparator::Equal, _))
    }

    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, BuildError> {
        const PARAMETER: &str = "KeyCondition";
        Ok(match &self.kind {
            KeyConditionKind::Compare(key, cmp, v) => format!(
                "{} {} {}",
                aliases.path(PARAMETER, &key.name)?,
                cmp.symbol(),
                aliases.value(v.as_attribute_value())
            ),
            KeyConditionKind::Between(key, lower, upper) => format!(
                "{} BETWEEN {} AND {}",
                aliases.path(PARAMETER, &key.name)?,
                aliases.value(lower.as_attribute_value()),
                aliases.value(upper.as_attribute_value())
            ),
            KeyConditionKind::BeginsWith(key, prefix) => format!(
                "begins_with({}, {})",
                aliases.path(PARAMETER, &key.name)?,
                aliases.value(prefix.as_attribute_value())
            ),
            KeyConditionKind::And(left, right) => {
                let nested = |c: &KeyCondition| matches!(c.kind, KeyConditionKind::And(..));
                if nested(left) || nested(right) {
                    return Err(BuildError::invalid(
                        PARAMETER,
                        "at most two key conditions can be combined",
                    ));
                }
                if !left.is_equality() && !right.is_equality() {
                    return Err(BuildError::invalid(
                        PARAMETER,
                        "one side of a combined key condition must be an equality",
                    ));
                }
                format!("({}) AND ({})", left.render(aliases)?, right.render(aliases)?)
            }
        })
    }
}
