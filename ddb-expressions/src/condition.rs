/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Condition and filter expressions.

use crate::error::BuildError;
use crate::operand::{Operand, Value};
use crate::render::Aliases;

/// DynamoDB limits the right-hand side of `IN` to 100 operands.
const MAX_IN_OPERANDS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparator {
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
}

impl Comparator {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Comparator::Equal => "=",
            Comparator::NotEqual => "<>",
            Comparator::LessThan => "<",
            Comparator::LessThanEqual => "<=",
            Comparator::GreaterThan => ">",
            Comparator::GreaterThanEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ConditionKind {
    Compare(Operand, Comparator, Operand),
    Between(Operand, Operand, Operand),
    In(Operand, Vec<Operand>),
    Exists(Operand),
    NotExists(Operand),
    BeginsWith(Operand, Value),
    Contains(Operand, Operand),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

/// A boolean expression over item attributes, used as a write condition or a
/// read filter.
///
/// ```
/// use ddb_expressions::{name, value};
///
/// let cond = name("age")
///     .greater_than_equal(value(18))
///     .and(name("banned").attribute_not_exists());
/// # let _ = cond;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    kind: ConditionKind,
}

impl Condition {
    fn new(kind: ConditionKind) -> Self {
        Condition { kind }
    }

    /// Both conditions must hold.
    pub fn and(self, other: Condition) -> Condition {
        match self.kind {
            ConditionKind::And(mut all) => {
                all.push(other);
                Condition::new(ConditionKind::And(all))
            }
            kind => Condition::new(ConditionKind::And(vec![Condition { kind }, other])),
        }
    }

    /// Either condition must hold.
    pub fn or(self, other: Condition) -> Condition {
        match self.kind {
            ConditionKind::Or(mut any) => {
                any.push(other);
                Condition::new(ConditionKind::Or(any))
            }
            kind => Condition::new(ConditionKind::Or(vec![Condition { kind }, other])),
        }
    }

    /// Negates this condition.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Condition {
        Condition::new(ConditionKind::Not(Box::new(self)))
    }

    pub(crate) fn render(
        &self,
        parameter: &'static str,
        aliases: &mut Aliases,
    ) -> Result<String, BuildError> {
        let require_path = |op: &Operand, function: &str| {
            op.path().map(str::to_owned).ok_or_else(|| {
                BuildError::invalid(parameter, format!("{function} takes a document path"))
            })
        };
        Ok(match &self.kind {
            ConditionKind::Compare(left, cmp, right) => format!(
                "{} {} {}",
                left.render_condition(parameter, aliases)?,
                cmp.symbol(),
                right.render_condition(parameter, aliases)?
            ),
            ConditionKind::Between(op, lower, upper) => format!(
                "{} BETWEEN {} AND {}",
                op.render_condition(parameter, aliases)?,
                lower.render_condition(parameter, aliases)?,
                upper.render_condition(parameter, aliases)?
            ),
            ConditionKind::In(op, candidates) => {
                if candidates.is_empty() || candidates.len() > MAX_IN_OPERANDS {
                    return Err(BuildError::invalid(
                        parameter,
                        format!("IN takes 1 to {MAX_IN_OPERANDS} operands"),
                    ));
                }
                let left = op.render_condition(parameter, aliases)?;
                let rendered = candidates
                    .iter()
                    .map(|c| c.render_condition(parameter, aliases))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{left} IN ({})", rendered.join(", "))
            }
            ConditionKind::Exists(op) => {
                let path = require_path(op, "attribute_exists")?;
                format!("attribute_exists({})", aliases.path(parameter, &path)?)
            }
            ConditionKind::NotExists(op) => {
                let path = require_path(op, "attribute_not_exists")?;
                format!("attribute_not_exists({})", aliases.path(parameter, &path)?)
            }
            ConditionKind::BeginsWith(op, prefix) => {
                let path = require_path(op, "begins_with")?;
                format!(
                    "begins_with({}, {})",
                    aliases.path(parameter, &path)?,
                    aliases.value(prefix.as_attribute_value())
                )
            }
            ConditionKind::Contains(op, operand) => {
                let path = require_path(op, "contains")?;
                format!(
                    "contains({}, {})",
                    aliases.path(parameter, &path)?,
                    operand.render_condition(parameter, aliases)?
                )
            }
            ConditionKind::And(all) => join(all, " AND ", parameter, aliases)?,
            ConditionKind::Or(any) => join(any, " OR ", parameter, aliases)?,
            ConditionKind::Not(inner) => format!("NOT ({})", inner.render(parameter, aliases)?),
        })
    }
}

fn join(
    conditions: &[Condition],
    separator: &str,
    parameter: &'static str,
    aliases: &mut Aliases,
) -> Result<String, BuildError> {
    let rendered = conditions
        .iter()
        .map(|c| c.render(parameter, aliases).map(|s| format!("({s})")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(separator))
}

macro_rules! comparisons {
    ($($(#[$doc:meta])* $method:ident => $cmp:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(self, right: Operand) -> Condition {
                Condition::new(ConditionKind::Compare(self, Comparator::$cmp, right))
            }
        )+
    };
}

impl Operand {
    comparisons! {
        /// `self = right`
        equal => Equal,
        /// `self <> right`
        not_equal => NotEqual,
        /// `self < right`
        less_than => LessThan,
        /// `self <= right`
        less_than_equal => LessThanEqual,
        /// `self > right`
        greater_than => GreaterThan,
        /// `self >= right`
        greater_than_equal => GreaterThanEqual,
    }

    /// `self BETWEEN lower AND upper`, bounds inclusive.
    pub fn between(self, lower: Operand, upper: Operand) -> Condition {
        Condition::new(ConditionKind::Between(self, lower, upper))
    }

    /// `self IN (candidates...)`.
    pub fn is_in(self, candidates: impl IntoIterator<Item = Operand>) -> Condition {
        Condition::new(ConditionKind::In(self, candidates.into_iter().collect()))
    }

    /// `attribute_exists(self)`. The operand must be a document path.
    pub fn attribute_exists(self) -> Condition {
        Condition::new(ConditionKind::Exists(self))
    }

    /// `attribute_not_exists(self)`. The operand must be a document path.
    pub fn attribute_not_exists(self) -> Condition {
        Condition::new(ConditionKind::NotExists(self))
    }

    /// `begins_with(self, prefix)`.
    pub fn begins_with(self, prefix: impl Into<Value>) -> Condition {
        Condition::new(ConditionKind::BeginsWith(self, prefix.into()))
    }

    /// `contains(self, operand)`, for substrings and set or list membership.
    pub fn contains(self, operand: Operand) -> Condition {
        Condition::new(ConditionKind::Contains(self, operand))
    }
}
