/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Update expressions.

use crate::error::BuildError;
use crate::operand::{Operand, Value};
use crate::render::Aliases;

const PARAMETER: &str = "Update";

/// The actions of an `UpdateItem` call, grouped into `SET`, `REMOVE`, `ADD`
/// and `DELETE` clauses.
///
/// ```
/// use ddb_expressions::{name, value, Update};
///
/// let update = Update::new()
///     .set("name", value("foo"))
///     .set("visits", name("visits").plus(value(1)))
///     .remove("stale");
/// # let _ = update;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set: Vec<(String, Operand)>,
    remove: Vec<String>,
    add: Vec<(String, Value)>,
    delete: Vec<(String, Value)>,
}

impl Update {
    /// Creates an update with no actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// `SET path = operand`.
    pub fn set(mut self, path: impl Into<String>, operand: Operand) -> Self {
        self.set.push((path.into(), operand));
        self
    }

    /// `REMOVE path`.
    pub fn remove(mut self, path: impl Into<String>) -> Self {
        self.remove.push(path.into());
        self
    }

    /// `ADD path v`, for numbers and sets.
    pub fn add(mut self, path: impl Into<String>, v: impl Into<Value>) -> Self {
        self.add.push((path.into(), v.into()));
        self
    }

    /// `DELETE path v`, removing elements from a set.
    pub fn delete(mut self, path: impl Into<String>, v: impl Into<Value>) -> Self {
        self.delete.push((path.into(), v.into()));
        self
    }

    /// Returns true when no action was added.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty() && self.add.is_empty() && self.delete.is_empty()
    }

    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, BuildError> {
        if self.is_empty() {
            return Err(BuildError::unset(PARAMETER));
        }
        let mut clauses = Vec::new();
        if !self.set.is_empty() {
            let actions = self
                .set
                .iter()
                .map(|(path, op)| {
                    Ok(format!(
                        "{} = {}",
                        aliases.path(PARAMETER, path)?,
                        op.render_set(PARAMETER, aliases)?
                    ))
                })
                .collect::<Result<Vec<_>, BuildError>>()?;
            clauses.push(format!("SET {}", actions.join(", ")));
        }
        if !self.remove.is_empty() {
            let paths = self
                .remove
                .iter()
                .map(|path| aliases.path(PARAMETER, path))
                .collect::<Result<Vec<_>, _>>()?;
            clauses.push(format!("REMOVE {}", paths.join(", ")));
        }
        for (keyword, actions) in [("ADD", &self.add), ("DELETE", &self.delete)] {
            if actions.is_empty() {
                continue;
            }
            let rendered = actions
                .iter()
                .map(|(path, v)| {
                    Ok(format!(
                        "{} {}",
                        aliases.path(PARAMETER, path)?,
                        aliases.value(v.as_attribute_value())
                    ))
                })
                .collect::<Result<Vec<_>, BuildError>>()?;
            clauses.push(format!("{keyword} {}", rendered.join(", ")));
        }
        Ok(clauses.join(" "))
    }
}
