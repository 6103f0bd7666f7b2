/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Placeholder allocation shared by every fragment of one expression.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::error::BuildError;

/// Collects `#n<i>` name and `:v<i>` value placeholders while fragments render.
#[derive(Debug, Default)]
pub(crate) struct Aliases {
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Aliases {
    /// Returns the placeholder for the attribute name `name`, reusing an earlier one.
    fn name(&mut self, name: &str) -> String {
        // Placeholders are keyed by placeholder, so search by attribute name.
        if let Some((alias, _)) = self.names.iter().find(|(_, n)| n.as_str() == name) {
            return alias.clone();
        }
        let alias = format!("#n{}", self.names.len());
        self.names.insert(alias.clone(), name.to_string());
        alias
    }

    /// Allocates a fresh placeholder for `value`.
    pub(crate) fn value(&mut self, value: &AttributeValue) -> String {
        let alias = format!(":v{}", self.values.len());
        self.values.insert(alias.clone(), value.clone());
        alias
    }

    /// Renders a document path such as `a.b[2]` with each name segment aliased.
    pub(crate) fn path(&mut self, parameter: &'static str, path: &str) -> Result<String, BuildError> {
        let mut out = String::new();
        for (i, part) in path.split('.').enumerate() {
            let (name, mut rest) = match part.find('[') {
                Some(at) => part.split_at(at),
                None => (part, ""),
            };
            if name.is_empty() {
                return Err(BuildError::invalid(
                    parameter,
                    format!("'{path}' has an empty name segment"),
                ));
            }
            if i > 0 {
                out.push('.');
            }
            out.push_str(&self.name(name));
            while !rest.is_empty() {
                let index = rest
                    .strip_prefix('[')
                    .and_then(|r| r.split_once(']'))
                    .filter(|(digits, _)| {
                        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
                    });
                match index {
                    Some((digits, tail)) => {
                        out.push('[');
                        out.push_str(digits);
                        out.push(']');
                        rest = tail;
                    }
                    None => {
                        return Err(BuildError::invalid(
                            parameter,
                            format!("'{path}' has a malformed list index"),
                        ))
                    }
                }
            }
        }
        Ok(out)
    }

    pub(crate) fn into_maps(self) -> (HashMap<String, String>, HashMap<String, AttributeValue>) {
        (self.names, self.values)
    }
}
