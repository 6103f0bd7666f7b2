/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::BuildError;
use crate::render::Aliases;

/// The attributes a read returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    paths: Vec<String>,
}

/// Projects the given document paths.
pub fn projection<I, S>(paths: I) -> Projection
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Projection {
        paths: paths.into_iter().map(Into::into).collect(),
    }
}

impl Projection {
    /// Adds another path to the projection.
    pub fn and(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, BuildError> {
        if self.paths.is_empty() {
            return Err(BuildError::unset("Projection"));
        }
        let rendered = self
            .paths
            .iter()
            .map(|p| aliases.path("Projection", p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join(", "))
    }
}
