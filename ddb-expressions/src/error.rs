/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// Error returned when an expression cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    /// A required part of the expression was never provided.
    UnsetParameter {
        /// The part that was left unset.
        parameter: &'static str,
    },
    /// A part of the expression was provided but is malformed.
    InvalidParameter {
        /// The malformed part.
        parameter: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl BuildError {
    pub(crate) fn unset(parameter: &'static str) -> Self {
        BuildError::UnsetParameter { parameter }
    }

    pub(crate) fn invalid(parameter: &'static str, message: impl Into<String>) -> Self {
        BuildError::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    /// Returns true if this error only says that the whole [`Builder`](crate::Builder)
    /// was empty.
    ///
    /// Callers that accept an optional expression treat this case as "no expression".
    pub fn is_empty_builder(&self) -> bool {
        matches!(self, BuildError::UnsetParameter { parameter } if *parameter == "Builder")
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnsetParameter { parameter } => {
                write!(f, "unset parameter: {parameter}")
            }
            BuildError::InvalidParameter { parameter, message } => {
                write!(f, "invalid parameter {parameter}: {message}")
            }
        }
    }
}

impl std::error::Error for BuildError {}
