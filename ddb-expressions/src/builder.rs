/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::condition::Condition;
use crate::error::BuildError;
use crate::key_condition::KeyCondition;
use crate::projection::Projection;
use crate::render::Aliases;
use crate::update::Update;

/// One of the expressions a request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Fragment {
    /// `KeyConditionExpression`
    KeyCondition,
    /// `ConditionExpression`
    Condition,
    /// `FilterExpression`
    Filter,
    /// `ProjectionExpression`
    Projection,
    /// `UpdateExpression`
    Update,
}

impl Fragment {
    /// The fragment's name as used in [`BuildError`] parameters.
    pub fn name(self) -> &'static str {
        match self {
            Fragment::KeyCondition => "KeyCondition",
            Fragment::Condition => "Condition",
            Fragment::Filter => "Filter",
            Fragment::Projection => "Projection",
            Fragment::Update => "Update",
        }
    }
}

/// Collects the fragments of one request and renders them together, so that
/// they share a single set of name and value placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Builder {
    key_condition: Option<KeyCondition>,
    condition: Option<Condition>,
    filter: Option<Condition>,
    projection: Option<Projection>,
    update: Option<Update>,
}

impl Builder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key condition of a `Query`.
    pub fn with_key_condition(mut self, key_condition: KeyCondition) -> Self {
        self.key_condition = Some(key_condition);
        self
    }

    /// Sets the condition guarding a write.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Sets the filter applied to `Query` and `Scan` results.
    pub fn with_filter(mut self, filter: Condition) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the projection of a read.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Sets the actions of an `UpdateItem`.
    pub fn with_update(mut self, update: Update) -> Self {
        self.update = Some(update);
        self
    }

    /// Returns true when no fragment was set.
    pub fn is_empty(&self) -> bool {
        self.key_condition.is_none()
            && self.condition.is_none()
            && self.filter.is_none()
            && self.projection.is_none()
            && self.update.is_none()
    }

    /// The fragments that were set, in render order.
    pub fn fragments(&self) -> impl Iterator<Item = Fragment> + '_ {
        [
            (Fragment::KeyCondition, self.key_condition.is_some()),
            (Fragment::Condition, self.condition.is_some()),
            (Fragment::Filter, self.filter.is_some()),
            (Fragment::Projection, self.projection.is_some()),
            (Fragment::Update, self.update.is_some()),
        ]
        .into_iter()
        .filter_map(|(fragment, set)| set.then_some(fragment))
    }

    /// Renders the builder for a request that only carries the `accepted`
    /// fragments.
    ///
    /// Any other fragment that was set fails with
    /// [`BuildError::InvalidParameter`] naming it, since its placeholders would
    /// otherwise be sent without an expression that uses them. An empty builder
    /// fails as in [`build`](Builder::build).
    pub fn build_for(&self, accepted: &[Fragment]) -> Result<Expression, BuildError> {
        if let Some(unused) = self.fragments().find(|f| !accepted.contains(f)) {
            return Err(BuildError::invalid(
                unused.name(),
                "not used by this request",
            ));
        }
        self.build()
    }

    /// Renders every fragment that was set.
    ///
    /// An empty builder fails with [`BuildError::UnsetParameter`] naming
    /// `"Builder"`; see [`BuildError::is_empty_builder`].
    pub fn build(&self) -> Result<Expression, BuildError> {
        if self.is_empty() {
            return Err(BuildError::unset("Builder"));
        }
        let mut aliases = Aliases::default();
        let key_condition = self
            .key_condition
            .as_ref()
            .map(|kc| kc.render(&mut aliases))
            .transpose()?;
        let condition = self
            .condition
            .as_ref()
            .map(|c| c.render("Condition", &mut aliases))
            .transpose()?;
        let filter = self
            .filter
            .as_ref()
            .map(|c| c.render("Filter", &mut aliases))
            .transpose()?;
        let projection = self
            .projection
            .as_ref()
            .map(|p| p.render(&mut aliases))
            .transpose()?;
        let update = self
            .update
            .as_ref()
            .map(|u| u.render(&mut aliases))
            .transpose()?;
        let (names, values) = aliases.into_maps();
        Ok(Expression {
            key_condition,
            condition,
            filter,
            projection,
            update,
            names,
            values,
        })
    }
}

/// The rendered expression strings of one request and their placeholder maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    key_condition: Option<String>,
    condition: Option<String>,
    filter: Option<String>,
    projection: Option<String>,
    update: Option<String>,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Expression {
    /// The `KeyConditionExpression`, if one was set.
    pub fn key_condition(&self) -> Option<&str> {
        self.key_condition.as_deref()
    }

    /// The `ConditionExpression`, if one was set.
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// The `FilterExpression`, if one was set.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// The `ProjectionExpression`, if one was set.
    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    /// The `UpdateExpression`, if one was set.
    pub fn update(&self) -> Option<&str> {
        self.update.as_deref()
    }

    /// The `ExpressionAttributeNames`, or `None` when no name was referenced.
    pub fn names(&self) -> Option<&HashMap<String, String>> {
        (!self.names.is_empty()).then_some(&self.names)
    }

    /// The `ExpressionAttributeValues`, or `None` when no value was referenced.
    pub fn values(&self) -> Option<&HashMap<String, AttributeValue>> {
        (!self.values.is_empty()).then_some(&self.values)
    }
}
