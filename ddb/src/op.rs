/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Operations assembled by the read and write builders.

use std::fmt;

use aws_sdk_dynamodb::types::{ConditionCheck, Delete, Put, TransactWriteItem, Update};
use ddb_expressions::{Builder, Expression, Fragment};
use ddb_mapper_core::{key, Attributes, Item, Itemizer};
use tracing::trace;

use crate::error::Error;

/// The kind of a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OperationKind {
    /// Read one item by key.
    Get,
    /// Write a full item.
    Put,
    /// Modify attributes of an item.
    Update,
    /// Remove an item.
    Delete,
    /// Assert a condition on an item inside a transaction.
    ConditionCheck,
    /// Read the items of one partition.
    Query,
    /// Read a whole table or index.
    Scan,
}

impl OperationKind {
    /// The expression fragments a request of this kind carries.
    pub fn fragments(self) -> &'static [Fragment] {
        match self {
            OperationKind::Get => &[Fragment::Projection],
            OperationKind::Put | OperationKind::Delete | OperationKind::ConditionCheck => {
                &[Fragment::Condition]
            }
            OperationKind::Update => &[Fragment::Condition, Fragment::Update],
            OperationKind::Query => &[
                Fragment::KeyCondition,
                Fragment::Filter,
                Fragment::Projection,
            ],
            OperationKind::Scan => &[Fragment::Filter, Fragment::Projection],
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Get => "get",
            OperationKind::Put => "put",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::ConditionCheck => "condition check",
            OperationKind::Query => "query",
            OperationKind::Scan => "scan",
        })
    }
}

/// A fully formed keyed write.
#[derive(Debug, Clone)]
pub(crate) enum WriteOp {
    Put(Put),
    Update(Update),
    Delete(Delete),
    ConditionCheck(ConditionCheck),
}

impl WriteOp {
    pub(crate) fn kind(&self) -> OperationKind {
        match self {
            WriteOp::Put(_) => OperationKind::Put,
            WriteOp::Update(_) => OperationKind::Update,
            WriteOp::Delete(_) => OperationKind::Delete,
            WriteOp::ConditionCheck(_) => OperationKind::ConditionCheck,
        }
    }

    pub(crate) fn into_transact_item(self) -> TransactWriteItem {
        let item = TransactWriteItem::builder();
        match self {
            WriteOp::Put(put) => item.put(put),
            WriteOp::Update(update) => item.update(update),
            WriteOp::Delete(delete) => item.delete(delete),
            WriteOp::ConditionCheck(check) => item.condition_check(check),
        }
        .build()
    }
}

/// Builds `builder` for a `kind` request, treating an entirely empty builder as
/// "no expression".
///
/// A fragment the request does not carry is an [`Error::ExpressionBuild`].
pub(crate) fn build_expression(
    kind: OperationKind,
    builder: &Builder,
) -> Result<Option<Expression>, Error> {
    match builder.build_for(kind.fragments()) {
        Ok(expr) => Ok(Some(expr)),
        Err(err) if err.is_empty_builder() => {
            trace!("empty expression builder, no expression applied");
            Ok(None)
        }
        Err(err) => Err(Error::ExpressionBuild(err)),
    }
}

/// The parts every keyed operation is assembled from.
#[derive(Debug)]
pub(crate) struct Prepared {
    pub(crate) expr: Option<Expression>,
    pub(crate) attrs: Attributes,
    keys: (&'static str, Option<&'static str>),
}

impl Prepared {
    /// Obtains the item from `itemizer`, builds the expression and marshals the item.
    pub(crate) fn new<I>(
        kind: OperationKind,
        builder: &Builder,
        itemizer: &I,
    ) -> Result<Self, Error>
    where
        I: Itemizer + ?Sized,
    {
        let item = itemizer.item().ok_or(Error::MissingItem)?;
        let expr = build_expression(kind, builder)?;
        let attrs = item.to_attributes().map_err(Error::Mapping)?;
        Ok(Prepared {
            expr,
            attrs,
            keys: item.keys(),
        })
    }

    /// The marshaled attributes filtered down to the declared key attributes.
    pub(crate) fn key(&self) -> Result<Attributes, Error> {
        let (pk, sk) = self.keys;
        key::extract_key(&self.attrs, pk, sk).map_err(Error::from_key)
    }
}
