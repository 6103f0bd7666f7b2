/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_dynamodb::operation::transact_get_items::TransactGetItemsInput;
use aws_sdk_dynamodb::types::builders::GetBuilder;
use aws_sdk_dynamodb::types::{Get, TransactGetItem};
use ddb_expressions::Builder;
use ddb_mapper_core::Itemizer;
use tracing::debug;

use crate::context::Context;
use crate::dynamo::Dynamo;
use crate::error::Error;
use crate::op::{OperationKind, Prepared};
use crate::result::Cursor;
use crate::single;

/// Starts a read with a get of the item keyed by `key`.
pub fn get<I: Itemizer + ?Sized>(
    builder: Builder,
    input: GetBuilder,
    key: &I,
) -> Result<Read, Error> {
    Read::new().get(builder, input, key)
}

/// One or more gets, run together.
#[derive(Debug, Clone, Default)]
pub struct Read {
    gets: Vec<Get>,
}

impl Read {
    /// Creates a read with no operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accumulated gets.
    pub fn len(&self) -> usize {
        self.gets.len()
    }

    /// Returns true if no get was accumulated.
    pub fn is_empty(&self) -> bool {
        self.gets.is_empty()
    }

    /// Adds a get of the item keyed by `key`, returning the builder's projection.
    pub fn get<I: Itemizer + ?Sized>(
        mut self,
        builder: Builder,
        input: GetBuilder,
        key: &I,
    ) -> Result<Self, Error> {
        let prepared = Prepared::new(OperationKind::Get, &builder, key)?;
        let mut input = input.set_key(Some(prepared.key()?));
        if let Some(expr) = &prepared.expr {
            input = input
                .set_projection_expression(expr.projection().map(str::to_owned))
                .set_expression_attribute_names(expr.names().cloned());
        }
        let get = input.build().map_err(|source| Error::InvalidInput {
            operation: OperationKind::Get,
            source,
        })?;
        self.gets.push(get);
        Ok(self)
    }

    /// Runs the accumulated gets.
    ///
    /// A single get is a direct `GetItem` call and yields zero or one item; an
    /// absent item is not an error. Two or more run as one `TransactGetItems`
    /// call. Items come back in request order, but absent items are left out, so
    /// positions do not line up with the requested keys when some are missing.
    pub async fn run(self, cx: &Context, store: &dyn Dynamo) -> Result<Cursor<'static>, Error> {
        match self.gets.as_slice() {
            [] => return Err(Error::NothingToRun),
            [get] => return single::get(cx, store, get).await,
            _ => {}
        }

        debug!(operations = self.gets.len(), "running read transaction");
        let input = TransactGetItemsInput::builder().set_transact_items(Some(
            self.gets
                .into_iter()
                .map(|get| TransactGetItem::builder().get(get).build())
                .collect(),
        ));
        let out = cx
            .call(store.transact_get_items(input))
            .await
            .map_err(Error::Transaction)?;
        let items = out
            .responses
            .unwrap_or_default()
            .into_iter()
            .filter_map(|response| response.item)
            .filter(|item| !item.is_empty())
            .collect();
        Ok(Cursor::materialized(items))
    }
}
