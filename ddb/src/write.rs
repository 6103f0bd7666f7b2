/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsInput;
use aws_sdk_dynamodb::types::builders::{
    ConditionCheckBuilder, DeleteBuilder, PutBuilder, UpdateBuilder,
};
use aws_sdk_dynamodb::types::ReturnValue;
use ddb_expressions::Builder;
use ddb_mapper_core::{key, Itemizer};
use tracing::{debug, trace};

use crate::config::Config;
use crate::context::Context;
use crate::dynamo::Dynamo;
use crate::error::Error;
use crate::op::{OperationKind, Prepared, WriteOp};
use crate::result::Cursor;
use crate::single;

/// Starts a write with a put of `item`.
pub fn put<I: Itemizer + ?Sized>(
    builder: Builder,
    input: PutBuilder,
    item: &I,
) -> Result<Write, Error> {
    Write::new().put(builder, input, item)
}

/// Starts a write with an update of the item keyed by `key`.
pub fn update<I: Itemizer + ?Sized>(
    builder: Builder,
    input: UpdateBuilder,
    key: &I,
) -> Result<Write, Error> {
    Write::new().update(builder, input, key)
}

/// Starts a write with a delete of the item keyed by `key`.
pub fn delete<I: Itemizer + ?Sized>(
    builder: Builder,
    input: DeleteBuilder,
    key: &I,
) -> Result<Write, Error> {
    Write::new().delete(builder, input, key)
}

/// Starts a write with a condition check on the item keyed by `key`.
pub fn check<I: Itemizer + ?Sized>(
    builder: Builder,
    input: ConditionCheckBuilder,
    key: &I,
) -> Result<Write, Error> {
    Write::new().check(builder, input, key)
}

/// One or more keyed writes, run together.
///
/// Each accumulation step returns the advanced builder or the first error, so a
/// chain of steps is composed with `?` and a failed step never leaves a
/// partially assembled write behind.
///
/// ```no_run
/// # use ddb_mapper_core::{Attributes, ConversionError, Item, Itemizer};
/// # struct K; impl Item for K {
/// #     fn keys(&self) -> (&'static str, Option<&'static str>) { ("pk", None) }
/// #     fn to_attributes(&self) -> Result<Attributes, ConversionError> { Ok(Attributes::new()) }
/// #     fn from_attributes(_: Attributes) -> Result<Self, ConversionError> { Ok(K) }
/// # }
/// # struct Order; impl Itemizer for Order { type Item = K; fn item(&self) -> Option<K> { Some(K) } }
/// # async fn example(client: aws_sdk_dynamodb::Client, order: Order, stock: Order) -> Result<(), ddb::Error> {
/// use aws_sdk_dynamodb::types::{Put, Update};
/// use ddb::expression::{name, value, Builder, Update as Set};
/// use ddb::Context;
///
/// let take_one = Builder::new()
///     .with_condition(name("count").greater_than(value(0)))
///     .with_update(Set::new().set("count", name("count").minus(value(1))));
///
/// ddb::put(Builder::new(), Put::builder().table_name("orders"), &order)?
///     .update(take_one, Update::builder().table_name("stock"), &stock)?
///     .run(&Context::new(), &client)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Write {
    ops: Vec<WriteOp>,
    config: Config,
    return_values: Option<ReturnValue>,
    client_request_token: Option<String>,
}

impl Write {
    /// Creates a write with no operations and the default [`Config`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a write with no operations using `config`.
    pub fn with_config(config: Config) -> Self {
        Write {
            config,
            ..Default::default()
        }
    }

    /// Requests the item's attributes as they were before (or after) the write.
    ///
    /// Only a write holding a single put, update or delete runs as a direct call
    /// and returns them; transactions return no items.
    pub fn return_values(mut self, return_values: ReturnValue) -> Self {
        self.return_values = Some(return_values);
        self
    }

    /// Sets the idempotency token sent with a transactional write.
    pub fn client_request_token(mut self, token: impl Into<String>) -> Self {
        self.client_request_token = Some(token.into());
        self
    }

    /// Number of accumulated operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if no operation was accumulated.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Adds a put of the whole of `item`, guarded by the builder's condition.
    pub fn put<I: Itemizer + ?Sized>(
        mut self,
        builder: Builder,
        input: PutBuilder,
        item: &I,
    ) -> Result<Self, Error> {
        let mut prepared = Prepared::new(OperationKind::Put, &builder, item)?;
        prepared.key()?;
        if !self.config.empty_collections() {
            key::strip_empty_collections(&mut prepared.attrs);
        }
        let mut input = input.set_item(Some(prepared.attrs));
        if let Some(expr) = &prepared.expr {
            input = input
                .set_condition_expression(expr.condition().map(str::to_owned))
                .set_expression_attribute_names(expr.names().cloned())
                .set_expression_attribute_values(expr.values().cloned());
        }
        let put = input.build().map_err(|source| Error::InvalidInput {
            operation: OperationKind::Put,
            source,
        })?;
        self.ops.push(WriteOp::Put(put));
        Ok(self)
    }

    /// Adds an update of the item keyed by `key`, using the builder's update and
    /// condition.
    pub fn update<I: Itemizer + ?Sized>(
        mut self,
        builder: Builder,
        input: UpdateBuilder,
        key: &I,
    ) -> Result<Self, Error> {
        let prepared = Prepared::new(OperationKind::Update, &builder, key)?;
        let mut input = input.set_key(Some(prepared.key()?));
        if let Some(expr) = &prepared.expr {
            input = input
                .set_update_expression(expr.update().map(str::to_owned))
                .set_condition_expression(expr.condition().map(str::to_owned))
                .set_expression_attribute_names(expr.names().cloned())
                .set_expression_attribute_values(expr.values().cloned());
        }
        let update = input.build().map_err(|source| Error::InvalidInput {
            operation: OperationKind::Update,
            source,
        })?;
        self.ops.push(WriteOp::Update(update));
        Ok(self)
    }

    /// Adds a delete of the item keyed by `key`, guarded by the builder's condition.
    pub fn delete<I: Itemizer + ?Sized>(
        mut self,
        builder: Builder,
        input: DeleteBuilder,
        key: &I,
    ) -> Result<Self, Error> {
        let prepared = Prepared::new(OperationKind::Delete, &builder, key)?;
        let mut input = input.set_key(Some(prepared.key()?));
        if let Some(expr) = &prepared.expr {
            input = input
                .set_condition_expression(expr.condition().map(str::to_owned))
                .set_expression_attribute_names(expr.names().cloned())
                .set_expression_attribute_values(expr.values().cloned());
        }
        let delete = input.build().map_err(|source| Error::InvalidInput {
            operation: OperationKind::Delete,
            source,
        })?;
        self.ops.push(WriteOp::Delete(delete));
        Ok(self)
    }

    /// Adds a check of the builder's condition against the item keyed by `key`.
    ///
    /// A check mutates nothing, so a write holding only a check still runs as a
    /// transaction.
    pub fn check<I: Itemizer + ?Sized>(
        mut self,
        builder: Builder,
        input: ConditionCheckBuilder,
        key: &I,
    ) -> Result<Self, Error> {
        let prepared = Prepared::new(OperationKind::ConditionCheck, &builder, key)?;
        let mut input = input.set_key(Some(prepared.key()?));
        if let Some(expr) = &prepared.expr {
            input = input
                .set_condition_expression(expr.condition().map(str::to_owned))
                .set_expression_attribute_names(expr.names().cloned())
                .set_expression_attribute_values(expr.values().cloned());
        }
        let check = input.build().map_err(|source| Error::InvalidInput {
            operation: OperationKind::ConditionCheck,
            source,
        })?;
        self.ops.push(WriteOp::ConditionCheck(check));
        Ok(self)
    }

    /// Runs the accumulated writes.
    ///
    /// A single put, update or delete is sent as a direct call, which is cheaper
    /// than a transaction but is not atomic with anything else. Its returned
    /// attributes, if [`return_values`](Write::return_values) asked for any, are
    /// the cursor's only item. Two or more operations, or a lone condition check,
    /// run as one `TransactWriteItems` call and yield an empty cursor; a rejected
    /// transaction, including a failed condition check inside it, is reported as
    /// [`Error::Transaction`] with the store's cause.
    pub async fn run(self, cx: &Context, store: &dyn Dynamo) -> Result<Cursor<'static>, Error> {
        match self.ops.as_slice() {
            [] => return Err(Error::NothingToRun),
            [WriteOp::Put(op)] => return single::put(cx, store, op, self.return_values).await,
            [WriteOp::Update(op)] => {
                return single::update(cx, store, op, self.return_values).await
            }
            [WriteOp::Delete(op)] => {
                return single::delete(cx, store, op, self.return_values).await
            }
            _ => {}
        }

        debug!(operations = self.ops.len(), "running write transaction");
        let input = TransactWriteItemsInput::builder()
            .set_transact_items(Some(
                self.ops
                    .into_iter()
                    .map(|op| {
                        trace!(operation = %op.kind(), "adding transaction item");
                        op.into_transact_item()
                    })
                    .collect(),
            ))
            .set_client_request_token(self.client_request_token);
        cx.call(store.transact_write_items(input))
            .await
            .map_err(Error::Transaction)?;
        Ok(Cursor::empty())
    }
}
