/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Direct single-item calls used when a read or write holds exactly one operation.

use aws_sdk_dynamodb::operation::delete_item::DeleteItemInput;
use aws_sdk_dynamodb::operation::get_item::GetItemInput;
use aws_sdk_dynamodb::operation::put_item::PutItemInput;
use aws_sdk_dynamodb::operation::update_item::UpdateItemInput;
use aws_sdk_dynamodb::types::{Delete, Get, Put, ReturnValue, Update};
use ddb_mapper_core::Attributes;
use tracing::debug;

use crate::context::Context;
use crate::dynamo::Dynamo;
use crate::error::{CallError, Error};
use crate::op::OperationKind;
use crate::result::Cursor;

fn outcome(attrs: Option<Attributes>) -> Cursor<'static> {
    match attrs {
        Some(attrs) if !attrs.is_empty() => Cursor::materialized(vec![attrs]),
        _ => Cursor::empty(),
    }
}

fn write_failed(operation: OperationKind) -> impl FnOnce(CallError) -> Error {
    move |source| Error::Write { operation, source }
}

pub(crate) async fn put(
    cx: &Context,
    store: &dyn Dynamo,
    put: &Put,
    return_values: Option<ReturnValue>,
) -> Result<Cursor<'static>, Error> {
    debug!(operation = %OperationKind::Put, "running single write");
    let input = PutItemInput::builder()
        .table_name(put.table_name())
        .set_item(Some(put.item().clone()))
        .set_condition_expression(put.condition_expression().map(str::to_owned))
        .set_expression_attribute_names(put.expression_attribute_names().cloned())
        .set_expression_attribute_values(put.expression_attribute_values().cloned())
        .set_return_values(return_values);
    let out = cx
        .call(store.put_item(input))
        .await
        .map_err(write_failed(OperationKind::Put))?;
    Ok(outcome(out.attributes))
}

pub(crate) async fn update(
    cx: &Context,
    store: &dyn Dynamo,
    update: &Update,
    return_values: Option<ReturnValue>,
) -> Result<Cursor<'static>, Error> {
    debug!(operation = %OperationKind::Update, "running single write");
    let input = UpdateItemInput::builder()
        .table_name(update.table_name())
        .set_key(Some(update.key().clone()))
        .update_expression(update.update_expression())
        .set_condition_expression(update.condition_expression().map(str::to_owned))
        .set_expression_attribute_names(update.expression_attribute_names().cloned())
        .set_expression_attribute_values(update.expression_attribute_values().cloned())
        .set_return_values(return_values);
    let out = cx
        .call(store.update_item(input))
        .await
        .map_err(write_failed(OperationKind::Update))?;
    Ok(outcome(out.attributes))
}

pub(crate) async fn delete(
    cx: &Context,
    store: &dyn Dynamo,
    delete: &Delete,
    return_values: Option<ReturnValue>,
) -> Result<Cursor<'static>, Error> {
    debug!(operation = %OperationKind::Delete, "running single write");
    let input = DeleteItemInput::builder()
        .table_name(delete.table_name())
        .set_key(Some(delete.key().clone()))
        .set_condition_expression(delete.condition_expression().map(str::to_owned))
        .set_expression_attribute_names(delete.expression_attribute_names().cloned())
        .set_expression_attribute_values(delete.expression_attribute_values().cloned())
        .set_return_values(return_values);
    let out = cx
        .call(store.delete_item(input))
        .await
        .map_err(write_failed(OperationKind::Delete))?;
    Ok(outcome(out.attributes))
}

/// Reads one item; a missing item yields an empty cursor.
pub(crate) async fn get(
    cx: &Context,
    store: &dyn Dynamo,
    get: &Get,
) -> Result<Cursor<'static>, Error> {
    debug!(operation = %OperationKind::Get, "running single read");
    let input = GetItemInput::builder()
        .table_name(get.table_name())
        .set_key(Some(get.key().clone()))
        .set_projection_expression(get.projection_expression().map(str::to_owned))
        .set_expression_attribute_names(get.expression_attribute_names().cloned());
    let out = cx
        .call(store.get_item(input))
        .await
        .map_err(|source| Error::Fetch {
            operation: OperationKind::Get,
            source,
        })?;
    Ok(outcome(out.item))
}
