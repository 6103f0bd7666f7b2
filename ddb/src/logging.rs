/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Request logging for any [`Dynamo`] implementation.

use std::fmt;

use aws_sdk_dynamodb::operation::delete_item::builders::DeleteItemInputBuilder;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemOutput;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemInputBuilder;
use aws_sdk_dynamodb::operation::get_item::GetItemOutput;
use aws_sdk_dynamodb::operation::put_item::builders::PutItemInputBuilder;
use aws_sdk_dynamodb::operation::put_item::PutItemOutput;
use aws_sdk_dynamodb::operation::query::builders::QueryInputBuilder;
use aws_sdk_dynamodb::operation::query::QueryOutput;
use aws_sdk_dynamodb::operation::scan::builders::ScanInputBuilder;
use aws_sdk_dynamodb::operation::scan::ScanOutput;
use aws_sdk_dynamodb::operation::transact_get_items::builders::TransactGetItemsInputBuilder;
use aws_sdk_dynamodb::operation::transact_get_items::TransactGetItemsOutput;
use aws_sdk_dynamodb::operation::transact_write_items::builders::TransactWriteItemsInputBuilder;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsOutput;
use aws_sdk_dynamodb::operation::update_item::builders::UpdateItemInputBuilder;
use aws_sdk_dynamodb::operation::update_item::UpdateItemOutput;

use crate::dynamo::{future, Dynamo};

/// Receives one formatted line per store call.
pub trait LogSink: Send + Sync {
    /// Records `line`.
    fn log(&self, line: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, line: &str) {
        self(line)
    }
}

/// Emits each line as a `debug` event with target `ddb::store`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, line: &str) {
        tracing::debug!(target: "ddb::store", "{line}");
    }
}

/// Wraps a store and logs every call with its operation name and input before
/// sending it.
///
/// ```
/// # fn example(client: aws_sdk_dynamodb::Client) {
/// let logged = ddb::Logged::new(client);
/// let printed = ddb::Logged::with_sink(logged, |line: &str| println!("{line}"));
/// # let _ = printed;
/// # }
/// ```
pub struct Logged<D, S = TracingSink> {
    inner: D,
    sink: S,
}

impl<D> Logged<D> {
    /// Logs through `tracing`.
    pub fn new(inner: D) -> Self {
        Logged {
            inner,
            sink: TracingSink,
        }
    }
}

impl<D, S> Logged<D, S> {
    /// Logs to `sink`.
    pub fn with_sink(inner: D, sink: S) -> Self {
        Logged { inner, sink }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Unwraps the store.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: fmt::Debug, S> fmt::Debug for Logged<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logged")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

macro_rules! logged {
    ($($method:ident($input:ty) -> $output:ty => $name:literal;)+) => {
        $(
            fn $method(&self, input: $input) -> future::Call<'_, $output> {
                self.sink.log(&format!(concat!($name, ": {:?}"), input));
                self.inner.$method(input)
            }
        )+
    };
}

impl<D: Dynamo, S: LogSink> Dynamo for Logged<D, S> {
    logged! {
        get_item(GetItemInputBuilder) -> GetItemOutput => "GetItem";
        put_item(PutItemInputBuilder) -> PutItemOutput => "PutItem";
        update_item(UpdateItemInputBuilder) -> UpdateItemOutput => "UpdateItem";
        delete_item(DeleteItemInputBuilder) -> DeleteItemOutput => "DeleteItem";
        query(QueryInputBuilder) -> QueryOutput => "Query";
        scan(ScanInputBuilder) -> ScanOutput => "Scan";
        transact_write_items(TransactWriteItemsInputBuilder) -> TransactWriteItemsOutput
            => "TransactWriteItems";
        transact_get_items(TransactGetItemsInputBuilder) -> TransactGetItemsOutput
            => "TransactGetItems";
    }
}
