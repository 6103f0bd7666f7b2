/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The store capability the access layer is written against.

use std::fmt;
use std::sync::Arc;

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

use crate::error::CallError;

pub mod future {
    //! Future returned by every [`Dynamo`](super::Dynamo) method.

    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use aws_smithy_async::future::now_or_later::NowOrLater;

    use crate::error::CallError;

    type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CallError>> + Send + 'a>>;

    /// One in-flight store call.
    pub struct Call<'a, T>(NowOrLater<Result<T, CallError>, BoxFuture<'a, T>>);

    impl<'a, T> Call<'a, T> {
        /// Wraps a future that performs the call.
        pub fn new(f: impl Future<Output = Result<T, CallError>> + Send + 'a) -> Self {
            Self(NowOrLater::new(Box::pin(f)))
        }

        /// A call whose result is already known.
        pub fn ready(result: Result<T, CallError>) -> Self {
            Self(NowOrLater::ready(result))
        }
    }

    impl<T> Future for Call<'_, T> {
        type Output = Result<T, CallError>;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            Pin::new(&mut self.0).poll(cx)
        }
    }

    impl<T> std::fmt::Debug for Call<'_, T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("Call")
        }
    }
}

/// The subset of the DynamoDB API used by this crate.
///
/// Every method takes the operation's input builder and resolves to its output.
/// Implemented for [`aws_sdk_dynamodb::Client`]; tests and decorators such as
/// [`Logged`](crate::Logged) provide their own implementations.
pub trait Dynamo: Send + Sync + fmt::Debug {
    /// `GetItem`
    fn get_item(&self, input: GetItemInputBuilder) -> future::Call<'_, GetItemOutput>;

    /// `PutItem`
    fn put_item(&self, input: PutItemInputBuilder) -> future::Call<'_, PutItemOutput>;

    /// `UpdateItem`
    fn update_item(&self, input: UpdateItemInputBuilder) -> future::Call<'_, UpdateItemOutput>;

    /// `DeleteItem`
    fn delete_item(&self, input: DeleteItemInputBuilder) -> future::Call<'_, DeleteItemOutput>;

    /// `Query`
    fn query(&self, input: QueryInputBuilder) -> future::Call<'_, QueryOutput>;

    /// `Scan`
    fn scan(&self, input: ScanInputBuilder) -> future::Call<'_, ScanOutput>;

    /// `TransactWriteItems`
    fn transact_write_items(
        &self,
        input: TransactWriteItemsInputBuilder,
    ) -> future::Call<'_, TransactWriteItemsOutput>;

    /// `TransactGetItems`
    fn transact_get_items(
        &self,
        input: TransactGetItemsInputBuilder,
    ) -> future::Call<'_, TransactGetItemsOutput>;
}

// Each SDK call is sent through the builder's `send_with`, so the client's own
// retry and timeout configuration applies unchanged.
macro_rules! send_with_client {
    ($($method:ident($input:ty) -> $output:ty;)+) => {
        $(
            fn $method(&self, input: $input) -> future::Call<'_, $output> {
                future::Call::new(async move {
                    input.send_with(self).await.map_err(CallError::service)
                })
            }
        )+
    };
}

impl Dynamo for aws_sdk_dynamodb::Client {
    send_with_client! {
        get_item(GetItemInputBuilder) -> GetItemOutput;
        put_item(PutItemInputBuilder) -> PutItemOutput;
        update_item(UpdateItemInputBuilder) -> UpdateItemOutput;
        delete_item(DeleteItemInputBuilder) -> DeleteItemOutput;
        query(QueryInputBuilder) -> QueryOutput;
        scan(ScanInputBuilder) -> ScanOutput;
        transact_write_items(TransactWriteItemsInputBuilder) -> TransactWriteItemsOutput;
        transact_get_items(TransactGetItemsInputBuilder) -> TransactGetItemsOutput;
    }
}

macro_rules! delegate {
    ($($method:ident($input:ty) -> $output:ty;)+) => {
        $(
            fn $method(&self, input: $input) -> future::Call<'_, $output> {
                (**self).$method(input)
            }
        )+
    };
}

macro_rules! delegate_all {
    () => {
        delegate! {
            get_item(GetItemInputBuilder) -> GetItemOutput;
            put_item(PutItemInputBuilder) -> PutItemOutput;
            update_item(UpdateItemInputBuilder) -> UpdateItemOutput;
            delete_item(DeleteItemInputBuilder) -> DeleteItemOutput;
            query(QueryInputBuilder) -> QueryOutput;
            scan(ScanInputBuilder) -> ScanOutput;
            transact_write_items(TransactWriteItemsInputBuilder) -> TransactWriteItemsOutput;
            transact_get_items(TransactGetItemsInputBuilder) -> TransactGetItemsOutput;
        }
    };
}

impl<D: Dynamo + ?Sized> Dynamo for &D {
    delegate_all!();
}

impl<D: Dynamo + ?Sized> Dynamo for Arc<D> {
    delegate_all!();
}

impl<D: Dynamo + ?Sized> Dynamo for Box<D> {
    delegate_all!();
}
