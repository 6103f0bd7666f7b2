/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::TryReserveError;

use ddb_expressions::BuildError;
use ddb_mapper_core::ConversionError;

use crate::op::OperationKind;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failed access-layer operation
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A condition, filter, key-condition, update or projection could not be built
    #[error("failed to build expression")]
    ExpressionBuild(#[source] BuildError),

    /// An item could not be converted to or from its entity
    #[error("failed to map item")]
    Mapping(#[source] ConversionError),

    /// A declared key attribute was absent or empty
    #[error("missing key attribute '{attribute}'")]
    MissingKey {
        /// Name of the key attribute.
        attribute: String,
    },

    /// The itemizer produced no item
    #[error("itemizer returned no item")]
    MissingItem,

    /// A request shape was rejected by its builder, e.g. a missing table name
    #[error("invalid {operation} input")]
    InvalidInput {
        /// The operation whose input was rejected.
        operation: OperationKind,
        /// Why the builder rejected it.
        source: aws_sdk_dynamodb::error::BuildError,
    },

    /// A multi-item transaction was rejected or aborted
    #[error("failed to transact")]
    Transaction(#[source] CallError),

    /// A read call failed
    #[error("failed to {operation}")]
    Fetch {
        /// The read that failed.
        operation: OperationKind,
        /// The store's cause.
        source: CallError,
    },

    /// A single direct write call failed
    #[error("failed to {operation} item")]
    Write {
        /// The write that failed.
        operation: OperationKind,
        /// The store's cause.
        source: CallError,
    },

    /// `Cursor::scan` was called without a current item
    #[error("cursor has no current item, call next first")]
    InvalidCursorState,

    /// The destination of a bulk unmarshal could not grow
    #[error("destination cannot hold {additional} more items")]
    InvalidDestination {
        /// Items that could not be reserved.
        additional: usize,
        /// The allocation failure.
        source: TryReserveError,
    },

    /// A read or write builder was run without any operation
    #[error("nothing to run, add at least one operation")]
    NothingToRun,
}

impl Error {
    /// Maps a key extraction failure, reporting absent key attributes as
    /// [`Error::MissingKey`].
    pub(crate) fn from_key(err: ConversionError) -> Self {
        match (err.is_missing_attribute(), err.field()) {
            (true, Some(attribute)) => Error::MissingKey {
                attribute: attribute.to_string(),
            },
            _ => Error::Mapping(err),
        }
    }
}

/// A failed call to the store
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CallError {
    /// The call's context was cancelled
    #[error("call cancelled")]
    Cancelled,

    /// The call's context deadline elapsed first
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The store returned an error
    #[error("store call failed")]
    Service(#[source] BoxError),
}

impl CallError {
    /// Wraps an error returned by the store.
    pub fn service(err: impl Into<BoxError>) -> Self {
        CallError::Service(err.into())
    }
}
