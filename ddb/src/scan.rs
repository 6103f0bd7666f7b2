/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_dynamodb::operation::scan::builders::ScanInputBuilder;
use ddb_expressions::Builder;

use crate::context::Context;
use crate::dynamo::Dynamo;
use crate::error::Error;
use crate::op::{build_expression, OperationKind};
use crate::result::Cursor;

/// A paginated read of a whole table or index.
///
/// Like [`Query`](crate::Query) without a key condition. The returned cursor's
/// `len` counts every item fetched so far.
#[derive(Debug, Clone)]
pub struct Scan {
    builder: Builder,
    input: ScanInputBuilder,
}

impl Scan {
    /// Binds an expression builder to a scan input shape.
    pub fn new(builder: Builder, input: ScanInputBuilder) -> Self {
        Scan { builder, input }
    }

    /// Finalizes the filter and projection and returns the cursor. No request is
    /// sent until the cursor's first `next`.
    pub fn run<'a>(self, cx: &Context, store: &'a dyn Dynamo) -> Result<Cursor<'a>, Error> {
        let mut input = self.input;
        if let Some(expr) = build_expression(OperationKind::Scan, &self.builder)? {
            input = input
                .set_filter_expression(expr.filter().map(str::to_owned))
                .set_projection_expression(expr.projection().map(str::to_owned))
                .set_expression_attribute_names(expr.names().cloned())
                .set_expression_attribute_values(expr.values().cloned());
        }
        Ok(Cursor::scanning(store, cx.clone(), input))
    }
}
