/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_dynamodb::operation::query::builders::QueryInputBuilder;
use ddb_expressions::Builder;

use crate::context::Context;
use crate::dynamo::Dynamo;
use crate::error::Error;
use crate::op::{build_expression, OperationKind};
use crate::result::Cursor;

/// A paginated read of one partition.
///
/// The expression builder supplies the key condition and, optionally, a filter
/// and a projection. Everything else (table, index, page size, consistency,
/// sort direction) is taken from the input shape as given.
///
/// ```no_run
/// # async fn example(client: aws_sdk_dynamodb::Client) -> Result<(), ddb::Error> {
/// use aws_sdk_dynamodb::operation::query::builders::QueryInputBuilder;
/// use ddb::expression::{key, Builder};
/// use ddb::{Context, Query};
///
/// let builder = Builder::new().with_key_condition(key("pk").equal("user#1"));
/// let input = QueryInputBuilder::default().table_name("users").limit(25);
/// let mut cursor = Query::new(builder, input).run(&Context::new(), &client)?;
/// while cursor.next().await {
///     // cursor.scan(&mut entity)?
/// }
/// if let Some(err) = cursor.into_err() {
///     return Err(err);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    builder: Builder,
    input: QueryInputBuilder,
}

impl Query {
    /// Binds an expression builder to a query input shape.
    pub fn new(builder: Builder, input: QueryInputBuilder) -> Self {
        Query { builder, input }
    }

    /// Finalizes the expressions and returns the cursor.
    ///
    /// No request is sent until the cursor's first `next`. An empty expression
    /// builder leaves the input's own expressions untouched.
    pub fn run<'a>(self, cx: &Context, store: &'a dyn Dynamo) -> Result<Cursor<'a>, Error> {
        let mut input = self.input;
        if let Some(expr) = build_expression(OperationKind::Query, &self.builder)? {
            input = input
                .set_key_condition_expression(expr.key_condition().map(str::to_owned))
                .set_filter_expression(expr.filter().map(str::to_owned))
                .set_projection_expression(expr.projection().map(str::to_owned))
                .set_expression_attribute_names(expr.names().cloned())
                .set_expression_attribute_values(expr.values().cloned());
        }
        Ok(Cursor::querying(store, cx.clone(), input))
    }
}
