/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! In-memory table shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

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
use aws_sdk_dynamodb::types::{AttributeValue, ItemResponse};
use ddb::mapper::{attribute, set_attribute, Attributes, ConversionError};
use ddb::{future, CallError, Deitemizer, Dynamo, Item, Itemizer};

pub const TABLE: &str = "records";
const PK: &str = "pk";

type Names = Option<HashMap<String, String>>;
type Values = Option<HashMap<String, AttributeValue>>;

#[derive(Debug, Default)]
struct Table {
    items: Vec<Attributes>,
    calls: HashMap<&'static str, usize>,
    scan_pages: Vec<usize>,
}

impl Table {
    fn position(&self, key: &Attributes) -> Option<usize> {
        let pk = key.get(PK)?;
        self.items.iter().position(|item| item.get(PK) == Some(pk))
    }

    fn put(&mut self, item: Attributes) {
        match self.position(&item) {
            Some(pos) => self.items[pos] = item,
            None => self.items.push(item),
        }
    }

    fn delete(&mut self, key: &Attributes) {
        if let Some(pos) = self.position(key) {
            self.items.remove(pos);
        }
    }

    fn get(&self, key: &Attributes) -> Option<Attributes> {
        self.position(key).map(|pos| self.items[pos].clone())
    }

    /// Applies `SET #a = :v, #b = :w`, creating the item when absent.
    fn update(
        &mut self,
        key: &Attributes,
        expression: &str,
        names: &Names,
        values: &Values,
    ) -> Result<(), CallError> {
        let assignments = expression
            .strip_prefix("SET ")
            .ok_or_else(|| CallError::service(format!("unsupported update: {expression}")))?;
        let pos = match self.position(key) {
            Some(pos) => pos,
            None => {
                self.items.push(key.clone());
                self.items.len() - 1
            }
        };
        for assignment in assignments.split(", ") {
            let (path, placeholder) = assignment
                .split_once(" = ")
                .ok_or_else(|| CallError::service(format!("unsupported action: {assignment}")))?;
            let name = resolve_name(names, path)?;
            let value = resolve_value(values, placeholder)?;
            self.items[pos].insert(name, value);
        }
        Ok(())
    }
}

fn resolve_name(names: &Names, placeholder: &str) -> Result<String, CallError> {
    names
        .as_ref()
        .and_then(|names| names.get(placeholder))
        .cloned()
        .ok_or_else(|| CallError::service(format!("unknown name {placeholder}")))
}

fn resolve_value(values: &Values, placeholder: &str) -> Result<AttributeValue, CallError> {
    values
        .as_ref()
        .and_then(|values| values.get(placeholder))
        .cloned()
        .ok_or_else(|| CallError::service(format!("unknown value {placeholder}")))
}

/// A single table keyed by `pk` that keeps items in insertion order.
///
/// Scans honour `Limit` and `ExclusiveStartKey`; queries understand a single
/// `#n = :v` key condition; updates understand `SET` assignments of values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl MemoryStore {
    fn table(&self, operation: &'static str) -> MutexGuard<'_, Table> {
        let mut table = self.table.lock().unwrap();
        *table.calls.entry(operation).or_default() += 1;
        table
    }

    /// Number of calls made to `operation`, e.g. `"Scan"`.
    pub fn calls(&self, operation: &str) -> usize {
        let table = self.table.lock().unwrap();
        table.calls.get(operation).copied().unwrap_or_default()
    }

    /// Item counts of every scan page returned so far.
    pub fn scan_pages(&self) -> Vec<usize> {
        self.table.lock().unwrap().scan_pages.clone()
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().items.len()
    }
}

impl Dynamo for MemoryStore {
    fn get_item(&self, input: GetItemInputBuilder) -> future::Call<'_, GetItemOutput> {
        let table = self.table("GetItem");
        let item = input.get_key().as_ref().and_then(|key| table.get(key));
        future::Call::ready(Ok(GetItemOutput::builder().set_item(item).build()))
    }

    fn put_item(&self, input: PutItemInputBuilder) -> future::Call<'_, PutItemOutput> {
        let mut table = self.table("PutItem");
        table.put(input.get_item().clone().unwrap_or_default());
        future::Call::ready(Ok(PutItemOutput::builder().build()))
    }

    fn update_item(&self, input: UpdateItemInputBuilder) -> future::Call<'_, UpdateItemOutput> {
        let mut table = self.table("UpdateItem");
        let result = table
            .update(
                &input.get_key().clone().unwrap_or_default(),
                input.get_update_expression().as_deref().unwrap_or_default(),
                input.get_expression_attribute_names(),
                input.get_expression_attribute_values(),
            )
            .map(|()| UpdateItemOutput::builder().build());
        future::Call::ready(result)
    }

    fn delete_item(&self, input: DeleteItemInputBuilder) -> future::Call<'_, DeleteItemOutput> {
        let mut table = self.table("DeleteItem");
        table.delete(&input.get_key().clone().unwrap_or_default());
        future::Call::ready(Ok(DeleteItemOutput::builder().build()))
    }

    fn query(&self, input: QueryInputBuilder) -> future::Call<'_, QueryOutput> {
        let table = self.table("Query");
        let condition = input.get_key_condition_expression().as_deref().unwrap_or_default();
        let result = condition
            .split_once(" = ")
            .ok_or_else(|| CallError::service(format!("unsupported key condition: {condition}")))
            .and_then(|(name, value)| {
                let name = resolve_name(input.get_expression_attribute_names(), name)?;
                let value = resolve_value(input.get_expression_attribute_values(), value)?;
                let items: Vec<_> = table
                    .items
                    .iter()
                    .filter(|item| item.get(&name) == Some(&value))
                    .cloned()
                    .collect();
                Ok(QueryOutput::builder()
                    .count(items.len() as i32)
                    .set_items(Some(items))
                    .build())
            });
        future::Call::ready(result)
    }

    fn scan(&self, input: ScanInputBuilder) -> future::Call<'_, ScanOutput> {
        let mut table = self.table("Scan");
        let start = match input.get_exclusive_start_key() {
            Some(key) => table.position(key).map_or(table.items.len(), |pos| pos + 1),
            None => 0,
        };
        let limit = input.get_limit().map_or(usize::MAX, |limit| limit as usize);
        let items: Vec<_> = table.items[start..].iter().take(limit).cloned().collect();
        let last_evaluated_key = match items.last() {
            Some(last) if items.len() == limit => last
                .get(PK)
                .map(|pk| HashMap::from([(PK.to_string(), pk.clone())])),
            _ => None,
        };
        table.scan_pages.push(items.len());
        future::Call::ready(Ok(ScanOutput::builder()
            .count(items.len() as i32)
            .set_items(Some(items))
            .set_last_evaluated_key(last_evaluated_key)
            .build()))
    }

    fn transact_write_items(
        &self,
        input: TransactWriteItemsInputBuilder,
    ) -> future::Call<'_, TransactWriteItemsOutput> {
        let mut table = self.table("TransactWriteItems");
        let items = input.get_transact_items().clone().unwrap_or_default();
        for check in items.iter().filter_map(|item| item.condition_check()) {
            if table.position(check.key()).is_none() {
                return future::Call::ready(Err(CallError::service(
                    "TransactionCanceledException: ConditionalCheckFailed",
                )));
            }
        }
        for item in items {
            if let Some(put) = item.put {
                table.put(put.item);
            } else if let Some(delete) = item.delete {
                table.delete(&delete.key);
            } else if let Some(update) = item.update {
                if let Err(err) = table.update(
                    &update.key,
                    &update.update_expression,
                    &update.expression_attribute_names,
                    &update.expression_attribute_values,
                ) {
                    return future::Call::ready(Err(err));
                }
            }
        }
        future::Call::ready(Ok(TransactWriteItemsOutput::builder().build()))
    }

    fn transact_get_items(
        &self,
        input: TransactGetItemsInputBuilder,
    ) -> future::Call<'_, TransactGetItemsOutput> {
        let table = self.table("TransactGetItems");
        let responses = input
            .get_transact_items()
            .iter()
            .flatten()
            .filter_map(|item| item.get())
            .map(|get| {
                ItemResponse::builder()
                    .set_item(table.get(get.key()))
                    .build()
            })
            .collect();
        future::Call::ready(Ok(TransactGetItemsOutput::builder()
            .set_responses(Some(responses))
            .build()))
    }
}

#[derive(Debug)]
pub struct RecordItem {
    pk: String,
    name: String,
}

impl Item for RecordItem {
    fn keys(&self) -> (&'static str, Option<&'static str>) {
        (PK, None)
    }

    fn to_attributes(&self) -> Result<Attributes, ConversionError> {
        let mut attrs = Attributes::new();
        set_attribute(&mut attrs, PK, &self.pk)?;
        set_attribute(&mut attrs, "name", &self.name)?;
        Ok(attrs)
    }

    fn from_attributes(mut attrs: Attributes) -> Result<Self, ConversionError> {
        Ok(RecordItem {
            pk: attribute(&mut attrs, PK)?,
            name: attribute(&mut attrs, "name")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub id: String,
    pub name: String,
}

impl Record {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            name: name.into(),
        }
    }

    /// A record carrying only its key.
    pub fn key(id: impl Into<String>) -> Self {
        Record::new(id, "")
    }
}

impl Itemizer for Record {
    type Item = RecordItem;

    fn item(&self) -> Option<RecordItem> {
        Some(RecordItem {
            pk: self.id.clone(),
            name: self.name.clone(),
        })
    }
}

impl Deitemizer for Record {
    fn from_item(&mut self, item: RecordItem) -> Result<(), ConversionError> {
        self.id = item.pk;
        self.name = item.name;
        Ok(())
    }
}
