/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Scripted store and sample entities shared by the unit tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

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
use aws_sdk_dynamodb::types::AttributeValue;
use ddb_mapper_core::{
    attribute, set_attribute, Attributes, ConversionError, Deitemizer, Item, Itemizer,
};

use crate::dynamo::{future, Dynamo};
use crate::error::CallError;

/// A request recorded by [`Scripted`].
#[derive(Debug, Clone)]
pub(crate) enum Call {
    GetItem(GetItemInputBuilder),
    PutItem(PutItemInputBuilder),
    UpdateItem(UpdateItemInputBuilder),
    DeleteItem(DeleteItemInputBuilder),
    Query(QueryInputBuilder),
    Scan(ScanInputBuilder),
    TransactWriteItems(TransactWriteItemsInputBuilder),
    TransactGetItems(TransactGetItemsInputBuilder),
}

impl Call {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Call::GetItem(_) => "GetItem",
            Call::PutItem(_) => "PutItem",
            Call::UpdateItem(_) => "UpdateItem",
            Call::DeleteItem(_) => "DeleteItem",
            Call::Query(_) => "Query",
            Call::Scan(_) => "Scan",
            Call::TransactWriteItems(_) => "TransactWriteItems",
            Call::TransactGetItems(_) => "TransactGetItems",
        }
    }
}

/// One page of query or scan results.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedPage {
    items: Vec<Attributes>,
    last_evaluated_key: Option<Attributes>,
}

impl From<ScriptedPage> for ScanOutput {
    fn from(page: ScriptedPage) -> Self {
        ScanOutput::builder()
            .set_count(Some(page.items.len() as i32))
            .set_items(Some(page.items))
            .set_last_evaluated_key(page.last_evaluated_key)
            .build()
    }
}

impl From<ScriptedPage> for QueryOutput {
    fn from(page: ScriptedPage) -> Self {
        QueryOutput::builder()
            .set_count(Some(page.items.len() as i32))
            .set_items(Some(page.items))
            .set_last_evaluated_key(page.last_evaluated_key)
            .build()
    }
}

/// A page of items `{pk: id, name: id}` continuing after `last`.
pub(crate) fn page(ids: &[&str], last: Option<&str>) -> ScriptedPage {
    ScriptedPage {
        items: ids
            .iter()
            .map(|id| attrs(&[("pk", id), ("name", id)]))
            .collect(),
        last_evaluated_key: last.map(|last| attrs(&[("pk", last)])),
    }
}

/// String attributes.
pub(crate) fn attrs(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), AttributeValue::S(v.to_string())))
        .collect()
}

#[derive(Debug, Default)]
struct Script {
    calls: Vec<Call>,
    failing: HashSet<&'static str>,
    stalling: HashSet<&'static str>,
    gets: VecDeque<GetItemOutput>,
    puts: VecDeque<PutItemOutput>,
    queries: VecDeque<QueryOutput>,
    scans: VecDeque<ScanOutput>,
    transact_gets: VecDeque<TransactGetItemsOutput>,
}

/// A store that records every request and replies from queued outputs.
///
/// Queued outputs are used first. Once an operation's queue is empty it never
/// completes if it was marked with [`stall`](Scripted::stall), fails if it was
/// marked with [`fail`](Scripted::fail) and otherwise returns an empty output.
#[derive(Debug, Default)]
pub(crate) struct Scripted {
    script: Mutex<Script>,
}

impl Scripted {
    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    pub(crate) fn call_names(&self) -> Vec<&'static str> {
        self.script().calls.iter().map(Call::name).collect()
    }

    pub(crate) fn queries(&self) -> Vec<QueryInputBuilder> {
        self.script()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Query(input) => Some(input.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn scans(&self) -> Vec<ScanInputBuilder> {
        self.script()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Scan(input) => Some(input.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn fail(&self, operation: &'static str) {
        self.script().failing.insert(operation);
    }

    pub(crate) fn stall(&self, operation: &'static str) {
        self.script().stalling.insert(operation);
    }

    pub(crate) fn push_get(&self, output: GetItemOutput) {
        self.script().gets.push_back(output);
    }

    pub(crate) fn push_put(&self, output: PutItemOutput) {
        self.script().puts.push_back(output);
    }

    pub(crate) fn push_query(&self, page: ScriptedPage) {
        self.script().queries.push_back(page.into());
    }

    pub(crate) fn push_scan(&self, page: ScriptedPage) {
        self.script().scans.push_back(page.into());
    }

    pub(crate) fn push_transact_get(&self, output: TransactGetItemsOutput) {
        self.script().transact_gets.push_back(output);
    }

    fn reply<'a, T: 'a>(
        &'a self,
        call: Call,
        queued: impl FnOnce(&mut Script) -> Option<T>,
        empty: impl FnOnce() -> T,
    ) -> future::Call<'a, T> {
        let mut script = self.script();
        let name = call.name();
        script.calls.push(call);
        let result = match queued(&mut script) {
            Some(output) => Ok(output),
            None if script.stalling.contains(name) => {
                return future::Call::new(std::future::pending());
            }
            None if script.failing.contains(name) => {
                Err(CallError::service("scripted failure"))
            }
            None => Ok(empty()),
        };
        future::Call::ready(result)
    }
}

impl Dynamo for Scripted {
    fn get_item(&self, input: GetItemInputBuilder) -> future::Call<'_, GetItemOutput> {
        self.reply(
            Call::GetItem(input),
            |s| s.gets.pop_front(),
            || GetItemOutput::builder().build(),
        )
    }

    fn put_item(&self, input: PutItemInputBuilder) -> future::Call<'_, PutItemOutput> {
        self.reply(
            Call::PutItem(input),
            |s| s.puts.pop_front(),
            || PutItemOutput::builder().build(),
        )
    }

    fn update_item(&self, input: UpdateItemInputBuilder) -> future::Call<'_, UpdateItemOutput> {
        self.reply(
            Call::UpdateItem(input),
            |_| None,
            || UpdateItemOutput::builder().build(),
        )
    }

    fn delete_item(&self, input: DeleteItemInputBuilder) -> future::Call<'_, DeleteItemOutput> {
        self.reply(
            Call::DeleteItem(input),
            |_| None,
            || DeleteItemOutput::builder().build(),
        )
    }

    fn query(&self, input: QueryInputBuilder) -> future::Call<'_, QueryOutput> {
        self.reply(
            Call::Query(input),
            |s| s.queries.pop_front(),
            || QueryOutput::builder().build(),
        )
    }

    fn scan(&self, input: ScanInputBuilder) -> future::Call<'_, ScanOutput> {
        self.reply(
            Call::Scan(input),
            |s| s.scans.pop_front(),
            || ScanOutput::builder().build(),
        )
    }

    fn transact_write_items(
        &self,
        input: TransactWriteItemsInputBuilder,
    ) -> future::Call<'_, TransactWriteItemsOutput> {
        self.reply(
            Call::TransactWriteItems(input),
            |_| None,
            || TransactWriteItemsOutput::builder().build(),
        )
    }

    fn transact_get_items(
        &self,
        input: TransactGetItemsInputBuilder,
    ) -> future::Call<'_, TransactGetItemsOutput> {
        self.reply(
            Call::TransactGetItems(input),
            |s| s.transact_gets.pop_front(),
            || TransactGetItemsOutput::builder().build(),
        )
    }
}

#[derive(Debug)]
pub(crate) struct EntityItem {
    pk: String,
    name: String,
    tags: Option<Vec<String>>,
}

impl Item for EntityItem {
    fn keys(&self) -> (&'static str, Option<&'static str>) {
        ("pk", None)
    }

    fn to_attributes(&self) -> Result<Attributes, ConversionError> {
        let mut attrs = Attributes::new();
        set_attribute(&mut attrs, "pk", &self.pk)?;
        set_attribute(&mut attrs, "name", &self.name)?;
        if let Some(tags) = &self.tags {
            set_attribute(&mut attrs, "tags", tags)?;
        }
        Ok(attrs)
    }

    fn from_attributes(mut attrs: Attributes) -> Result<Self, ConversionError> {
        Ok(EntityItem {
            pk: attribute(&mut attrs, "pk")?,
            name: attribute(&mut attrs, "name")?,
            tags: attribute(&mut attrs, "tags")?,
        })
    }
}

/// A record keyed by `pk` alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Entity {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) tags: Option<Vec<String>>,
    absent: bool,
}

impl Entity {
    pub(crate) fn new(id: &str, name: &str) -> Self {
        Entity {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// An entity with no stored representation.
    pub(crate) fn absent() -> Self {
        Entity {
            absent: true,
            ..Default::default()
        }
    }

    pub(crate) fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }
}

impl Itemizer for Entity {
    type Item = EntityItem;

    fn item(&self) -> Option<EntityItem> {
        if self.absent {
            return None;
        }
        Some(EntityItem {
            pk: self.id.clone(),
            name: self.name.clone(),
            tags: self.tags.clone(),
        })
    }
}

impl Deitemizer for Entity {
    fn from_item(&mut self, item: EntityItem) -> Result<(), ConversionError> {
        self.id = item.pk;
        self.name = item.name;
        self.tags = item.tags;
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct KeyedItem {
    pk: String,
    sk: String,
    name: String,
}

impl Item for KeyedItem {
    fn keys(&self) -> (&'static str, Option<&'static str>) {
        ("pk", Some("sk"))
    }

    fn to_attributes(&self) -> Result<Attributes, ConversionError> {
        let mut attrs = Attributes::new();
        set_attribute(&mut attrs, "pk", &self.pk)?;
        set_attribute(&mut attrs, "sk", &self.sk)?;
        set_attribute(&mut attrs, "name", &self.name)?;
        Ok(attrs)
    }

    fn from_attributes(mut attrs: Attributes) -> Result<Self, ConversionError> {
        Ok(KeyedItem {
            pk: attribute(&mut attrs, "pk")?,
            sk: attribute(&mut attrs, "sk")?,
            name: attribute(&mut attrs, "name")?,
        })
    }
}

/// A record with a compound `pk`/`sk` key.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyedEntity {
    pk: String,
    sk: String,
    name: String,
}

impl KeyedEntity {
    pub(crate) fn new(pk: &str, sk: &str, name: &str) -> Self {
        KeyedEntity {
            pk: pk.to_string(),
            sk: sk.to_string(),
            name: name.to_string(),
        }
    }
}

impl Itemizer for KeyedEntity {
    type Item = KeyedItem;

    fn item(&self) -> Option<KeyedItem> {
        Some(KeyedItem {
            pk: self.pk.clone(),
            sk: self.sk.clone(),
            name: self.name.clone(),
        })
    }
}
