/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use ddb_mapper_core::Deitemizer;

use crate::error::Error;
use crate::result::Cursor;

/// Decodes every remaining item of `cursor` into new entities appended to `dest`.
///
/// Space is reserved once per fetched page rather than per item. The cursor is
/// consumed; a fetch error that stopped it is returned as is, and entities decoded
/// before the failure stay in `dest`.
pub async fn drain_all<T>(mut cursor: Cursor<'_>, dest: &mut Vec<T>) -> Result<(), Error>
where
    T: Deitemizer + Default,
{
    let mut reserved = 0;
    while cursor.next().await {
        let fetched = cursor.fetched();
        if fetched > reserved {
            let additional = fetched - reserved;
            dest.try_reserve(additional)
                .map_err(|source| Error::InvalidDestination { additional, source })?;
            reserved = fetched;
        }
        let mut entity = T::default();
        cursor.scan(&mut entity)?;
        dest.push(entity);
    }
    match cursor.into_err() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
