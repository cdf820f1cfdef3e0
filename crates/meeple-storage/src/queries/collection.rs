// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collection snapshot queries.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::params;
use rusqlite::types::Type;

use meeple_core::{CollectionItem, Subtype, SyncError};

use crate::database::Database;

/// Replace the stored collection snapshot in one transaction.
pub async fn replace_collection(db: &Database, items: &[CollectionItem]) -> Result<(), SyncError> {
    let items = items.to_vec();
    db.connection()
        .call(move |conn| -> Result<(), tokio_rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM collection_items", [])?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO collection_items
                         (game_id, subtype, name, year_published, thumbnail_url,
                          last_modified, position)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )?;
                for (position, item) in items.iter().enumerate() {
                    stmt.execute(params![
                        item.game_id,
                        item.subtype.as_str(),
                        item.name,
                        item.year_published,
                        item.thumbnail_url,
                        item.last_modified.map(|t| t.to_rfc3339()),
                        position as i64,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Read the snapshot back in stored (fetch) order.
pub async fn collection(db: &Database) -> Result<Vec<CollectionItem>, SyncError> {
    db.connection()
        .call(|conn| -> Result<Vec<CollectionItem>, tokio_rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT game_id, subtype, name, year_published, thumbnail_url, last_modified
                 FROM collection_items ORDER BY position",
            )?;
            let rows = stmt.query_map([], |row| {
                let subtype: String = row.get(1)?;
                let subtype = Subtype::from_str(&subtype).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into())
                })?;
                let last_modified: Option<String> = row.get(5)?;
                let last_modified = last_modified
                    .map(|s| {
                        DateTime::parse_from_rfc3339(&s)
                            .map(|t| t.with_timezone(&Utc))
                            .map_err(|e| {
                                rusqlite::Error::FromSqlConversionFailure(
                                    5,
                                    Type::Text,
                                    Box::new(e),
                                )
                            })
                    })
                    .transpose()?;
                Ok(CollectionItem {
                    game_id: row.get(0)?,
                    subtype,
                    name: row.get(2)?,
                    year_published: row.get(3)?,
                    thumbnail_url: row.get(4)?,
                    last_modified,
                })
            })?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(items)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
