//! SQLite-backed data store for items.
//!
//! # Responsibility
//! - Provide the `DataStore<Item>` CRUD operations over the `items` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Blank identifiers are rejected before any SQL is issued.
//! - Writes report success only when exactly one row was affected.
//! - Delete confirms existence with a read before removing the row.

use super::{DataStore, StoreError, StoreResult};
use crate::db::DbHandle;
use crate::model::item::{is_blank_id, Item};
use async_trait::async_trait;
use log::{debug, warn};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::time::Instant;

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    text,
    description,
    value
FROM items";

/// `DataStore<Item>` over a shared [`DbHandle`].
///
/// Cheap to clone; every clone talks to the same connection.
#[derive(Clone)]
pub struct SqliteItemStore {
    db: DbHandle,
}

impl SqliteItemStore {
    pub fn new(db: DbHandle) -> Self {
        Self { db }
    }

    /// Returns the handle this store was built from.
    pub fn db(&self) -> &DbHandle {
        &self.db
    }
}

#[async_trait]
impl DataStore<Item> for SqliteItemStore {
    async fn create(&self, item: &Item) -> StoreResult<bool> {
        if let Err(err) = item.validate() {
            warn!("event=item_create module=store status=rejected reason={err}");
            return Ok(false);
        }

        let started_at = Instant::now();
        let conn = self.db.connection().await?;
        let created = insert_item(&conn, item)?;
        debug!(
            "event=item_create module=store status={} item_id={} duration_ms={}",
            status_label(created),
            item.id,
            started_at.elapsed().as_millis()
        );
        Ok(created)
    }

    async fn read(&self, id: &str) -> StoreResult<Option<Item>> {
        if is_blank_id(id) {
            return Ok(None);
        }

        let conn = self.db.connection().await?;
        select_item(&conn, id)
    }

    async fn update(&self, item: &Item) -> StoreResult<bool> {
        if let Err(err) = item.validate() {
            warn!("event=item_update module=store status=rejected reason={err}");
            return Ok(false);
        }

        let started_at = Instant::now();
        let conn = self.db.connection().await?;
        let changed = conn.execute(
            "UPDATE items
             SET
                text = ?1,
                description = ?2,
                value = ?3
             WHERE id = ?4;",
            params![
                item.text.as_str(),
                item.description.as_str(),
                item.value,
                item.id.as_str()
            ],
        )?;

        let updated = changed == 1;
        debug!(
            "event=item_update module=store status={} item_id={} duration_ms={}",
            status_label(updated),
            item.id,
            started_at.elapsed().as_millis()
        );
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        if is_blank_id(id) {
            return Ok(false);
        }

        let started_at = Instant::now();
        let conn = self.db.connection().await?;
        let Some(existing) = select_item(&conn, id)? else {
            debug!("event=item_delete module=store status=not_found item_id={id}");
            return Ok(false);
        };

        let changed = conn.execute("DELETE FROM items WHERE id = ?1;", [existing.id.as_str()])?;
        let deleted = changed == 1;
        debug!(
            "event=item_delete module=store status={} item_id={} duration_ms={}",
            status_label(deleted),
            id,
            started_at.elapsed().as_millis()
        );
        Ok(deleted)
    }

    async fn list(&self, _force_refresh: bool) -> StoreResult<Vec<Item>> {
        let conn = self.db.connection().await?;
        select_all_items(&conn)
    }
}

fn insert_item(conn: &Connection, item: &Item) -> StoreResult<bool> {
    let result = conn.execute(
        "INSERT INTO items (
            id,
            text,
            description,
            value
        ) VALUES (?1, ?2, ?3, ?4);",
        params![
            item.id.as_str(),
            item.text.as_str(),
            item.description.as_str(),
            item.value
        ],
    );

    match result {
        Ok(changed) => Ok(changed == 1),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == ErrorCode::ConstraintViolation =>
        {
            warn!(
                "event=item_create module=store status=rejected reason=duplicate_id item_id={}",
                item.id
            );
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

fn select_item(conn: &Connection, id: &str) -> StoreResult<Option<Item>> {
    let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1 LIMIT 1;"))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_item_row(row)))
        .optional()?;
    row.transpose()
}

fn select_all_items(conn: &Connection) -> StoreResult<Vec<Item>> {
    let mut stmt = conn.prepare(ITEM_SELECT_SQL)?;
    let mut rows = stmt.query([])?;
    let mut items = Vec::new();

    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row)?);
    }

    Ok(items)
}

fn parse_item_row(row: &Row<'_>) -> StoreResult<Item> {
    let item = Item {
        id: row.get("id")?,
        text: row.get("text")?,
        description: row.get("description")?,
        value: row.get("value")?,
    };

    if is_blank_id(&item.id) {
        return Err(StoreError::InvalidData("blank id in items.id".to_string()));
    }
    Ok(item)
}

fn status_label(succeeded: bool) -> &'static str {
    if succeeded {
        "ok"
    } else {
        "not_found"
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteItemStore;
    use crate::db::DbHandle;
    use crate::model::item::Item;
    use crate::store::{DataStore, StoreError};

    fn store() -> SqliteItemStore {
        SqliteItemStore::new(DbHandle::open_in_memory().unwrap())
    }

    #[tokio::test]
    async fn duplicate_id_create_returns_false() {
        let store = store();
        let item = Item::with_id("1", "Milk", "2%");

        assert!(store.create(&item).await.unwrap());
        assert!(!store.create(&item).await.unwrap());
        assert_eq!(store.list(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_persisted_id_is_reported_as_invalid_data() {
        let store = store();
        {
            let conn = store.db().connection().await.unwrap();
            conn.execute(
                "INSERT INTO items (id, text, description) VALUES ('', 'x', 'y');",
                [],
            )
            .unwrap();
        }

        let err = store.list(true).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }
}
