// Ordered collection storage (services, process steps, cases)
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::store::{
    as_document, bind_value, require_fields, take_fields, take_order_index, OrderedRecord,
    StoreError,
};

/// One (id, order_index) assignment in a reorder batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: i64,
    pub order_index: i64,
}

/// CRUD and batch reorder over one ordered content collection.
///
/// Every mutation takes the collection's write lock and runs inside a
/// transaction: concurrent mutations are applied one at a time, and no two
/// live rows ever share an `order_index` once a mutation has committed.
pub struct OrderedStore<T> {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
    _phantom: PhantomData<T>,
}

impl<T> Clone for OrderedStore<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            write_lock: self.write_lock.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: OrderedRecord> OrderedStore<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
            _phantom: PhantomData,
        }
    }

    /// All rows, display order. The id tie-break only matters if the index
    /// uniqueness invariant has been violated out of band; listing stays
    /// deterministic even then.
    pub async fn list_all(&self) -> Result<Vec<T>, StoreError> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY order_index ASC, id ASC",
            T::TABLE
        );
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<T, StoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { what: T::LABEL })
    }

    /// Insert a new row. Without `order_index` in the payload the row is
    /// appended after the current maximum; with one, any row already at that
    /// index is shifted up along with everything behind it.
    pub async fn create(&self, payload: Value) -> Result<T, StoreError> {
        let mut doc = as_document(payload)?;
        let requested = take_order_index(&mut doc)?;
        let fields = take_fields::<T>(&mut doc)?;
        require_fields::<T>(&fields)?;

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let order_index = match requested {
            Some(index) => {
                self.shift_from(&mut tx, index, None).await?;
                index
            }
            None => {
                let sql = format!(
                    "SELECT COALESCE(MAX(order_index) + 1, 0) FROM {}",
                    T::TABLE
                );
                let next: (i64,) = sqlx::query_as(&sql).fetch_one(&mut *tx).await?;
                next.0
            }
        };

        let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
        let placeholders = vec!["?"; fields.len() + 1].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}, order_index, created_at) VALUES ({}, datetime('now'))",
            T::TABLE,
            columns.join(", "),
            placeholders
        );
        let mut query = sqlx::query(&sql);
        for (_, value) in fields {
            query = bind_value(query, value);
        }
        let id = query
            .bind(order_index)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let row = self.fetch(&mut tx, id).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Apply only the supplied fields; the rest keep their prior values.
    /// An `order_index` change follows the same shift policy as create.
    pub async fn update(&self, id: i64, patch: Value) -> Result<T, StoreError> {
        let mut doc = as_document(patch)?;
        let requested = take_order_index(&mut doc)?;
        let fields = take_fields::<T>(&mut doc)?;

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
        let current = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound { what: T::LABEL })?;

        if fields.is_empty() && requested.is_none() {
            return Ok(current);
        }

        if let Some(index) = requested {
            self.shift_from(&mut tx, index, Some(id)).await?;
        }

        let mut sets: Vec<String> = fields
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect();
        if requested.is_some() {
            sets.push("order_index = ?".to_string());
        }
        let sql = format!(
            "UPDATE {} SET {}, updated_at = datetime('now') WHERE id = ?",
            T::TABLE,
            sets.join(", ")
        );
        let mut query = sqlx::query(&sql);
        for (_, value) in fields {
            query = bind_value(query, value);
        }
        if let Some(index) = requested {
            query = query.bind(index);
        }
        query.bind(id).execute(&mut *tx).await?;

        let row = self.fetch(&mut tx, id).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Remove a row. Surviving rows keep their `order_index`; gaps are fine.
    /// Returns false when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a batch of `order_index` assignments atomically. Either every
    /// entry applies and the whole collection still has pairwise distinct
    /// indices, or nothing is stored.
    pub async fn reorder(&self, batch: &[ReorderEntry]) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        // Reject contradictory batches before touching storage.
        let mut ids = HashSet::new();
        let mut targets = HashSet::new();
        for entry in batch {
            if entry.order_index < 0 {
                return Err(StoreError::InvalidBatch(
                    "order_index must be a non-negative integer".to_string(),
                ));
            }
            if !ids.insert(entry.id) {
                return Err(StoreError::InvalidBatch(format!(
                    "Duplicate id {} in reorder batch",
                    entry.id
                )));
            }
            if !targets.insert(entry.order_index) {
                return Err(StoreError::InvalidBatch(format!(
                    "Duplicate order_index {} in reorder batch",
                    entry.order_index
                )));
            }
        }

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let sql = format!("UPDATE {} SET order_index = ? WHERE id = ?", T::TABLE);
        for entry in batch {
            let result = sqlx::query(&sql)
                .bind(entry.order_index)
                .bind(entry.id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(StoreError::InvalidBatch(format!(
                    "Unknown id {} in reorder batch",
                    entry.id
                )));
            }
        }

        // The batch may cover only part of the collection: verify it did not
        // park a target on a row it left alone.
        let sql = format!(
            "SELECT order_index FROM {} GROUP BY order_index HAVING COUNT(*) > 1 LIMIT 1",
            T::TABLE
        );
        let duplicate: Option<(i64,)> = sqlx::query_as(&sql).fetch_optional(&mut *tx).await?;
        if let Some((index,)) = duplicate {
            tx.rollback().await?;
            return Err(StoreError::InvalidBatch(format!(
                "Reorder would leave two rows at order_index {}",
                index
            )));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Open a gap at `index`: if some other row occupies it, push that row
    /// and everything behind it up by one.
    async fn shift_from(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        index: i64,
        exclude: Option<i64>,
    ) -> Result<(), StoreError> {
        let excluded = exclude.unwrap_or(-1);
        let sql = format!(
            "SELECT id FROM {} WHERE order_index = ? AND id != ? LIMIT 1",
            T::TABLE
        );
        let occupied: Option<(i64,)> = sqlx::query_as(&sql)
            .bind(index)
            .bind(excluded)
            .fetch_optional(&mut **tx)
            .await?;
        if occupied.is_some() {
            let sql = format!(
                "UPDATE {} SET order_index = order_index + 1 WHERE order_index >= ? AND id != ?",
                T::TABLE
            );
            sqlx::query(&sql)
                .bind(index)
                .bind(excluded)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    async fn fetch(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        id: i64,
    ) -> Result<T, StoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_one(&mut **tx)
            .await?)
    }
}
