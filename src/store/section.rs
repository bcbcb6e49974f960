// Singleton section storage (hero, about)
use std::marker::PhantomData;

use serde_json::Value;
use sqlx::SqlitePool;

use crate::store::{as_document, bind_value, take_fields, Record, StoreError};

/// Read/update access to a single-row content section. The row is created
/// by the bootstrap seed and lives at the fixed id 1; updates merge the
/// supplied fields into it.
pub struct SectionStore<T> {
    pool: SqlitePool,
    _phantom: PhantomData<T>,
}

impl<T> Clone for SectionStore<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Record> SectionStore<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    /// The section row. Bootstrap guarantees it exists, so its absence is a
    /// contract violation and surfaces as a storage error, not a 404.
    pub async fn get(&self) -> Result<T, StoreError> {
        let sql = format!("SELECT * FROM {} LIMIT 1", T::TABLE);
        Ok(sqlx::query_as::<_, T>(&sql).fetch_one(&self.pool).await?)
    }

    /// Merge the supplied fields into the section row and refresh
    /// `updated_at`. An empty patch returns the row untouched.
    pub async fn update(&self, patch: Value) -> Result<T, StoreError> {
        let mut doc = as_document(patch)?;
        let fields = take_fields::<T>(&mut doc)?;

        if fields.is_empty() {
            return self.get().await;
        }

        let mut tx = self.pool.begin().await?;

        let sets: Vec<String> = fields
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect();
        let sql = format!(
            "UPDATE {} SET {}, updated_at = datetime('now') WHERE id = 1",
            T::TABLE,
            sets.join(", ")
        );
        let mut query = sqlx::query(&sql);
        for (_, value) in fields {
            query = bind_value(query, value);
        }
        query.execute(&mut *tx).await?;

        // a missing row errors here, same contract violation as get()
        let sql = format!("SELECT * FROM {} WHERE id = 1", T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql).fetch_one(&mut *tx).await?;
        tx.commit().await?;
        Ok(row)
    }
}
