// Admin account storage
use sqlx::SqlitePool;

use crate::models::Admin;
use crate::store::StoreError;

#[derive(Clone)]
pub struct AdminStore {
    pool: SqlitePool,
}

impl AdminStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        Ok(
            sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Admin, StoreError> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { what: "Admin" })
    }

    /// Insert a new admin with a pre-hashed password. Usernames are unique;
    /// a second account under the same name is reported as a conflict.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<Admin, StoreError> {
        let result = sqlx::query("INSERT INTO admins (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(StoreError::Conflict("Username already exists".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        self.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> AdminStore {
        let pool = crate::db::connect_memory().await.unwrap();
        crate::bootstrap::init(&pool).await.unwrap();
        AdminStore::new(pool)
    }

    #[tokio::test]
    async fn create_and_find_admin() {
        let store = store().await;
        let created = store.create("admin", "$2b$04$fakehash").await.unwrap();
        assert_eq!(created.username, "admin");

        let found = store.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$2b$04$fakehash");

        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = store().await;
        store.create("admin", "h1").await.unwrap();
        let err = store.create("admin", "h2").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
