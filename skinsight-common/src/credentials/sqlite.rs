//! SQLite-backed credential store
//!
//! One table, `users(email, name, password)`, in a single database file.
//! Reading never creates the file; the first save does.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{CredentialRecord, CredentialStore};
use crate::Result;

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    email TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    password TEXT NOT NULL
)";

/// Credential store in a SQLite file
pub struct SqliteCredentialStore {
    path: PathBuf,
    pool: OnceCell<SqlitePool>,
}

impl SqliteCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pool: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .get_or_try_init(|| async {
                let options = SqliteConnectOptions::new()
                    .filename(&self.path)
                    .create_if_missing(true);
                let pool = SqlitePoolOptions::new()
                    .max_connections(1)
                    .connect_with(options)
                    .await?;
                sqlx::query(CREATE_USERS_TABLE).execute(&pool).await?;
                info!("Opened credential store at {}", self.path.display());
                Ok::<_, crate::Error>(pool)
            })
            .await
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn load_all(&self) -> Result<Vec<CredentialRecord>> {
        if self.pool.get().is_none() && !self.path.exists() {
            debug!("Credential store {} absent, no records", self.path.display());
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, (String, String, String)>(
            "SELECT email, name, password FROM users ORDER BY rowid",
        )
        .fetch_all(self.pool().await?)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(email, name, password)| CredentialRecord { email, name, password })
            .collect())
    }

    async fn save_all(&self, records: &[CredentialRecord]) -> Result<()> {
        let mut tx = self.pool().await?.begin().await?;

        sqlx::query("DELETE FROM users").execute(&mut *tx).await?;
        for record in records {
            sqlx::query("INSERT INTO users (email, name, password) VALUES (?, ?, ?)")
                .bind(&record.email)
                .bind(&record.name)
                .bind(&record.password)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!("Saved {} credential records", records.len());
        Ok(())
    }
}
