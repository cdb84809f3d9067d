//! Credential store contract
//!
//! The store is treated as a whole-table resource: callers read a snapshot
//! of every record and write back the complete set. There is no per-record
//! update protocol, so callers that modify the set must serialize their
//! read-modify-write cycles themselves.

use async_trait::async_trait;

use crate::Result;

mod password;
mod sqlite;

pub use password::{hash_password, verify_password};
pub use sqlite::SqliteCredentialStore;

/// One user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Unique key, compared case-sensitively
    pub email: String,
    /// Display name shown once authenticated
    pub name: String,
    /// Password as stored (`sha256$<salt>$<digest>`)
    pub password: String,
}

/// Durable email-keyed account storage
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Every stored record, or an empty list when no store exists yet
    async fn load_all(&self) -> Result<Vec<CredentialRecord>>;

    /// Replace the whole store with `records`
    async fn save_all(&self, records: &[CredentialRecord]) -> Result<()>;
}
