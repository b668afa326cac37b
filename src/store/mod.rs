pub mod memory;
pub mod sqlite;

use thiserror::Error;

use crate::models::contact::Contact;

pub use memory::MemoryContactStore;
pub use sqlite::SqliteContactStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store poisoned: {0}")]
    Poisoned(String),
}

/// Persistence for contacts, keyed by normalized phone. Injectable so tests
/// can run against [`MemoryContactStore`].
pub trait ContactStore: Send + Sync {
    /// Returns the first stored contact whose normalized phone matches the
    /// normalized input. Callers reject inputs shorter than 7 trimmed
    /// characters before this is reached.
    fn find_by_phone(&self, phone: &str) -> Result<Option<Contact>, StoreError>;

    /// Updates first/last/email in place when the normalized phone matches an
    /// existing row, otherwise inserts a fresh row. All three fields are
    /// always written together; the raw phone of an existing row is never
    /// rewritten.
    fn upsert(
        &self,
        phone: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Contact, StoreError>;

    fn count(&self) -> Result<u64, StoreError>;
}
