use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::contact::Contact;
use crate::phone::normalize_phone;
use crate::store::{ContactStore, StoreError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    phone TEXT UNIQUE NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

/// SQLite-backed contact store. A single connection behind a mutex
/// serializes upserts, so the lookup-then-write sequence for one normalized
/// phone can never interleave with another writer's.
pub struct SqliteContactStore {
    conn: Mutex<Connection>,
}

impl SqliteContactStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        apply_pragmas(&conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|err| StoreError::Poisoned(err.to_string()))
    }
}

fn apply_pragmas(conn: &Connection) -> Result<(), StoreError> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "busy_timeout", 2000)?;
    Ok(())
}

// Matching is by normalized form, so the lookup walks every row rather than
// hitting the unique index on the raw phone.
fn find_on(conn: &Connection, phone: &str) -> Result<Option<Contact>, StoreError> {
    let wanted = normalize_phone(phone);

    let mut stmt = conn.prepare(
        "SELECT id, phone, first_name, last_name, email, created_at FROM contacts ORDER BY id",
    )?;
    let rows = stmt.query_map([], row_to_contact)?;

    for row in rows {
        let contact = row?;
        if normalize_phone(&contact.phone) == wanted {
            return Ok(Some(contact));
        }
    }

    Ok(None)
}

fn row_to_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
    let created_at: String = row.get(5)?;
    let created_at = created_at
        .parse::<DateTime<Utc>>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(err)))?;

    Ok(Contact {
        id: row.get(0)?,
        phone: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        email: row.get(4)?,
        created_at,
    })
}

impl ContactStore for SqliteContactStore {
    fn find_by_phone(&self, phone: &str) -> Result<Option<Contact>, StoreError> {
        let conn = self.lock()?;
        find_on(&conn, phone)
    }

    fn upsert(
        &self,
        phone: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Contact, StoreError> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        if let Some(existing) = find_on(&tx, phone)? {
            tx.execute(
                "UPDATE contacts SET first_name = ?1, last_name = ?2, email = ?3 WHERE id = ?4",
                params![first_name, last_name, email, existing.id],
            )?;
            tx.commit()?;
            return Ok(Contact {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                ..existing
            });
        }

        let created_at = Utc::now();
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO contacts (phone, first_name, last_name, email, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![phone, first_name, last_name, email, created_at.to_rfc3339()],
        )?;

        let contact = if inserted == 1 {
            Contact {
                id: tx.last_insert_rowid(),
                phone: phone.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                created_at,
            }
        } else {
            // Lost a race on the raw-phone unique constraint; retry as an
            // update of the row that beat us.
            let existing = tx
                .query_row(
                    "SELECT id, phone, first_name, last_name, email, created_at
                     FROM contacts WHERE phone = ?1",
                    params![phone],
                    row_to_contact,
                )
                .optional()?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
            tx.execute(
                "UPDATE contacts SET first_name = ?1, last_name = ?2, email = ?3 WHERE id = ?4",
                params![first_name, last_name, email, existing.id],
            )?;
            Contact {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                ..existing
            }
        };

        tx.commit()?;
        Ok(contact)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(n as u64)
    }
}
