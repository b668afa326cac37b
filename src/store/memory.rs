use std::sync::RwLock;

use chrono::Utc;

use crate::models::contact::Contact;
use crate::phone::normalize_phone;
use crate::store::{ContactStore, StoreError};

/// In-memory contact store for tests. Same normalized-phone semantics as the
/// SQLite store, no durability.
#[derive(Default)]
pub struct MemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContactStore for MemoryContactStore {
    fn find_by_phone(&self, phone: &str) -> Result<Option<Contact>, StoreError> {
        let wanted = normalize_phone(phone);
        let contacts = self
            .contacts
            .read()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;

        Ok(contacts
            .iter()
            .find(|contact| normalize_phone(&contact.phone) == wanted)
            .cloned())
    }

    fn upsert(
        &self,
        phone: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Contact, StoreError> {
        let wanted = normalize_phone(phone);
        let mut contacts = self
            .contacts
            .write()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;

        if let Some(existing) = contacts
            .iter_mut()
            .find(|contact| normalize_phone(&contact.phone) == wanted)
        {
            existing.first_name = first_name.to_string();
            existing.last_name = last_name.to_string();
            existing.email = email.to_string();
            return Ok(existing.clone());
        }

        let contact = Contact {
            id: contacts.len() as i64 + 1,
            phone: phone.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        contacts.push(contact.clone());
        Ok(contact)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let contacts = self
            .contacts
            .read()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        Ok(contacts.len() as u64)
    }
}
