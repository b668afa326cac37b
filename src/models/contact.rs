use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored contact row. The phone is kept verbatim as submitted; matching is
/// done on its normalized form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: i64,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
